// Command bar component - 하단 커맨드 바 컴포넌트
//
// 키 바인딩 요약 표시, 폭이 모자라면 뒤쪽 항목부터 생략

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 커맨드 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandItem {
    /// 단축키 (esc, d, space/m, ...)
    pub key: String,
    pub label: String,
}

impl CommandItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    fn width(&self) -> usize {
        self.key.width() + 1 + self.label.width()
    }
}

/// 커맨드 바 컴포넌트
pub struct CommandBar {
    commands: Vec<CommandItem>,
    /// 오른쪽 끝 표시 (실행 중 작업 등)
    indicator: Option<String>,
    bg_color: Color,
    key_fg_color: Color,
    label_fg_color: Color,
    indicator_color: Color,
}

impl Default for CommandBar {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            indicator: None,
            bg_color: Color::Rgb(45, 45, 48),
            key_fg_color: Color::Rgb(0, 120, 212),
            label_fg_color: Color::Rgb(204, 204, 204),
            indicator_color: Color::Yellow,
        }
    }
}

impl CommandBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// 커맨드 목록 설정
    pub fn commands(mut self, commands: Vec<CommandItem>) -> Self {
        self.commands = commands;
        self
    }

    pub fn indicator(mut self, indicator: Option<String>) -> Self {
        self.indicator = indicator;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.command_bar_bg.to_color();
        self.key_fg_color = theme.accent.to_color();
        self.label_fg_color = theme.command_bar_fg.to_color();
        self.indicator_color = theme.warning.to_color();
        self
    }
}

impl Widget for CommandBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let indicator_width = self
            .indicator
            .as_ref()
            .map(|text| text.width() + 2)
            .unwrap_or(0);
        let budget = (area.width as usize).saturating_sub(indicator_width + 1);

        let key_style = Style::default()
            .fg(self.key_fg_color)
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(self.label_fg_color);

        let mut spans = vec![Span::raw(" ")];
        let mut used = 0;
        for cmd in &self.commands {
            let separator = if used == 0 { 0 } else { 2 };
            if used + separator + cmd.width() > budget {
                break;
            }
            if separator > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(cmd.key.clone(), key_style));
            spans.push(Span::styled(" ", label_style));
            spans.push(Span::styled(cmd.label.clone(), label_style));
            used += separator + cmd.width();
        }

        if let Some(indicator) = self.indicator {
            let padding = budget.saturating_sub(used);
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(
                format!(" {} ", indicator),
                Style::default().fg(self.indicator_color),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
