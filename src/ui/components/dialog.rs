// Dialog component - 메시지/에러 다이얼로그와 diff 뷰어
//
// 다이얼로그는 화면 중앙에 겹쳐 그리며, 열려 있는 동안 키 입력을 먼저 받는다.

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;

/// 다이얼로그 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// 에러 다이얼로그 (명령 실패 출력 포함)
    Error { title: String, message: String },
    /// diff 뷰어
    Diff {
        title: String,
        lines: Vec<String>,
        scroll: usize,
    },
}

impl DialogKind {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn diff(title: impl Into<String>, text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(|l| l.replace('\t', "    ")).collect();
        if lines.is_empty() {
            lines.push("(no differences)".to_string());
        }
        DialogKind::Diff {
            title: title.into(),
            lines,
            scroll: 0,
        }
    }

    /// 스크롤 이동 (diff 뷰어만 해당)
    ///
    /// `viewport`는 한 화면에 보이는 줄 수. 마지막 화면 아래로는 내려가지 않는다.
    pub fn scroll_by(&mut self, delta: isize, viewport: usize) {
        if let DialogKind::Diff { lines, scroll, .. } = self {
            let max_scroll = lines.len().saturating_sub(viewport.max(1));
            let next = if delta < 0 {
                scroll.saturating_sub(delta.unsigned_abs())
            } else {
                scroll.saturating_add(delta as usize)
            };
            *scroll = next.min(max_scroll);
        }
    }

    pub fn scroll_to_top(&mut self) {
        if let DialogKind::Diff { scroll, .. } = self {
            *scroll = 0;
        }
    }

    pub fn scroll_to_bottom(&mut self, viewport: usize) {
        if let DialogKind::Diff { lines, scroll, .. } = self {
            *scroll = lines.len().saturating_sub(viewport.max(1));
        }
    }

    pub fn is_diff(&self) -> bool {
        matches!(self, DialogKind::Diff { .. })
    }
}

/// diff 줄 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    Header,
    Hunk,
    Added,
    Removed,
    Context,
}

pub fn classify_diff_line(line: &str) -> DiffLineKind {
    if line.starts_with("+++") || line.starts_with("---") {
        DiffLineKind::Header
    } else if line.starts_with("@@") {
        DiffLineKind::Hunk
    } else if line.starts_with('+') {
        DiffLineKind::Added
    } else if line.starts_with('-') {
        DiffLineKind::Removed
    } else if line.starts_with("diff ")
        || line.starts_with("index ")
        || line.starts_with("new file")
        || line.starts_with("deleted file")
        || line.starts_with("rename ")
        || line.starts_with("copy ")
    {
        DiffLineKind::Header
    } else {
        DiffLineKind::Context
    }
}

/// diff 뷰어에 보이는 줄 수 (테두리 + 하단 안내 제외)
pub fn diff_viewport_height(screen: Rect) -> usize {
    diff_area(screen).height.saturating_sub(3) as usize
}

fn diff_area(screen: Rect) -> Rect {
    let width = screen.width.saturating_sub(4).max(20).min(screen.width);
    let height = screen.height.saturating_sub(2).max(5).min(screen.height);
    Rect {
        x: screen.x + (screen.width.saturating_sub(width)) / 2,
        y: screen.y + (screen.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    button_bg: Color,
    button_fg: Color,
    error_color: Color,
    muted_color: Color,
    added_color: Color,
    removed_color: Color,
    hunk_color: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(37, 37, 38),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(0, 120, 212),
            button_bg: Color::Rgb(0, 120, 212),
            button_fg: Color::White,
            error_color: Color::Rgb(244, 71, 71),
            muted_color: Color::Rgb(128, 128, 128),
            added_color: Color::Green,
            removed_color: Color::Red,
            hunk_color: Color::Cyan,
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.dialog_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.border_color = theme.dialog_border.to_color();
        self.button_bg = theme.cursor_bg.to_color();
        self.button_fg = theme.cursor_fg.to_color();
        self.error_color = theme.error.to_color();
        self.muted_color = theme.dimmed.to_color();
        self.added_color = theme.added.to_color();
        self.removed_color = theme.deleted.to_color();
        self.hunk_color = theme.accent.to_color();
        self
    }

    /// 다이얼로그 영역 계산 (화면 중앙)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            DialogKind::Error { message, .. } => {
                let w = ((sw as f32 * 0.7) as u16).clamp(30, 100);
                let inner_width = w.saturating_sub(DIALOG_H_PADDING * 2).max(1) as usize;
                let lines: usize = message
                    .lines()
                    .map(|line| line.width().div_ceil(inner_width).max(1))
                    .sum::<usize>()
                    .max(1);
                let h = (5 + lines as u16).min(sh.saturating_sub(2)).max(5);
                (w, h)
            }
            DialogKind::Diff { .. } => return diff_area(screen),
        };

        let width = width.min(sw);
        let height = height.min(sh);
        Rect {
            x: screen.x + (sw.saturating_sub(width)) / 2,
            y: screen.y + (sh.saturating_sub(height)) / 2,
            width,
            height,
        }
    }

    /// 버튼 렌더링 헬퍼
    fn render_button(&self, buf: &mut Buffer, x: u16, y: u16, label: &str) -> u16 {
        let padded_label = format!(" {} ", label);
        let width = padded_label.width() as u16;
        let style = Style::default().fg(self.button_fg).bg(self.button_bg);
        buf.set_string(x, y, &padded_label, style);
        width
    }

    fn block(&self, title: &str, accent: Color) -> Block<'static> {
        Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(self.bg_color))
    }

    /// 에러 다이얼로그 렌더링
    fn render_error(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str) {
        self.block(title, self.error_color).render(area, buf);

        let inner = Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(DIALOG_V_PADDING + 3),
        };
        Paragraph::new(message.to_string())
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: false })
            .render(inner, buf);

        // OK 버튼
        let button_y = area.y + area.height.saturating_sub(2);
        let button_width = " OK ".width() as u16;
        let button_x = area.x + (area.width.saturating_sub(button_width)) / 2;
        self.render_button(buf, button_x, button_y, "OK");
    }

    fn render_diff(&self, buf: &mut Buffer, area: Rect, title: &str, lines: &[String], scroll: usize) {
        self.block(title, self.border_color).render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(3),
        };

        let visible: Vec<Line> = lines
            .iter()
            .skip(scroll)
            .take(inner.height as usize)
            .map(|line| {
                let style = match classify_diff_line(line) {
                    DiffLineKind::Added => Style::default().fg(self.added_color),
                    DiffLineKind::Removed => Style::default().fg(self.removed_color),
                    DiffLineKind::Hunk => Style::default().fg(self.hunk_color),
                    DiffLineKind::Header => Style::default()
                        .fg(self.fg_color)
                        .add_modifier(Modifier::BOLD),
                    DiffLineKind::Context => Style::default().fg(self.fg_color),
                };
                Line::from(Span::styled(line.as_str(), style))
            })
            .collect();
        Paragraph::new(visible).render(inner, buf);

        let position = format!(
            " {}/{}  j/k scroll  space/b page  esc close ",
            (scroll + 1).min(lines.len()),
            lines.len()
        );
        let hint_y = area.y + area.height.saturating_sub(2);
        buf.set_string(
            area.x + 1,
            hint_y,
            position,
            Style::default().fg(self.muted_color),
        );
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = self.calculate_area(area);
        if dialog_area.width < 4 || dialog_area.height < 4 {
            return;
        }

        // 배경 클리어
        Clear.render(dialog_area, buf);

        match self.kind {
            DialogKind::Error { title, message } => {
                self.render_error(buf, dialog_area, title, message)
            }
            DialogKind::Diff {
                title,
                lines,
                scroll,
            } => self.render_diff(buf, dialog_area, title, lines, *scroll),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(kind: &DialogKind, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        Dialog::new(kind).theme(&Theme::dark()).render(area, &mut buf);
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                if let Some(cell) = buf.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_classify_diff_line() {
        assert_eq!(classify_diff_line("diff --git a/x b/x"), DiffLineKind::Header);
        assert_eq!(classify_diff_line("--- a/x"), DiffLineKind::Header);
        assert_eq!(classify_diff_line("+++ b/x"), DiffLineKind::Header);
        assert_eq!(classify_diff_line("@@ -1,2 +1,3 @@"), DiffLineKind::Hunk);
        assert_eq!(classify_diff_line("+added"), DiffLineKind::Added);
        assert_eq!(classify_diff_line("-removed"), DiffLineKind::Removed);
        assert_eq!(classify_diff_line(" same"), DiffLineKind::Context);
    }

    #[test]
    fn test_diff_scroll_is_clamped() {
        let text = (0..10).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let mut kind = DialogKind::diff("a.txt", &text);

        kind.scroll_by(-3, 4);
        assert!(matches!(kind, DialogKind::Diff { scroll: 0, .. }));

        kind.scroll_by(100, 4);
        assert!(matches!(kind, DialogKind::Diff { scroll: 6, .. }));

        kind.scroll_to_top();
        kind.scroll_by(2, 4);
        assert!(matches!(kind, DialogKind::Diff { scroll: 2, .. }));

        kind.scroll_to_bottom(4);
        assert!(matches!(kind, DialogKind::Diff { scroll: 6, .. }));
    }

    #[test]
    fn test_empty_diff_has_placeholder() {
        let kind = DialogKind::diff("a.txt", "");
        match kind {
            DialogKind::Diff { lines, .. } => assert_eq!(lines, vec!["(no differences)"]),
            _ => panic!("expected diff"),
        }
    }

    #[test]
    fn test_error_dialog_shows_message_and_button() {
        let kind = DialogKind::error("Command failed", "Error: no such revision");
        let text = rendered(&kind, Rect::new(0, 0, 80, 20));
        assert!(text.contains("Command failed"));
        assert!(text.contains("Error: no such revision"));
        assert!(text.contains(" OK "));
    }

    #[test]
    fn test_diff_viewer_shows_scrolled_lines() {
        let mut kind = DialogKind::diff("a.txt", "first\nsecond\nthird");
        kind.scroll_by(1, 1);
        let text = rendered(&kind, Rect::new(0, 0, 60, 12));
        assert!(text.contains("second"));
        assert!(!text.contains("first"));
        assert!(text.contains("2/3"));
    }

    #[test]
    fn test_diff_viewport_height() {
        // 24 - 2 (여백) - 3 (테두리/안내)
        assert_eq!(diff_viewport_height(Rect::new(0, 0, 80, 24)), 19);
    }
}
