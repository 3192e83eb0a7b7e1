// Status bar component - 상단 상태바 컴포넌트
//
// 리비전, 저장소 경로, 체크된 파일 수, 알림 메시지 표시

use crate::ui::Theme;
use crate::utils::path_display::{shorten_repository_path, truncate_middle};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    /// 짧은 change id
    revision: &'a str,
    /// 커서 파일
    current_file: Option<&'a str>,
    repository: Option<&'a Path>,
    file_count: usize,
    checked_count: usize,
    /// 일시 알림 (없으면 저장소 경로 표시)
    toast: Option<&'a str>,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
    checked_color: Color,
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        Self {
            revision: "",
            current_file: None,
            repository: None,
            file_count: 0,
            checked_count: 0,
            toast: None,
            bg_color: Color::Rgb(0, 122, 204),
            fg_color: Color::White,
            accent_color: Color::White,
            checked_color: Color::Yellow,
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(mut self, revision: &'a str) -> Self {
        self.revision = revision;
        self
    }

    pub fn current_file(mut self, file: Option<&'a str>) -> Self {
        self.current_file = file;
        self
    }

    pub fn repository(mut self, repository: Option<&'a Path>) -> Self {
        self.repository = repository;
        self
    }

    pub fn file_count(mut self, count: usize) -> Self {
        self.file_count = count;
        self
    }

    pub fn checked_count(mut self, count: usize) -> Self {
        self.checked_count = count;
        self
    }

    pub fn toast(mut self, toast: Option<&'a str>) -> Self {
        self.toast = toast;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.accent_color = theme.status_bar_fg.to_color();
        self.checked_color = theme.selected.to_color();
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let left = format!(" {} ", self.revision);
        let file = self
            .current_file
            .map(|file| format!("{} ", file))
            .unwrap_or_default();
        let counts = if self.checked_count > 0 {
            format!("{} files, {} checked ", self.file_count, self.checked_count)
        } else {
            format!("{} files ", self.file_count)
        };

        let remaining = (area.width as usize)
            .saturating_sub(left.width() + file.width() + counts.width() + 1);
        let middle = match (self.toast, self.repository) {
            (Some(toast), _) => truncate_middle(toast, remaining),
            (None, Some(repo)) => shorten_repository_path(&repo.to_string_lossy(), remaining),
            (None, None) => String::new(),
        };
        let padding = remaining.saturating_sub(middle.width());

        let counts_style = if self.checked_count > 0 {
            Style::default()
                .fg(self.checked_color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.fg_color)
        };

        let spans = vec![
            Span::styled(
                left,
                Style::default()
                    .fg(self.accent_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(file, Style::default().fg(self.checked_color)),
            Span::styled(middle, Style::default().fg(self.fg_color)),
            Span::raw(" ".repeat(padding + 1)),
            Span::styled(counts, counts_style),
        ];

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(bar: StatusBar, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width)
            .filter_map(|x| buf.cell((x, 0)).map(|cell| cell.symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_shows_revision_and_counts() {
        let text = rendered(
            StatusBar::new()
                .revision("qpvuntsmwlqt")
                .file_count(3)
                .checked_count(2),
            60,
        );
        assert!(text.starts_with(" qpvuntsmwlqt "));
        assert!(text.trim_end().ends_with("3 files, 2 checked"));
    }

    #[test]
    fn test_shows_cursor_file_after_revision() {
        let text = rendered(
            StatusBar::new()
                .revision("qpvuntsm")
                .current_file(Some("src/lib.rs"))
                .file_count(1),
            60,
        );
        assert!(text.starts_with(" qpvuntsm src/lib.rs "));
        assert!(text.trim_end().ends_with("1 files"));
    }

    #[test]
    fn test_toast_replaces_repository() {
        let text = rendered(
            StatusBar::new()
                .revision("abc")
                .repository(Some(Path::new("/work/repo")))
                .toast(Some("split finished")),
            60,
        );
        assert!(text.contains("split finished"));
        assert!(!text.contains("/work/repo"));
    }

    #[test]
    fn test_repository_shown_without_toast() {
        let text = rendered(
            StatusBar::new()
                .revision("abc")
                .repository(Some(Path::new("/work/repo"))),
            60,
        );
        assert!(text.contains("/work/repo"));
    }
}
