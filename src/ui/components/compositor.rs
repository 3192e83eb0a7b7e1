// View compositor - 파일 목록 + 확인 오버레이 합성
//
// 각 줄의 앞뒤 공백을 잘라낸 뒤 가장 긴 줄 폭으로 다시 채운다.
// 채움 칸은 테마 배경색을 쓰므로 터미널 배경이 비치지 않는다.

use crate::models::{FileItem, SelectionList};
use crate::ui::components::confirmation::ConfirmationGate;
use crate::ui::layout::FIXED_CHROME;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

const EMPTY_MESSAGE: &str = "No changes";

/// 합성된 본문
#[derive(Debug, Clone)]
pub struct ComposedView {
    lines: Vec<Line<'static>>,
    bg: Color,
}

#[cfg(test)]
impl ComposedView {
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// 각 줄의 텍스트
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.to_string()).collect()
    }
}

/// 파일 목록 표시 가능 줄 수
pub fn visible_rows<E>(gate: &ConfirmationGate<E>, total_height: u16) -> usize {
    total_height
        .saturating_sub(FIXED_CHROME)
        .saturating_sub(gate.height()) as usize
}

pub fn compose<E>(
    list: &SelectionList,
    gate: &ConfirmationGate<E>,
    theme: &Theme,
    total_height: u16,
) -> ComposedView {
    let bg = theme.bg_primary.to_color();
    let mut lines: Vec<Line<'static>> = Vec::new();

    if list.is_empty() {
        lines.push(Line::from(Span::styled(
            EMPTY_MESSAGE,
            Style::default()
                .fg(theme.dimmed.to_color())
                .bg(bg)
                .add_modifier(Modifier::DIM),
        )));
    } else {
        let rows = visible_rows(gate, total_height);
        let (start, end) = list.visible_window(rows);
        let any_checked = list.items().iter().any(|item| item.selected);
        let hints = gate.hints();

        for (index, item) in list.items()[start..end].iter().enumerate() {
            let index = start + index;
            let is_cursor = index == list.cursor();
            let targeted = item.selected || (!any_checked && is_cursor);
            let hint = hints.map(|h| if targeted { h.selected } else { h.unselected });
            lines.push(render_row(item, is_cursor, hint, theme));
        }
    }

    lines.extend(gate.render_lines(theme));

    let lines: Vec<Line<'static>> = lines.into_iter().map(trim_line).collect();
    let width = lines.iter().map(Line::width).max().unwrap_or(0);
    let lines = lines
        .into_iter()
        .map(|line| pad_line(line, width, bg))
        .collect();

    ComposedView { lines, bg }
}

fn render_row(item: &FileItem, is_cursor: bool, hint: Option<&str>, theme: &Theme) -> Line<'static> {
    let bg = if is_cursor {
        theme.cursor_bg.to_color()
    } else {
        theme.bg_primary.to_color()
    };
    let base = Style::default().bg(bg);

    let name_style = if item.selected {
        base.fg(theme.selected.to_color()).add_modifier(Modifier::BOLD)
    } else if is_cursor {
        base.fg(theme.cursor_fg.to_color())
    } else {
        base.fg(theme.fg_primary.to_color())
    };

    // 줄 앞 공백은 잘리므로 체크 표시는 상태 글리프 뒤에 둔다
    let marker = if item.selected { " ✓" } else { "  " };
    let mut spans = vec![
        Span::styled(
            item.status.glyph().to_string(),
            base.fg(theme.status_color(item.status))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(marker, base.fg(theme.selected.to_color())),
        Span::styled(format!(" {}", item.display_name), name_style),
    ];

    if item.conflict {
        spans.push(Span::styled(
            " conflict",
            base.fg(theme.conflict.to_color()).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(hint) = hint {
        spans.push(Span::styled(
            format!("  {}", hint),
            base.fg(theme.dimmed.to_color()).add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

/// 줄 앞뒤 공백 제거 (빈 span 은 버림)
fn trim_line(line: Line<'static>) -> Line<'static> {
    let style = line.style;
    let mut spans: Vec<Span<'static>> = line.spans;

    while let Some(first) = spans.first_mut() {
        let trimmed = first.content.trim_start().to_string();
        if trimmed.is_empty() {
            spans.remove(0);
        } else {
            first.content = trimmed.into();
            break;
        }
    }
    while let Some(last) = spans.last_mut() {
        let trimmed = last.content.trim_end().to_string();
        if trimmed.is_empty() {
            spans.pop();
        } else {
            last.content = trimmed.into();
            break;
        }
    }

    Line::from(spans).style(style)
}

fn pad_line(mut line: Line<'static>, width: usize, bg: Color) -> Line<'static> {
    let current = line.width();
    if current < width {
        let fill_bg = line
            .spans
            .last()
            .and_then(|span| span.style.bg)
            .unwrap_or(bg);
        line.spans
            .push(Span::styled(" ".repeat(width - current), Style::default().bg(fill_bg)));
    }
    line
}

impl Widget for ComposedView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg));
        for (offset, line) in self.lines.iter().enumerate() {
            let y = area.y + offset as u16;
            if offset as u16 >= area.height {
                break;
            }
            buf.set_line(area.x, y, line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileStatus;
    use crate::ui::components::confirmation::{ConfirmOption, SelectionHints};
    use crossterm::event::KeyCode;

    fn list(names: &[&str]) -> SelectionList {
        let mut list = SelectionList::new();
        list.replace(
            names
                .iter()
                .map(|n| FileItem::new(FileStatus::Modified, *n, *n))
                .collect(),
            &[],
        );
        list
    }

    fn active_gate() -> ConfirmationGate<()> {
        let mut gate = ConfirmationGate::new();
        gate.activate(
            "Are you sure?",
            SelectionHints {
                selected: "gets restored",
                unselected: "stays as is",
            },
            vec![ConfirmOption::new("Yes", vec![KeyCode::Char('y')], "y", vec![])],
        );
        gate
    }

    #[test]
    fn test_empty_list_renders_no_changes() {
        let gate: ConfirmationGate<()> = ConfirmationGate::new();
        let view = compose(&SelectionList::new(), &gate, &Theme::dark(), 10);
        assert_eq!(view.plain_lines(), vec![EMPTY_MESSAGE.to_string()]);
    }

    #[test]
    fn test_lines_are_trimmed_and_padded_to_same_width() {
        let gate: ConfirmationGate<()> = ConfirmationGate::new();
        let view = compose(&list(&["a.txt", "longer/name.rs"]), &gate, &Theme::dark(), 10);
        let lines = view.plain_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].trim_end(), "M   a.txt");
        assert_eq!(lines[1], "M   longer/name.rs");
        assert_eq!(lines[0].len(), lines[1].len());
        assert!(view.lines().iter().all(|l| l.width() == 18));
    }

    #[test]
    fn test_selected_and_conflict_markers() {
        let mut list = list(&["a.txt", "b.txt"]);
        list.toggle_current_selected();
        let mut items = list.items().to_vec();
        items[1].conflict = true;
        list.replace(items, &["a.txt".to_string()]);

        let gate: ConfirmationGate<()> = ConfirmationGate::new();
        let lines = compose(&list, &gate, &Theme::dark(), 10).plain_lines();
        assert_eq!(lines[0].trim_end(), "M ✓ a.txt");
        assert_eq!(lines[1].trim_end(), "M   b.txt conflict");
        // 체크 여부와 관계없이 글리프와 파일명 열이 맞는다
        let name_col = |line: &str| line.chars().position(|c| c == 'a' || c == 'b');
        assert_eq!(name_col(&lines[0]), name_col(&lines[1]));
    }

    #[test]
    fn test_gate_reduces_rows_and_shows_hints() {
        let list = list(&["a", "b", "c", "d", "e"]);
        let gate = active_gate();
        // 7 - 2 (상태바/커맨드바) - 2 (확인 블록) = 3 행
        let lines = compose(&list, &gate, &Theme::dark(), 7).plain_lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].trim_end(), "M   a  gets restored");
        assert_eq!(lines[1].trim_end(), "M   b  stays as is");
        assert_eq!(lines[3].trim_end(), "Are you sure?");
        assert_eq!(lines[4].trim_end(), "[y] Yes");
    }

    #[test]
    fn test_render_fills_background() {
        let theme = Theme::dark();
        let gate: ConfirmationGate<()> = ConfirmationGate::new();
        let view = compose(&list(&["a"]), &gate, &theme, 10);
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);

        let bg = theme.bg_primary.to_color();
        assert_eq!(buf.cell((11, 2)).map(|c| c.bg), Some(bg));
    }
}
