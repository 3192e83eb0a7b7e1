use crate::models::file_item::FileItem;

/// 커서가 있는 변경 파일 목록
///
/// 항목이 있으면 `cursor < len`, 비어 있으면 `cursor == 0`을 유지한다.
/// 목록 자체는 `replace`로만 통째로 교체되고, 그 외에는 `selected` 플래그만 바뀐다.
#[derive(Debug, Clone, Default)]
pub struct SelectionList {
    items: Vec<FileItem>,
    cursor: usize,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[FileItem] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 커서 위치의 항목
    pub fn current(&self) -> Option<&FileItem> {
        self.items.get(self.cursor)
    }

    /// 커서 위로 이동 (첫 항목에서는 무시)
    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// 커서 아래로 이동 (마지막 항목에서는 무시)
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    /// 현재 항목의 체크를 뒤집고 커서를 한 칸 내린다.
    ///
    /// 뒤집힌 뒤의 상태를 반환한다. 목록이 비어 있으면 `None`.
    pub fn toggle_current_selected(&mut self) -> Option<bool> {
        let item = self.items.get_mut(self.cursor)?;
        item.selected = !item.selected;
        let checked = item.selected;
        self.cursor_down();
        Some(checked)
    }

    /// 명시적으로 체크된 항목의 파일 이름
    pub fn checked_names(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.file_name.clone())
            .collect()
    }

    /// 작업 대상 파일 목록
    ///
    /// 체크된 항목이 있으면 그 목록, 없으면 커서 항목 하나.
    /// 목록이 비어 있을 때만 빈 결과를 반환한다.
    pub fn effective_selection(&self) -> Vec<String> {
        let checked = self.checked_names();
        if !checked.is_empty() {
            return checked;
        }
        self.current()
            .map(|item| vec![item.file_name.clone()])
            .unwrap_or_default()
    }

    /// 항목 목록 교체
    ///
    /// 이전 선택은 위치가 아니라 파일 이름으로 복원한다.
    pub fn replace(&mut self, mut items: Vec<FileItem>, previously_selected: &[String]) {
        for item in &mut items {
            item.selected = previously_selected.iter().any(|name| *name == item.file_name);
        }
        self.items = items;
        self.cursor = 0;
    }

    /// 커서가 보이도록 하는 표시 구간 (시작 인덱스, 끝 인덱스)
    pub fn visible_window(&self, rows: usize) -> (usize, usize) {
        if rows == 0 || self.items.is_empty() {
            return (0, 0);
        }
        let start = if self.cursor >= rows {
            self.cursor + 1 - rows
        } else {
            0
        };
        let end = (start + rows).min(self.items.len());
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::file_item::FileStatus;

    fn items(names: &[&str]) -> Vec<FileItem> {
        names
            .iter()
            .map(|name| FileItem::new(FileStatus::Modified, *name, *name))
            .collect()
    }

    fn list(names: &[&str]) -> SelectionList {
        let mut list = SelectionList::new();
        list.replace(items(names), &[]);
        list
    }

    #[test]
    fn test_empty_list() {
        let list = SelectionList::new();
        assert_eq!(list.cursor(), 0);
        assert!(list.current().is_none());
        assert!(list.effective_selection().is_empty());
    }

    #[test]
    fn test_cursor_bounds_are_no_ops() {
        let mut list = list(&["a", "b", "c"]);
        list.cursor_up();
        assert_eq!(list.cursor(), 0);

        list.cursor_down();
        list.cursor_down();
        assert_eq!(list.cursor(), 2);
        list.cursor_down();
        assert_eq!(list.cursor(), 2);
    }

    #[test]
    fn test_cursor_on_empty_list_stays_zero() {
        let mut list = SelectionList::new();
        list.cursor_down();
        list.cursor_up();
        assert_eq!(list.cursor(), 0);
        assert_eq!(list.toggle_current_selected(), None);
    }

    #[test]
    fn test_toggle_advances_cursor() {
        let mut list = list(&["a", "b"]);
        assert_eq!(list.toggle_current_selected(), Some(true));
        assert_eq!(list.cursor(), 1);
        assert!(list.items()[0].selected);

        // 마지막 항목에서는 커서가 그대로
        assert_eq!(list.toggle_current_selected(), Some(true));
        assert_eq!(list.cursor(), 1);

        assert_eq!(list.toggle_current_selected(), Some(false));
        assert!(!list.items()[1].selected);
    }

    #[test]
    fn test_effective_selection_falls_back_to_cursor() {
        let mut list = list(&["a", "b", "c"]);
        list.cursor_down();
        assert_eq!(list.effective_selection(), vec!["b".to_string()]);
    }

    #[test]
    fn test_effective_selection_returns_checked() {
        let mut list = list(&["a", "b", "c"]);
        list.toggle_current_selected();
        list.cursor_down();
        list.toggle_current_selected();
        assert_eq!(
            list.effective_selection(),
            vec!["a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_replace_restores_selection_by_name() {
        let mut list = SelectionList::new();
        let previous = vec!["b.txt".to_string(), "gone.txt".to_string()];
        list.replace(items(&["new.txt", "c.txt", "b.txt"]), &previous);

        let selected: Vec<&str> = list
            .items()
            .iter()
            .filter(|i| i.selected)
            .map(|i| i.file_name.as_str())
            .collect();
        assert_eq!(selected, vec!["b.txt"]);
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn test_replace_resets_cursor() {
        let mut list = list(&["a", "b", "c"]);
        list.cursor_down();
        list.cursor_down();
        list.replace(items(&["x"]), &[]);
        assert_eq!(list.cursor(), 0);
        assert_eq!(list.current().map(|i| i.file_name.as_str()), Some("x"));
    }

    #[test]
    fn test_visible_window_follows_cursor() {
        let mut list = list(&["a", "b", "c", "d", "e"]);
        assert_eq!(list.visible_window(3), (0, 3));
        for _ in 0..4 {
            list.cursor_down();
        }
        assert_eq!(list.visible_window(3), (2, 5));
        assert_eq!(list.visible_window(10), (0, 5));
        assert_eq!(list.visible_window(0), (0, 0));
    }
}
