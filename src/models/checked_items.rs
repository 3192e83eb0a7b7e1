/// 뷰 사이에 공유되는 파일 선택 항목
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckedItem {
    pub change_id: String,
    pub commit_id: String,
    pub file: String,
}

impl CheckedItem {
    pub fn new(
        change_id: impl Into<String>,
        commit_id: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            change_id: change_id.into(),
            commit_id: commit_id.into(),
            file: file.into(),
        }
    }
}

/// 공유 선택 레지스트리
///
/// 전역 싱글턴 대신 뷰에 참조로 주입된다.
/// `add`/`remove`는 동등성 기준이며 반복 호출해도 결과가 같다.
pub trait SelectionRegistry {
    fn add(&mut self, item: CheckedItem);
    fn remove(&mut self, item: &CheckedItem);
    /// 파일 선택 항목 전체 삭제 (재로딩 시)
    fn clear(&mut self);
    /// 현재 커서 항목 변경
    fn set_selected(&mut self, item: CheckedItem);
    fn selected(&self) -> Option<&CheckedItem>;
    fn checked(&self) -> &[CheckedItem];
}

/// 메모리 기반 레지스트리
#[derive(Debug, Clone, Default)]
pub struct CheckedItems {
    items: Vec<CheckedItem>,
    selected: Option<CheckedItem>,
}

impl CheckedItems {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionRegistry for CheckedItems {
    fn add(&mut self, item: CheckedItem) {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    fn remove(&mut self, item: &CheckedItem) {
        self.items.retain(|existing| existing != item);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn set_selected(&mut self, item: CheckedItem) {
        self.selected = Some(item);
    }

    fn selected(&self) -> Option<&CheckedItem> {
        self.selected.as_ref()
    }

    fn checked(&self) -> &[CheckedItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(file: &str) -> CheckedItem {
        CheckedItem::new("qpvuntsm", "8f2a61c0", file)
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut registry = CheckedItems::new();
        registry.add(item("a.txt"));
        registry.add(item("a.txt"));
        assert_eq!(registry.checked().len(), 1);
    }

    #[test]
    fn test_remove_by_equality() {
        let mut registry = CheckedItems::new();
        registry.add(item("a.txt"));
        registry.add(item("b.txt"));
        registry.remove(&item("a.txt"));
        registry.remove(&item("a.txt"));
        assert_eq!(registry.checked(), &[item("b.txt")]);
    }

    #[test]
    fn test_clear_keeps_cursor_item() {
        let mut registry = CheckedItems::new();
        registry.add(item("a.txt"));
        registry.set_selected(item("b.txt"));
        registry.clear();
        assert!(registry.checked().is_empty());
        assert_eq!(registry.selected(), Some(&item("b.txt")));
    }
}
