/// 변경 파일 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileStatus {
    /// 추가
    Added,
    /// 삭제
    Deleted,
    /// 수정 (알 수 없는 상태 문자도 여기에 매핑)
    #[default]
    Modified,
    /// 이름 변경
    Renamed,
    /// 복사
    Copied,
}

impl FileStatus {
    /// 상태 문자로부터 변환 (A/D/M/R/C)
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(FileStatus::Added),
            'D' => Some(FileStatus::Deleted),
            'M' => Some(FileStatus::Modified),
            'R' => Some(FileStatus::Renamed),
            'C' => Some(FileStatus::Copied),
            _ => None,
        }
    }

    /// 목록에 표시되는 글리프
    pub fn glyph(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Deleted => 'D',
            FileStatus::Modified => 'M',
            FileStatus::Renamed => 'R',
            FileStatus::Copied => 'C',
        }
    }

    /// 이름 변경/복사처럼 원본 경로 표기가 섞이는 상태인지
    pub fn has_source_path(&self) -> bool {
        matches!(self, FileStatus::Renamed | FileStatus::Copied)
    }
}

/// 변경 파일 항목
///
/// `file_name`은 항상 명령에 그대로 넘길 수 있는 경로이고,
/// `display_name`은 화면 표시 전용이다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    pub status: FileStatus,
    /// 원본 항목 텍스트 (`{old => new}` 표기 포함 가능)
    pub display_name: String,
    /// 정규화된 파일 경로
    pub file_name: String,
    /// 체크 여부
    pub selected: bool,
    /// 충돌 여부
    pub conflict: bool,
}

impl FileItem {
    pub fn new(status: FileStatus, display_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            status,
            display_name: display_name.into(),
            file_name: file_name.into(),
            selected: false,
            conflict: false,
        }
    }

    /// 충돌 플래그 설정
    pub fn with_conflict(mut self, conflict: bool) -> Self {
        self.conflict = conflict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_char() {
        assert_eq!(FileStatus::from_char('A'), Some(FileStatus::Added));
        assert_eq!(FileStatus::from_char('D'), Some(FileStatus::Deleted));
        assert_eq!(FileStatus::from_char('M'), Some(FileStatus::Modified));
        assert_eq!(FileStatus::from_char('R'), Some(FileStatus::Renamed));
        assert_eq!(FileStatus::from_char('C'), Some(FileStatus::Copied));
        assert_eq!(FileStatus::from_char('X'), None);
    }

    #[test]
    fn test_default_status_is_modified() {
        assert_eq!(FileStatus::default(), FileStatus::Modified);
        assert_eq!(FileStatus::default().glyph(), 'M');
    }

    #[test]
    fn test_file_item_creation() {
        let item = FileItem::new(FileStatus::Renamed, "{a => b}.txt", "b.txt").with_conflict(true);
        assert_eq!(item.file_name, "b.txt");
        assert_eq!(item.display_name, "{a => b}.txt");
        assert!(item.conflict);
        assert!(!item.selected);
        assert!(item.status.has_source_path());
    }
}
