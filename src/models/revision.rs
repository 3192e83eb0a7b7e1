/// 조회 중인 리비전
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Revision {
    /// change id
    pub change_id: String,
    /// commit id
    pub commit_id: String,
}

impl Revision {
    pub fn new(change_id: impl Into<String>, commit_id: impl Into<String>) -> Self {
        Self {
            change_id: change_id.into(),
            commit_id: commit_id.into(),
        }
    }

    /// `jj log` 출력(`change_id` 줄 + `commit_id` 줄)에서 파싱
    pub fn parse_log_output(output: &str) -> Option<Self> {
        let mut lines = output.lines().map(str::trim).filter(|l| !l.is_empty());
        let change_id = lines.next()?;
        let commit_id = lines.next()?;
        Some(Self::new(change_id, commit_id))
    }

    /// 상태바 표시용 짧은 id
    pub fn short_change_id(&self) -> &str {
        let end = self
            .change_id
            .char_indices()
            .nth(12)
            .map(|(i, _)| i)
            .unwrap_or(self.change_id.len());
        &self.change_id[..end]
    }
}
