//! `jj` 상태 출력 파서
//!
//! 입력 형식:
//!
//! ```text
//! <bool> <bool> ...            (아래 파일 줄마다 하나씩, 순서대로)
//! <STATUS> <path>
//! <STATUS> <prefix>{old => new}<suffix>
//! ```
//!
//! 빈 줄은 건너뛰며 충돌 플래그를 소비하지 않는다.

use crate::models::{FileItem, FileStatus};

const RENAME_ARROW: &str = " => ";

/// 상태 출력을 파일 항목 목록으로 변환
///
/// 첫 줄(충돌 플래그)이 없으면 빈 목록을 반환한다.
/// 플래그가 파일 줄보다 적으면 남은 항목은 충돌 없음으로 본다.
pub fn parse(raw: &str) -> Vec<FileItem> {
    let mut lines = raw.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let conflicts: Vec<bool> = header.split_whitespace().map(|c| c == "true").collect();

    let mut items = Vec::new();
    for line in lines {
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }

        let Some(status_char) = entry.chars().next() else {
            continue;
        };
        let status = FileStatus::from_char(status_char).unwrap_or_default();
        let rest = &entry[status_char.len_utf8()..];
        let path = rest.strip_prefix(' ').unwrap_or(rest);

        let conflict = conflicts.get(items.len()).copied().unwrap_or(false);
        items.push(
            FileItem::new(status, path, canonical_file_name(status, path)).with_conflict(conflict),
        );
    }
    items
}

/// 명령에 넘길 파일 경로 계산
///
/// 이름 변경/복사 항목은 `{old => new}` 구간을 오른쪽 값으로 치환한 뒤 정리한다.
/// 중괄호 없이 `old => new` 형태로 온 경우에도 오른쪽 경로를 쓴다.
pub fn canonical_file_name(status: FileStatus, path: &str) -> String {
    if !status.has_source_path() {
        return path.to_string();
    }
    if path.contains('{') {
        return clean_path(&replace_rename_spans(path));
    }
    match path.split_once(RENAME_ARROW) {
        Some((_, new_path)) => clean_path(new_path.trim()),
        None => path.to_string(),
    }
}

/// `{old => new}` 구간을 모두 `new`로 치환
fn replace_rename_spans(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        let Some(close_offset) = rest[open..].find('}') else {
            break;
        };
        let close = open + close_offset;
        let inner = &rest[open + 1..close];

        result.push_str(&rest[..open]);
        match inner.split_once(RENAME_ARROW) {
            Some((_, new_part)) => result.push_str(new_part.trim()),
            None => result.push_str(&rest[open..=close]),
        }
        rest = &rest[close + 1..];
    }
    result.push_str(rest);
    result
}

/// 경로를 어휘적으로 정리 (`.`, `..`, 중복 구분자 제거)
///
/// 빈 결과는 `.`, 루트 경로는 `/`로 정리된다.
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
