use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// 문자열을 최대 너비에 맞춰 중간 생략한다.
pub fn truncate_middle(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if text.width() <= max_width {
        return text.to_string();
    }

    if max_width < 5 {
        return take_prefix_by_width(text, max_width);
    }

    let side_width = (max_width - ELLIPSIS.width()) / 2;
    let start = take_prefix_by_width(text, side_width);
    let end = take_suffix_by_width(text, side_width);
    format!("{}{}{}", start, ELLIPSIS, end)
}

/// 저장소 경로를 표시용으로 축약한다.
/// HOME 경로는 `~`로 바꾸고, 그래도 길면 앞부분을 `...`으로 생략한다.
pub fn shorten_repository_path(path: &str, max_width: usize) -> String {
    let path = shorten_home(path);
    if path.width() <= max_width {
        return path;
    }
    if max_width <= ELLIPSIS.width() {
        return take_prefix_by_width(&path, max_width);
    }
    let suffix_width = max_width - ELLIPSIS.width();
    format!("{}{}", ELLIPSIS, take_suffix_by_width(&path, suffix_width))
}

fn shorten_home(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };
    let home = home.to_string_lossy();
    if home.is_empty() {
        return path.to_string();
    }

    if path == home {
        "~".to_string()
    } else if let Some(rest) = path.strip_prefix(home.as_ref()) {
        if rest.starts_with('/') {
            format!("~{}", rest)
        } else {
            path.to_string()
        }
    } else {
        path.to_string()
    }
}

fn take_prefix_by_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

fn take_suffix_by_width(text: &str, max_width: usize) -> String {
    let mut rev_chars: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        rev_chars.push(ch);
        width += ch_width;
    }
    rev_chars.reverse();
    rev_chars.into_iter().collect()
}
