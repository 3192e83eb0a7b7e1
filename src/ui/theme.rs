use crate::models::FileStatus;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 색상 테마 시스템
///
/// 파일 상태별 색상과 상태바/커맨드바 색상을 정의합니다.
/// TOML 파일에서 테마를 로드하거나 미리 정의된 테마를 사용할 수 있습니다.
/// 파일에 없는 항목은 Dark 테마 값을 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: ColorDef,
    pub fg_primary: ColorDef,

    // 파일 상태
    pub added: ColorDef,
    pub deleted: ColorDef,
    pub modified: ColorDef,
    pub renamed: ColorDef,
    pub copied: ColorDef,
    pub conflict: ColorDef,

    // 파일 리스트
    pub cursor_fg: ColorDef,
    pub cursor_bg: ColorDef,
    pub selected: ColorDef,
    pub dimmed: ColorDef,

    // UI 컴포넌트
    pub status_bar_bg: ColorDef,
    pub status_bar_fg: ColorDef,
    pub command_bar_bg: ColorDef,
    pub command_bar_fg: ColorDef,
    pub dialog_bg: ColorDef,
    pub dialog_border: ColorDef,

    // 강조
    pub accent: ColorDef,
    pub warning: ColorDef,
    pub error: ColorDef,
    pub success: ColorDef,
}

/// 색상 정의 (TOML 직렬화/역직렬화 지원)
///
/// Hex 문자열("#1e1e1e") 또는 색상 이름("Red")을 지원합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Hex(String),
    Named(String),
}

impl ColorDef {
    /// ColorDef를 ratatui의 Color로 변환
    ///
    /// untagged 역직렬화는 항상 `Hex`로 들어오므로 접두사로 다시 판별한다.
    pub fn to_color(&self) -> Color {
        let raw = match self {
            ColorDef::Hex(value) | ColorDef::Named(value) => value,
        };
        if raw.starts_with('#') {
            parse_hex_color(raw)
        } else {
            parse_named_color(raw)
        }
    }
}

impl From<&str> for ColorDef {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            ColorDef::Hex(s.to_string())
        } else {
            ColorDef::Named(s.to_string())
        }
    }
}

/// Hex 색상 문자열을 Color로 파싱
fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color::Rgb(r, g, b)
    } else {
        Color::Reset
    }
}

/// 색상 이름을 Color로 파싱
fn parse_named_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

impl Theme {
    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            bg_primary: "#1e1e1e".into(),
            fg_primary: "#d4d4d4".into(),

            added: "#4ec9b0".into(),
            deleted: "#f44747".into(),
            modified: "#569cd6".into(),
            renamed: "#c586c0".into(),
            copied: "#dcdcaa".into(),
            conflict: "#ff5f5f".into(),

            cursor_fg: "#ffffff".into(),
            cursor_bg: "#264f78".into(),
            selected: "#ffa500".into(),
            dimmed: "#808080".into(),

            status_bar_bg: "#007acc".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#2d2d30".into(),
            command_bar_fg: "#cccccc".into(),
            dialog_bg: "#252526".into(),
            dialog_border: "#0078d4".into(),

            accent: "#0078d4".into(),
            warning: "#ffa500".into(),
            error: "#f44747".into(),
            success: "#4ec9b0".into(),
        }
    }

    /// Light 테마
    pub fn light() -> Self {
        Theme {
            bg_primary: "#ffffff".into(),
            fg_primary: "#1e1e1e".into(),

            added: "#107c10".into(),
            deleted: "#e51400".into(),
            modified: "#0066cc".into(),
            renamed: "#8a2be2".into(),
            copied: "#a65e2b".into(),
            conflict: "#c50f1f".into(),

            cursor_fg: "#000000".into(),
            cursor_bg: "#add6ff".into(),
            selected: "#ca5010".into(),
            dimmed: "#8a8a8a".into(),

            status_bar_bg: "#0078d4".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#f3f3f3".into(),
            command_bar_fg: "#1e1e1e".into(),
            dialog_bg: "#f3f3f3".into(),
            dialog_border: "#0078d4".into(),

            accent: "#0078d4".into(),
            warning: "#ff8c00".into(),
            error: "#e51400".into(),
            success: "#107c10".into(),
        }
    }

    /// High Contrast 테마
    pub fn high_contrast() -> Self {
        Theme {
            bg_primary: "#000000".into(),
            fg_primary: "#ffffff".into(),

            added: "#00ff00".into(),
            deleted: "#ff0000".into(),
            modified: "#00ffff".into(),
            renamed: "#ff00ff".into(),
            copied: "#ffff00".into(),
            conflict: "#ff0000".into(),

            cursor_fg: "#000000".into(),
            cursor_bg: "#00ff00".into(),
            selected: "#ffff00".into(),
            dimmed: "#c0c0c0".into(),

            status_bar_bg: "#000000".into(),
            status_bar_fg: "#00ff00".into(),
            command_bar_bg: "#000000".into(),
            command_bar_fg: "#ffffff".into(),
            dialog_bg: "#000000".into(),
            dialog_border: "#00ff00".into(),

            accent: "#00ff00".into(),
            warning: "#ffff00".into(),
            error: "#ff0000".into(),
            success: "#00ff00".into(),
        }
    }

    /// 파일 상태별 색상
    pub fn status_color(&self, status: FileStatus) -> Color {
        match status {
            FileStatus::Added => self.added.to_color(),
            FileStatus::Deleted => self.deleted.to_color(),
            FileStatus::Modified => self.modified.to_color(),
            FileStatus::Renamed => self.renamed.to_color(),
            FileStatus::Copied => self.copied.to_color(),
        }
    }

    /// TOML 파일에서 테마 로드
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let theme: Theme = toml::from_str(&content)?;
        Ok(theme)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// 테마 관리자
///
/// 내장 테마와 사용자 테마 파일 중 하나를 현재 테마로 유지합니다.
pub struct ThemeManager {
    current_name: String,
    current_theme: Theme,
    available_themes: Vec<(String, Theme)>,
}

impl ThemeManager {
    /// 기본 테마 관리자 생성 (Dark 테마)
    pub fn new() -> Self {
        Self {
            current_name: "dark".to_string(),
            current_theme: Theme::dark(),
            available_themes: vec![
                ("dark".to_string(), Theme::dark()),
                ("light".to_string(), Theme::light()),
                ("high_contrast".to_string(), Theme::high_contrast()),
            ],
        }
    }

    /// 현재 테마 반환
    pub fn current(&self) -> &Theme {
        &self.current_theme
    }

    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    /// 테마 전환 (이름으로)
    pub fn switch_theme(&mut self, name: &str) -> Result<(), String> {
        if let Some((found, theme)) = self.available_themes.iter().find(|(n, _)| n == name) {
            self.current_name = found.clone();
            self.current_theme = theme.clone();
            Ok(())
        } else {
            Err(format!("theme not found: {}", name))
        }
    }

    /// 사용 가능한 테마 목록 반환
    pub fn available_themes(&self) -> Vec<String> {
        self.available_themes
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// 커스텀 테마 추가 (같은 이름은 교체)
    pub fn add_theme(&mut self, name: String, theme: Theme) {
        match self.available_themes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = theme,
            None => self.available_themes.push((name, theme)),
        }
    }

    /// 테마 디렉토리의 `*.toml` 파일 로드
    ///
    /// 읽을 수 없는 파일은 건너뛴다.
    pub fn load_themes_from_dir(&mut self, themes_dir: PathBuf) -> Result<(), anyhow::Error> {
        if !themes_dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(themes_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }
            match Theme::from_file(&path) {
                Ok(theme) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("custom")
                        .to_string();
                    log::debug!("loaded theme {} from {}", name, path.display());
                    self.add_theme(name, theme);
                }
                Err(err) => log::warn!("skipping theme {}: {}", path.display(), err),
            }
        }
        Ok(())
    }

    /// 설정 디렉토리에서 테마 파일 로드
    pub fn load_themes_from_config_dir(&mut self) -> Result<(), anyhow::Error> {
        match crate::core::config::themes_dir() {
            Some(dir) => self.load_themes_from_dir(dir),
            None => Ok(()),
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}
