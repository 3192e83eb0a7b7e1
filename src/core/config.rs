//! 설정 파일 (`config.toml`)
//!
//! 우선순위: `--config` 인자 > `JJDETAILS_CONFIG` 환경 변수 > `<config_dir>/jjdetails/config.toml`

use crate::utils::error::{JjDetailsError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "jjdetails";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_ENV: &str = "JJDETAILS_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 테마 이름 (dark, light, high_contrast 또는 themes 디렉토리의 파일 이름)
    pub theme: String,
    /// jj 실행 파일
    pub jj_binary: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            jj_binary: "jj".to_string(),
        }
    }
}

impl Config {
    /// 설정 파일 로드
    ///
    /// 파일이 없으면 기본값, 형식이 잘못되었으면 에러.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let Some(path) = Self::resolve_path(explicit) else {
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.jj_binary.trim().is_empty() {
            return Err(JjDetailsError::Config(
                "jj_binary must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(custom) = env::var(CONFIG_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        config_dir().map(|dir| dir.join(CONFIG_FILE))
    }
}

/// 애플리케이션 설정 디렉토리
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// 사용자 테마 디렉토리
pub fn themes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("themes"))
}

/// 로그 파일 기본 경로
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join("jjdetails.log"))
}
