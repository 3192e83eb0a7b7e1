//! 외부 `jj` 프로세스 실행
//!
//! - `run_sync`: 출력을 기다려 반환 (diff, 리비전 해석)
//! - `run_interactive`: 터미널을 넘겨주고 종료까지 대기 (호출 전 TUI 일시 중단 필요)
//! - 비동기 실행은 [`crate::system::tasks::TaskRunner`] 담당

use crate::system::jj::JjCommand;
use crate::utils::error::{JjDetailsError, Result};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// 명령 실행 인터페이스
pub trait CommandRunner {
    /// 출력을 기다려 stdout 반환
    fn run_sync(&self, command: &JjCommand) -> Result<String>;
    /// 터미널을 넘겨주고 실행 (호출 전 TUI 일시 중단 필요)
    fn run_interactive(&self, command: &JjCommand) -> Result<()>;
}

/// 실제 `jj` 바이너리 실행기
#[derive(Debug, Clone)]
pub struct JjRunner {
    binary: String,
    repository: Option<PathBuf>,
}

impl JjRunner {
    pub fn new(binary: impl Into<String>, repository: Option<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            repository,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn repository(&self) -> Option<&PathBuf> {
        self.repository.as_ref()
    }

    /// 공통 인자(`-R <repo>`)를 포함한 전체 인자 목록
    pub fn full_args(&self, command: &JjCommand) -> Vec<String> {
        let mut args = Vec::with_capacity(command.args().len() + 2);
        if let Some(repo) = &self.repository {
            args.push("-R".to_string());
            args.push(repo.to_string_lossy().to_string());
        }
        args.extend(command.args().iter().cloned());
        args
    }

    /// 백그라운드 실행용 std 명령 (에디터/페이저 비활성화)
    pub fn background_command(&self, command: &JjCommand) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.full_args(command));
        for (key, value) in background_env() {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null());
        cmd
    }
}

impl CommandRunner for JjRunner {
    fn run_sync(&self, command: &JjCommand) -> Result<String> {
        log::debug!("running: {}", command.display());
        let output = self.background_command(command).output()?;
        output_to_result(command, output)
    }

    fn run_interactive(&self, command: &JjCommand) -> Result<()> {
        log::info!("running interactive: {}", command.display());
        let status = Command::new(&self.binary)
            .args(self.full_args(command))
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(JjDetailsError::command(
                command.display(),
                status.to_string(),
                String::new(),
            ))
        }
    }
}

/// 터미널 없이 실행되는 명령의 환경 변수
///
/// 설명 편집기가 열리면 백그라운드 명령이 멈추므로 no-op 에디터를 지정한다.
pub fn background_env() -> [(&'static str, &'static str); 3] {
    [("JJ_EDITOR", "true"), ("EDITOR", "true"), ("PAGER", "cat")]
}

/// 프로세스 출력 → 결과 변환 (stdout 또는 stderr 포함 에러)
pub fn output_to_result(command: &JjCommand, output: Output) -> Result<String> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        log::warn!("`{}` failed: {}", command.display(), stderr);
        Err(JjDetailsError::command(
            command.display(),
            output.status.to_string(),
            stderr,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::jj;

    #[test]
    fn test_full_args_without_repository() {
        let runner = JjRunner::new("jj", None);
        assert_eq!(runner.full_args(&jj::snapshot()), vec!["debug", "snapshot"]);
    }

    #[test]
    fn test_full_args_with_repository() {
        let runner = JjRunner::new("jj", Some(PathBuf::from("/work/repo")));
        assert_eq!(
            runner.full_args(&jj::snapshot()),
            vec!["-R", "/work/repo", "debug", "snapshot"]
        );
    }

    #[test]
    fn test_missing_binary_is_io_error() {
        let runner = JjRunner::new("jjdetails-test-no-such-binary", None);
        let result = runner.run_sync(&jj::snapshot());
        assert!(matches!(result, Err(JjDetailsError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_command_is_command_error() {
        // `false`는 인자를 무시하고 1로 종료
        let runner = JjRunner::new("false", None);
        let result = runner.run_sync(&jj::snapshot());
        assert!(matches!(result, Err(JjDetailsError::Command { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_command_returns_stdout() {
        let runner = JjRunner::new("echo", None);
        let output = runner.run_sync(&JjCommand::new(["hello"])).unwrap();
        assert_eq!(output, "hello\n");
    }
}
