//! `jj` 명령 빌더
//!
//! 명령은 실행 전까지 인자 목록일 뿐이므로 테스트에서 그대로 비교할 수 있다.

/// 상태 출력 템플릿: 첫 줄에 파일별 충돌 여부, 이어서 `--summary` 줄
const STATUS_TEMPLATE: &str =
    r#"self.diff().files().map(|x| x.target().conflict()).join(" ") ++ "\n""#;
const REVISION_TEMPLATE: &str = r#"change_id ++ "\n" ++ commit_id ++ "\n""#;

/// 실행할 jj 명령 (바이너리 이름 제외 인자)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JjCommand {
    args: Vec<String>,
}

impl JjCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// 서브커맨드 이름 (`split`, `restore`, ...)
    pub fn subcommand(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    /// 셸에 붙여넣을 수 있는 형태의 명령줄
    pub fn display(&self) -> String {
        let words = std::iter::once("jj").chain(self.args.iter().map(String::as_str));
        shlex::try_join(words).unwrap_or_else(|_| format!("jj {}", self.args.join(" ")))
    }

    fn with_files(mut self, files: &[String]) -> Self {
        self.args
            .extend(files.iter().map(|file| escape_file_name(file)));
        self
    }
}

/// 파일 경로를 fileset 문자열 리터럴로 변환
///
/// `\`와 `"`는 백슬래시로 이스케이프한다.
pub fn escape_file_name(file_name: &str) -> String {
    let escaped = file_name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("file:\"{}\"", escaped)
}

/// 파일을 변경한 리비전 revset
pub fn files_revset(file_name: &str) -> String {
    format!("files({})", escape_file_name(file_name))
}

/// 작업 사본 스냅샷
pub fn snapshot() -> JjCommand {
    JjCommand::new(["debug", "snapshot"])
}

/// 리비전의 변경 파일 상태
pub fn status(revision: &str) -> JjCommand {
    JjCommand::new([
        "log",
        "-r",
        revision,
        "--summary",
        "--no-graph",
        "--color",
        "never",
        "--quiet",
        "--ignore-working-copy",
        "--template",
        STATUS_TEMPLATE,
    ])
}

/// 파일 하나의 diff
pub fn diff(revision: &str, file_name: &str) -> JjCommand {
    JjCommand::new(["diff", "-r", revision, "--git", "--color", "never"])
        .with_files(&[file_name.to_string()])
}

pub fn split(revision: &str, files: &[String], parallel: bool) -> JjCommand {
    let mut command = JjCommand::new(["split", "-r", revision]);
    if parallel {
        command.args.push("--parallel".to_string());
    }
    command.with_files(files)
}

pub fn split_interactive(revision: &str, file_name: &str) -> JjCommand {
    JjCommand::new(["split", "-r", revision, "--interactive"])
        .with_files(&[file_name.to_string()])
}

pub fn restore(revision: &str, files: &[String]) -> JjCommand {
    JjCommand::new(["restore", "-c", revision]).with_files(files)
}

pub fn restore_interactive(revision: &str, file_name: &str) -> JjCommand {
    JjCommand::new(["restore", "-c", revision, "--interactive"])
        .with_files(&[file_name.to_string()])
}

pub fn absorb(revision: &str, files: &[String]) -> JjCommand {
    JjCommand::new(["absorb", "--from", revision]).with_files(files)
}

/// 스쿼시 인계용 명령 (이 뷰에서 직접 실행하지 않음)
pub fn squash(revision: &str, files: &[String]) -> JjCommand {
    JjCommand::new(["squash", "--from", revision]).with_files(files)
}

/// revset을 change id / commit id 로 해석
pub fn resolve_revision(revision: &str) -> JjCommand {
    JjCommand::new([
        "log",
        "-r",
        revision,
        "--no-graph",
        "--limit",
        "1",
        "--color",
        "never",
        "--ignore-working-copy",
        "--template",
        REVISION_TEMPLATE,
    ])
}
