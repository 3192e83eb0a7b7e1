use thiserror::Error;

#[derive(Error, Debug)]
pub enum JjDetailsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("`{command}` failed ({status}): {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Cannot resolve revision: {0}")]
    InvalidRevision(String),
}

impl JjDetailsError {
    /// 외부 명령 실패 에러 생성
    pub fn command(
        command: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        JjDetailsError::Command {
            command: command.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JjDetailsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_message() {
        let err = JjDetailsError::command("jj split", "exit status: 1", "Error: no such revision");
        assert_eq!(
            err.to_string(),
            "`jj split` failed (exit status: 1): Error: no such revision"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "jj");
        let err: JjDetailsError = io.into();
        assert!(matches!(err, JjDetailsError::Io(_)));
    }
}
