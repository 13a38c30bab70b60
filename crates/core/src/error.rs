// Central Error Type for the Runner Facade

use crate::port::InvocationError;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by `JtvRunner`
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The JtV executable could not be located; actionable (build or install it)
    #[error("JtV binary not found: {executable}")]
    ExecutableNotFound { executable: String },

    /// The runtime ran but did not produce a successful result
    #[error(transparent)]
    Runtime(#[from] RuntimeFailure),

    #[error("Failed to launch JtV: {0}")]
    Launch(String),
}

/// Failure or timeout of a JtV execution, collapsed into one runtime error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeFailure {
    #[error("JtV execution failed: {stderr}")]
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("JtV execution timed out")]
    TimedOut { limit: Duration },
}

impl RunnerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RunnerError::ExecutableNotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RunnerError::Runtime(RuntimeFailure::TimedOut { .. }))
    }
}

impl From<InvocationError> for RunnerError {
    fn from(err: InvocationError) -> Self {
        match err {
            InvocationError::ExecutableNotFound { program } => {
                RunnerError::ExecutableNotFound {
                    executable: program,
                }
            }
            InvocationError::SpawnFailed(msg) | InvocationError::IoError(msg) => {
                RunnerError::Launch(msg)
            }
        }
    }
}

/// Result type alias using RunnerError
pub type Result<T> = std::result::Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_contains_stderr() {
        let err = RunnerError::from(RuntimeFailure::Failed {
            exit_code: Some(1),
            stderr: "type error: expected Int".to_string(),
        });

        assert_eq!(
            err.to_string(),
            "JtV execution failed: type error: expected Int"
        );
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_timeout_message_is_fixed() {
        let err = RunnerError::from(RuntimeFailure::TimedOut {
            limit: Duration::from_millis(1),
        });

        assert_eq!(err.to_string(), "JtV execution timed out");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_not_found_stays_distinct() {
        let err = RunnerError::from(InvocationError::ExecutableNotFound {
            program: "jtv".to_string(),
        });

        assert!(err.is_not_found());
        assert!(matches!(err, RunnerError::ExecutableNotFound { ref executable } if executable == "jtv"));
    }

    #[test]
    fn test_spawn_failure_maps_to_launch() {
        let err = RunnerError::from(InvocationError::SpawnFailed("permission denied".to_string()));

        assert!(matches!(err, RunnerError::Launch(_)));
        assert!(!err.is_not_found());
    }
}
