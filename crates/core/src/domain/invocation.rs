// Invocation Request / Outcome
// One request/response cycle with the JtV runtime, created per call and never mutated

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// JtV subcommand used by both invocation modes
pub const RUN_SUBCOMMAND: &str = "run";

/// Path argument that tells JtV to read the program from standard input
pub const STDIN_SOURCE_ARG: &str = "-";

/// What the runtime should execute
///
/// Exactly one of inline source or file path is used per call; the enum makes
/// the mixed case unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    /// Source text piped through stdin (`jtv run -`)
    Inline(String),
    /// Program file passed by path (`jtv run <path>`)
    File(PathBuf),
}

impl RunTarget {
    /// Argument list for this target
    pub fn args(&self) -> Vec<OsString> {
        let target = match self {
            RunTarget::Inline(_) => OsString::from(STDIN_SOURCE_ARG),
            RunTarget::File(path) => path.clone().into_os_string(),
        };
        vec![OsString::from(RUN_SUBCOMMAND), target]
    }

    /// Standard-input payload for this target
    pub fn stdin(&self) -> Option<String> {
        match self {
            RunTarget::Inline(source) => Some(source.clone()),
            RunTarget::File(_) => None,
        }
    }
}

/// Invocation request handed to a `ProcessInvoker`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// Executable name (resolved via PATH) or absolute path
    pub program: String,
    pub args: Vec<OsString>,
    pub stdin: Option<String>,
    pub timeout: Duration,
}

impl InvocationRequest {
    /// Build a request for the given run target
    pub fn new(program: impl Into<String>, target: RunTarget, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: target.args(),
            stdin: target.stdin(),
            timeout,
        }
    }
}

/// Classified result of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// Exit status zero; stdout trimmed of trailing whitespace
    Success { stdout: String, exit_code: i32 },
    /// Nonzero exit, or death by signal (`exit_code` is `None`)
    Failure {
        exit_code: Option<i32>,
        stderr: String,
    },
    /// Wall-clock limit exceeded; the child has been terminated
    Timeout { limit: Duration },
}

impl InvocationOutcome {
    /// Classify a finished process from its exit code and captured streams
    ///
    /// Non UTF-8 bytes are decoded lossily.
    pub fn from_exit(exit_code: Option<i32>, stdout: &[u8], stderr: &[u8]) -> Self {
        match exit_code {
            Some(0) => InvocationOutcome::Success {
                stdout: String::from_utf8_lossy(stdout).trim_end().to_string(),
                exit_code: 0,
            },
            code => InvocationOutcome::Failure {
                exit_code: code,
                stderr: String::from_utf8_lossy(stderr).trim_end().to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Success { .. })
    }

    /// Exit code if the process exited on its own
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            InvocationOutcome::Success { exit_code, .. } => Some(*exit_code),
            InvocationOutcome::Failure { exit_code, .. } => *exit_code,
            InvocationOutcome::Timeout { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_target_reads_stdin() {
        let request = InvocationRequest::new(
            "jtv",
            RunTarget::Inline("print(1)".to_string()),
            Duration::from_secs(5),
        );

        assert_eq!(request.args, vec![OsString::from("run"), OsString::from("-")]);
        assert_eq!(request.stdin.as_deref(), Some("print(1)"));
    }

    #[test]
    fn test_file_target_has_no_stdin() {
        let request = InvocationRequest::new(
            "jtv",
            RunTarget::File(PathBuf::from("programs/fib.jtv")),
            Duration::from_secs(5),
        );

        assert_eq!(
            request.args,
            vec![OsString::from("run"), OsString::from("programs/fib.jtv")]
        );
        assert!(request.stdin.is_none());
    }

    #[test]
    fn test_success_trims_trailing_whitespace_only() {
        let outcome = InvocationOutcome::from_exit(Some(0), b"  6765 \n\n", b"");

        assert_eq!(
            outcome,
            InvocationOutcome::Success {
                stdout: "  6765".to_string(),
                exit_code: 0
            }
        );
    }

    #[test]
    fn test_nonzero_exit_is_failure_with_stderr() {
        let outcome = InvocationOutcome::from_exit(Some(2), b"partial", b"parse error at 3:7\n");

        assert_eq!(
            outcome,
            InvocationOutcome::Failure {
                exit_code: Some(2),
                stderr: "parse error at 3:7".to_string()
            }
        );
        assert_eq!(outcome.exit_code(), Some(2));
    }

    #[test]
    fn test_signal_death_is_failure_without_code() {
        let outcome = InvocationOutcome::from_exit(None, b"", b"");

        assert!(!outcome.is_success());
        assert_eq!(outcome.exit_code(), None);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let outcome = InvocationOutcome::from_exit(Some(0), &[0x34, 0xff, 0x32], b"");

        match outcome {
            InvocationOutcome::Success { stdout, .. } => assert_eq!(stdout, "4\u{fffd}2"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
