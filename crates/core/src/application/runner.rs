// Runner Facade - "run code" / "run file" on top of a ProcessInvoker

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::application::constants::{DEFAULT_EXECUTABLE, DEFAULT_TIMEOUT};
use crate::domain::{InvocationOutcome, InvocationRequest, RunResult, RunTarget};
use crate::error::{Result, RunnerError, RuntimeFailure};
use crate::port::ProcessInvoker;

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// JtV executable name or path
    pub executable: String,
    /// Limit applied to both invocation modes
    pub timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RunnerConfig {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// JtV Runner
///
/// Stateless: every call builds a fresh request and blocks (awaits) until the
/// runtime exits or the timeout fires.
pub struct JtvRunner {
    invoker: Arc<dyn ProcessInvoker>,
    config: RunnerConfig,
}

impl JtvRunner {
    pub fn new(invoker: Arc<dyn ProcessInvoker>, config: RunnerConfig) -> Self {
        Self { invoker, config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Execute inline JtV source (`jtv run -`, source on stdin)
    ///
    /// # Errors
    /// - RunnerError::ExecutableNotFound if the JtV binary is missing
    /// - RunnerError::Runtime on nonzero exit (message carries stderr) or timeout
    pub async fn run_code(&self, source: &str) -> Result<RunResult> {
        self.run(RunTarget::Inline(source.to_string())).await
    }

    /// Execute a JtV program file (`jtv run <path>`)
    ///
    /// Same error mapping as `run_code`.
    pub async fn run_file(&self, path: impl AsRef<Path>) -> Result<RunResult> {
        self.run(RunTarget::File(path.as_ref().to_path_buf())).await
    }

    async fn run(&self, target: RunTarget) -> Result<RunResult> {
        let request = InvocationRequest::new(&self.config.executable, target, self.config.timeout);

        let outcome = self.invoker.invoke(&request).await?;
        debug!(exit_code = ?outcome.exit_code(), "JtV invocation finished");

        match outcome {
            InvocationOutcome::Success { stdout, .. } => Ok(RunResult::new(stdout)),
            InvocationOutcome::Failure { exit_code, stderr } => {
                Err(RuntimeFailure::Failed { exit_code, stderr }.into())
            }
            InvocationOutcome::Timeout { limit } => {
                Err(RunnerError::Runtime(RuntimeFailure::TimedOut { limit }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::process_invoker::mocks::MockProcessInvoker;
    use std::ffi::OsString;

    fn runner(invoker: Arc<MockProcessInvoker>) -> JtvRunner {
        JtvRunner::new(invoker, RunnerConfig::default())
    }

    #[tokio::test]
    async fn test_run_code_returns_output() {
        let invoker = Arc::new(MockProcessInvoker::new_output("6765"));

        let result = runner(invoker.clone()).run_code("print(6765)").await.unwrap();

        assert_eq!(result, RunResult::new("6765"));

        let requests = invoker.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].program, "jtv");
        assert_eq!(requests[0].args, vec![OsString::from("run"), OsString::from("-")]);
        assert_eq!(requests[0].stdin.as_deref(), Some("print(6765)"));
        assert_eq!(requests[0].timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_run_file_passes_path_without_stdin() {
        let invoker = Arc::new(MockProcessInvoker::new_output("ok"));
        let config = RunnerConfig::new("/opt/jtv/bin/jtv").with_timeout(Duration::from_secs(2));

        let result = JtvRunner::new(invoker.clone(), config)
            .run_file("contracts/transfer.jtv")
            .await
            .unwrap();

        assert_eq!(result.output, "ok");

        let request = &invoker.requests()[0];
        assert_eq!(request.program, "/opt/jtv/bin/jtv");
        assert_eq!(
            request.args,
            vec![OsString::from("run"), OsString::from("contracts/transfer.jtv")]
        );
        assert!(request.stdin.is_none());
        assert_eq!(request.timeout, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_failure_raises_runtime_error_with_stderr() {
        let invoker = Arc::new(MockProcessInvoker::new_fail(1, "undefined variable: x"));

        let err = runner(invoker).run_code("print(x)").await.unwrap_err();

        assert!(matches!(
            err,
            RunnerError::Runtime(RuntimeFailure::Failed {
                exit_code: Some(1),
                ..
            })
        ));
        assert!(err.to_string().contains("undefined variable: x"));
    }

    #[tokio::test]
    async fn test_timeout_raises_timed_out() {
        let invoker = Arc::new(MockProcessInvoker::new_timeout());

        let err = runner(invoker).run_file("loop.jtv").await.unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "JtV execution timed out");
    }

    #[tokio::test]
    async fn test_missing_executable_propagates_distinctly() {
        let invoker = Arc::new(MockProcessInvoker::new_not_found());

        let err = runner(invoker).run_code("print(1)").await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_identical_source_gives_identical_output() {
        let invoker = Arc::new(MockProcessInvoker::new_output("55"));
        let runner = runner(invoker.clone());

        let first = runner.run_code("print(55)").await.unwrap();
        let second = runner.run_code("print(55)").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(invoker.call_count(), 2);
    }
}
