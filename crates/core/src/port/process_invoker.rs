// Process Invoker Port
// Abstraction over launching the JtV runtime as a child process

use crate::domain::{InvocationOutcome, InvocationRequest};
use async_trait::async_trait;
use thiserror::Error;

/// Invocation errors
///
/// Outcomes of a process that actually ran (success, failure, timeout) are
/// reported through `InvocationOutcome`; this type covers the cases where no
/// outcome could be produced.
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("Executable not found: {program}")]
    ExecutableNotFound { program: String },

    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Process Invoker trait
///
/// Implementations:
/// - SubprocessInvoker (infra-system): tokio child process with timeout and kill-on-expiry
/// - MockProcessInvoker: scripted outcomes for tests
#[async_trait]
pub trait ProcessInvoker: Send + Sync {
    /// Run the request to completion and classify the outcome
    ///
    /// # Errors
    /// - InvocationError::ExecutableNotFound if `request.program` cannot be located
    /// - InvocationError::SpawnFailed if the process cannot be started for any other reason
    /// - InvocationError::IoError if the child's pipes fail
    async fn invoke(
        &self,
        request: &InvocationRequest,
    ) -> Result<InvocationOutcome, InvocationError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock invoker behavior
    #[derive(Clone)]
    pub enum MockBehavior {
        /// Exit 0 with the given stdout
        Output(String),
        /// Exit nonzero with the given stderr
        Fail { exit_code: i32, stderr: String },
        /// Report a timeout
        Timeout,
        /// Behave as if the executable does not exist
        NotFound,
        /// Compute the outcome from the request (e.g. inspect the piped source)
        Respond(fn(&InvocationRequest) -> InvocationOutcome),
    }

    /// Mock Process Invoker for testing
    pub struct MockProcessInvoker {
        behavior: Arc<Mutex<MockBehavior>>,
        requests: Arc<Mutex<Vec<InvocationRequest>>>,
    }

    impl MockProcessInvoker {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn new_output(stdout: impl Into<String>) -> Self {
            Self::new(MockBehavior::Output(stdout.into()))
        }
        pub fn new_fail(exit_code: i32, stderr: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail {
                exit_code,
                stderr: stderr.into(),
            })
        }
        pub fn new_timeout() -> Self {
            Self::new(MockBehavior::Timeout)
        }
        pub fn new_not_found() -> Self {
            Self::new(MockBehavior::NotFound)
        }
        pub fn responding(respond: fn(&InvocationRequest) -> InvocationOutcome) -> Self {
            Self::new(MockBehavior::Respond(respond))
        }
        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
        /// Requests received so far, in call order
        pub fn requests(&self) -> Vec<InvocationRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProcessInvoker for MockProcessInvoker {
        async fn invoke(
            &self,
            request: &InvocationRequest,
        ) -> Result<InvocationOutcome, InvocationError> {
            self.requests.lock().unwrap().push(request.clone());

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Output(stdout) => Ok(InvocationOutcome::Success {
                    stdout,
                    exit_code: 0,
                }),
                MockBehavior::Fail { exit_code, stderr } => Ok(InvocationOutcome::Failure {
                    exit_code: Some(exit_code),
                    stderr,
                }),
                MockBehavior::Timeout => Ok(InvocationOutcome::Timeout {
                    limit: request.timeout,
                }),
                MockBehavior::NotFound => Err(InvocationError::ExecutableNotFound {
                    program: request.program.clone(),
                }),
                MockBehavior::Respond(respond) => Ok(respond(request)),
            }
        }
    }
}
