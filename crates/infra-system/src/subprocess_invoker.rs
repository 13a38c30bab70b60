// Subprocess invoker implementation
// reason: async-trait, tokio for async process management; nix for process-group signals
use async_trait::async_trait;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use jtv_bridge_core::application::constants::GRACEFUL_TERMINATION_TIMEOUT;
use jtv_bridge_core::domain::{InvocationOutcome, InvocationRequest};
use jtv_bridge_core::port::process_invoker::{InvocationError, ProcessInvoker};
use jtv_bridge_core::port::TimeProvider;

type Collected = (ExitStatus, Vec<u8>, Vec<u8>);

/// Subprocess invoker
///
/// Runs the JtV executable as a child process with piped stdio. The child
/// handle never outlives `invoke`: a timed-out child is terminated and reaped
/// before returning, and `kill_on_drop` covers a dropped future.
pub struct SubprocessInvoker {
    time_provider: Arc<dyn TimeProvider>,
    grace_period: Duration,
}

impl SubprocessInvoker {
    /// Create a new subprocess invoker
    ///
    /// # Arguments
    /// * `time_provider` - Time provider for duration tracking
    ///
    /// # Example
    /// ```ignore
    /// let invoker = SubprocessInvoker::new(Arc::new(SystemTimeProvider));
    /// let runner = JtvRunner::new(Arc::new(invoker), RunnerConfig::default());
    /// ```
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            time_provider,
            grace_period: GRACEFUL_TERMINATION_TIMEOUT,
        }
    }

    /// Time a timed-out child gets between SIGTERM and SIGKILL
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Expand a leading `~`; bare names are left for PATH lookup
    fn resolve_program(program: &str) -> String {
        shellexpand::tilde(program).into_owned()
    }

    /// Spawn the child in its own process group with piped stdio
    fn spawn(&self, program: &str, request: &InvocationRequest) -> Result<Child, InvocationError> {
        let stdin = if request.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };

        let mut command = Command::new(program);
        command
            .args(&request.args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        {
            command.process_group(0);
        }

        command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InvocationError::ExecutableNotFound {
                program: request.program.clone(),
            },
            _ => InvocationError::SpawnFailed(e.to_string()),
        })
    }

    /// Feed stdin, drain stdout/stderr and wait for exit, all concurrently
    async fn collect(child: &mut Child, input: Option<&str>) -> io::Result<Collected> {
        let stdin_pipe = child.stdin.take();
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let write_input = async move {
            if let (Some(mut pipe), Some(input)) = (stdin_pipe, input) {
                match pipe.write_all(input.as_bytes()).await {
                    // Child exited without reading its program; the exit status decides
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                    other => other?,
                }
                // dropping the pipe closes it (EOF for the child)
            }
            Ok::<(), io::Error>(())
        };

        let (written, stdout, stderr, status) = tokio::join!(
            write_input,
            read_all(stdout_pipe),
            read_all(stderr_pipe),
            child.wait()
        );

        written?;
        Ok((status?, stdout?, stderr?))
    }

    /// SIGTERM the process group, escalate to SIGKILL after the grace period, then reap
    ///
    /// `pgid` is the leader pid captured at spawn. The leader may already be
    /// reaped (and `child.id()` gone) while descendants still hold the pipes;
    /// the group outlives its leader, so it is signalled regardless.
    async fn terminate(&self, child: &mut Child, pgid: Option<u32>) {
        #[cfg(unix)]
        {
            use nix::sys::signal::{killpg, Signal};
            use nix::unistd::Pid;

            if let Some(pid) = pgid {
                let group = Pid::from_raw(pid as i32);

                info!(pgid = %pid, "Sending SIGTERM to JtV process group");
                if let Err(e) = killpg(group, Signal::SIGTERM) {
                    debug!(pgid = %pid, error = %e, "SIGTERM to process group failed");
                }

                if timeout(self.grace_period, child.wait()).await.is_err() {
                    warn!(pgid = %pid, "Process did not exit after SIGTERM, sending SIGKILL");
                }

                // sweep the group even when the leader is gone
                if let Err(e) = killpg(group, Signal::SIGKILL) {
                    debug!(pgid = %pid, error = %e, "Process group already empty");
                }
            }
        }
        #[cfg(not(unix))]
        let _ = pgid;

        if let Err(e) = child.start_kill() {
            debug!(error = %e, "start_kill on finished child");
        }
        if let Err(e) = child.wait().await {
            warn!(error = %e, "Failed to reap terminated child");
        }
    }
}

async fn read_all<R: AsyncRead + Unpin>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

#[async_trait]
impl ProcessInvoker for SubprocessInvoker {
    async fn invoke(
        &self,
        request: &InvocationRequest,
    ) -> Result<InvocationOutcome, InvocationError> {
        let program = Self::resolve_program(&request.program);
        let start_time = self.time_provider.now_millis();

        info!(
            program = %program,
            args = ?request.args,
            stdin_bytes = request.stdin.as_ref().map_or(0, |s| s.len()),
            timeout_ms = %request.timeout.as_millis(),
            "Starting JtV invocation"
        );

        let mut child = self.spawn(&program, request)?;
        // `child.id()` is None once the leader is reaped; keep the group id
        let pgid = child.id();

        let collected = timeout(
            request.timeout,
            Self::collect(&mut child, request.stdin.as_deref()),
        )
        .await;

        let outcome = match collected {
            Ok(Ok((status, stdout, stderr))) => {
                InvocationOutcome::from_exit(status.code(), &stdout, &stderr)
            }
            Ok(Err(e)) => {
                self.terminate(&mut child, pgid).await;
                return Err(InvocationError::IoError(e.to_string()));
            }
            Err(_) => {
                warn!(
                    program = %program,
                    timeout_ms = %request.timeout.as_millis(),
                    "JtV invocation timed out, terminating"
                );
                self.terminate(&mut child, pgid).await;
                InvocationOutcome::Timeout {
                    limit: request.timeout,
                }
            }
        };

        let duration_ms = self.time_provider.now_millis() - start_time;

        info!(
            program = %program,
            duration_ms = %duration_ms,
            exit_code = ?outcome.exit_code(),
            success = outcome.is_success(),
            "JtV invocation completed"
        );

        Ok(outcome)
    }
}
