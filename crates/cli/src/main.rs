//! JtV Bridge CLI - run JtV programs as a subordinate process and benchmark them

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jtv_bridge_core::application::constants::{
    DEFAULT_EXECUTABLE, DEFAULT_FIBONACCI_N, DEFAULT_TIMEOUT, DEFAULT_UNTRUSTED_INPUT,
};
use jtv_bridge_core::application::{
    Harness, HarnessConfig, HarnessFailure, HarnessSummary, JtvRunner, RunnerConfig,
};
use jtv_bridge_core::domain::RunResult;
use jtv_bridge_core::port::time_provider::SystemTimeProvider;
use jtv_bridge_core::RunnerError;
use jtv_bridge_infra_system::SubprocessInvoker;

const DEFAULT_LOG_FILTER: &str = "jtv_bridge=warn";

/// Exit code when a run or scenario raises
const EXIT_FAILURE: u8 = 1;
/// Exit code when the JtV executable cannot be located
const EXIT_MISSING_EXECUTABLE: u8 = 2;

#[derive(Parser)]
#[command(name = "jtv-bridge")]
#[command(about = "Run JtV programs from the host and benchmark them", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JtV executable (name on PATH or path, `~` is expanded)
    #[arg(long, global = true, env = "JTV_BINARY", default_value = DEFAULT_EXECUTABLE)]
    jtv_binary: String,

    /// Per-invocation timeout in milliseconds
    #[arg(long, global = true, env = "JTV_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT.as_millis() as u64)]
    timeout_ms: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Run inline JtV source
    RunCode {
        /// Source text (read from stdin when omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Run a JtV program file
    RunFile {
        /// Path to the program
        path: PathBuf,
    },

    /// Run the benchmark and safety scenarios
    Bench {
        /// Fibonacci argument for the comparison scenario
        #[arg(long, default_value_t = DEFAULT_FIBONACCI_N)]
        fib_n: u32,

        /// Untrusted value for the injection-safety scenario
        #[arg(long, default_value = DEFAULT_UNTRUSTED_INPUT)]
        untrusted_input: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            render::error(&format!("{:#}", e));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Logs go to stderr; stdout is the results stream
fn init_logging() {
    let log_format = std::env::var("JTV_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = RunnerConfig::new(cli.jtv_binary)
        .with_timeout(Duration::from_millis(cli.timeout_ms));

    let invoker = Arc::new(SubprocessInvoker::new(Arc::new(SystemTimeProvider)));
    let runner = JtvRunner::new(invoker, config);

    info!(
        executable = %runner.config().executable,
        timeout_ms = %runner.config().timeout.as_millis(),
        "JtV bridge starting"
    );

    match cli.command {
        Commands::RunCode { code } => {
            let source = match code {
                Some(code) => code,
                None => read_stdin().await?,
            };
            finish_run(runner.run_code(&source).await)
        }

        Commands::RunFile { path } => finish_run(runner.run_file(&path).await),

        Commands::Bench {
            fib_n,
            untrusted_input,
            json,
        } => {
            let harness = Harness::new(
                runner,
                HarnessConfig {
                    fibonacci_n: fib_n,
                    untrusted_input,
                    ..Default::default()
                },
            );

            let summary = harness.run().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                render::summary(&summary);
            }

            Ok(exit_code(&summary))
        }
    }
}

async fn read_stdin() -> Result<String> {
    let mut source = String::new();
    tokio::io::stdin()
        .read_to_string(&mut source)
        .await
        .context("Failed to read JtV source from stdin")?;
    Ok(source)
}

/// Print a single run result; a missing executable gets its own exit code
fn finish_run(result: jtv_bridge_core::Result<RunResult>) -> Result<ExitCode> {
    match result {
        Ok(result) => {
            println!("{}", result.output);
            Ok(ExitCode::SUCCESS)
        }
        Err(RunnerError::ExecutableNotFound { executable }) => {
            render::failure(&HarnessFailure::missing_executable(executable));
            Ok(ExitCode::from(EXIT_MISSING_EXECUTABLE))
        }
        Err(e) => Err(e.into()),
    }
}

fn exit_code(summary: &HarnessSummary) -> ExitCode {
    ExitCode::from(exit_status(summary))
}

fn exit_status(summary: &HarnessSummary) -> u8 {
    match summary.failure {
        None => 0,
        Some(HarnessFailure::MissingExecutable { .. }) => EXIT_MISSING_EXECUTABLE,
        Some(HarnessFailure::Aborted { .. }) => EXIT_FAILURE,
    }
}
