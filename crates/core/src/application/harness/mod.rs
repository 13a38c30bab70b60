// Benchmark Harness - five fixed scenarios exercising the runner facade
//
// Scenarios run sequentially in `Scenario::ALL` order. A missing executable
// stops the run after the first attempt; any other error aborts the rest.

pub mod native;
pub mod report;
mod scenarios;
pub mod snippets;

pub use report::{ReportLine, Scenario, ScenarioReport, Speedup};
pub use snippets::{IntLiteral, SnippetError};

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::constants::{BUILD_HINT, DEFAULT_FIBONACCI_N, DEFAULT_UNTRUSTED_INPUT};
use crate::application::runner::JtvRunner;
use crate::error::RunnerError;

/// Scenario operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub fibonacci_n: u32,
    /// Text treated as untrusted user data by the injection-safety scenario
    pub untrusted_input: String,
    pub matrix_a: [i64; 4],
    pub matrix_b: [i64; 4],
    pub hot_path_values: Vec<i64>,
    /// (from_balance, to_balance, amount)
    pub transfer: (i64, i64, i64),
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            fibonacci_n: DEFAULT_FIBONACCI_N,
            untrusted_input: DEFAULT_UNTRUSTED_INPUT.to_string(),
            matrix_a: [1, 2, 3, 4],
            matrix_b: [5, 6, 7, 8],
            hot_path_values: vec![1, 2, 3, 4, 5],
            transfer: (1000, 500, 100),
        }
    }
}

/// Errors that end a scenario
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("Invalid scenario input: {0}")]
    InvalidInput(String),

    #[error("Unexpected JtV output: expected {expected} integer line(s), got {output:?}")]
    UnexpectedOutput { expected: usize, output: String },
}

/// Why a harness run stopped early
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HarnessFailure {
    /// JtV executable missing; no scenario can run
    MissingExecutable { executable: String, hint: String },
    /// A scenario raised; later scenarios were skipped
    Aborted { scenario: Scenario, message: String },
}

impl HarnessFailure {
    /// Actionable failure naming the JtV build step
    pub fn missing_executable(executable: impl Into<String>) -> Self {
        HarnessFailure::MissingExecutable {
            executable: executable.into(),
            hint: BUILD_HINT.to_string(),
        }
    }

    fn from_error(scenario: Scenario, err: HarnessError) -> Self {
        match err {
            HarnessError::Runner(RunnerError::ExecutableNotFound { executable }) => {
                HarnessFailure::missing_executable(executable)
            }
            other => HarnessFailure::Aborted {
                scenario,
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for HarnessFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessFailure::MissingExecutable { executable, hint } => {
                write!(f, "JtV binary '{}' not found. {}", executable, hint)
            }
            HarnessFailure::Aborted { scenario, message } => {
                write!(f, "{} failed: {}", scenario, message)
            }
        }
    }
}

/// Everything a harness run produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct HarnessSummary {
    pub reports: Vec<ScenarioReport>,
    pub failure: Option<HarnessFailure>,
}

impl HarnessSummary {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Benchmark Harness
pub struct Harness {
    runner: JtvRunner,
    config: HarnessConfig,
}

impl Harness {
    pub fn new(runner: JtvRunner, config: HarnessConfig) -> Self {
        Self { runner, config }
    }

    /// Run all scenarios in order, stopping at the first failure
    pub async fn run(&self) -> HarnessSummary {
        let mut summary = HarnessSummary::default();

        for scenario in Scenario::ALL {
            debug!(scenario = %scenario, "Running scenario");

            match self.run_scenario(scenario).await {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    let failure = HarnessFailure::from_error(scenario, e);
                    // rendered to the user by the caller; keep the log below the default filter
                    info!(scenario = %scenario, failure = %failure, "Harness stopped");
                    summary.failure = Some(failure);
                    break;
                }
            }
        }

        info!(
            completed = summary.reports.len(),
            success = summary.is_success(),
            "Harness run finished"
        );

        summary
    }

    /// Run a single scenario
    pub async fn run_scenario(&self, scenario: Scenario) -> Result<ScenarioReport, HarnessError> {
        match scenario {
            Scenario::Fibonacci => self.fibonacci_comparison().await,
            Scenario::InjectionSafety => self.injection_safety().await,
            Scenario::MatrixAddition => self.matrix_addition().await,
            Scenario::HotPath => self.hot_path().await,
            Scenario::Conservation => self.conservation().await,
        }
    }
}

/// Parse exactly `expected` integer lines from JtV output
pub(crate) fn parse_int_lines(output: &str, expected: usize) -> Result<Vec<i64>, HarnessError> {
    let unexpected = || HarnessError::UnexpectedOutput {
        expected,
        output: output.to_string(),
    };

    let values = output
        .lines()
        .map(|line| line.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| unexpected())?;

    if values.len() != expected {
        return Err(unexpected());
    }
    Ok(values)
}
