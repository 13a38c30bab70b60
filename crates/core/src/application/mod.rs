// Application Layer - Runner facade and benchmark harness

pub mod constants;
pub mod harness;
pub mod runner;

// Re-exports
pub use harness::{Harness, HarnessConfig, HarnessFailure, HarnessSummary};
pub use runner::{JtvRunner, RunnerConfig};
