// Domain Layer - Value types exchanged between harness, facade and invoker

pub mod invocation;
pub mod result;

// Re-exports
pub use invocation::{InvocationOutcome, InvocationRequest, RunTarget};
pub use result::{BenchmarkSample, RunResult};
