// Result Record & Benchmark Sample

use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

/// Normalized success value of a JtV run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub output: String,
}

impl RunResult {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

/// One timed measurement reported by a harness scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSample {
    pub label: String,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub value: String,
}

impl BenchmarkSample {
    pub fn new(label: impl Into<String>, elapsed: Duration, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            elapsed,
            value: value.into(),
        }
    }

    /// Elapsed time in fractional milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}
