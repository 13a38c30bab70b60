// Scenario reports and speedup computation

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::domain::BenchmarkSample;

/// The five harness scenarios, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Fibonacci,
    InjectionSafety,
    MatrixAddition,
    HotPath,
    Conservation,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Fibonacci,
        Scenario::InjectionSafety,
        Scenario::MatrixAddition,
        Scenario::HotPath,
        Scenario::Conservation,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Scenario::Fibonacci => "Fibonacci Comparison",
            Scenario::InjectionSafety => "Secure Calculation",
            Scenario::MatrixAddition => "Matrix Operations",
            Scenario::HotPath => "Hot Path Extraction",
            Scenario::Conservation => "Smart Contract Simulation",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One line of scenario narrative
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ReportLine {
    /// Observed value (input, output, timing)
    Fact(String),
    /// Guarantee attributed to the JtV grammar; not verified by the host
    Claim(String),
    /// Something the reader should look at (mismatch, rejected input)
    Warning(String),
}

impl ReportLine {
    pub fn text(&self) -> &str {
        match self {
            ReportLine::Fact(text) | ReportLine::Claim(text) | ReportLine::Warning(text) => text,
        }
    }
}

/// Output of one completed scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub title: String,
    pub lines: Vec<ReportLine>,
    /// Values reported by JtV, in print order
    pub values: Vec<String>,
    pub samples: Vec<BenchmarkSample>,
    /// Host time over JtV time, for scenarios that compare the two
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speedup: Option<Speedup>,
}

impl ScenarioReport {
    pub fn new(scenario: Scenario, title: impl Into<String>) -> Self {
        Self {
            scenario,
            title: title.into(),
            lines: Vec::new(),
            values: Vec::new(),
            samples: Vec::new(),
            speedup: None,
        }
    }

    pub fn fact(mut self, text: impl Into<String>) -> Self {
        self.lines.push(ReportLine::Fact(text.into()));
        self
    }

    pub fn claim(mut self, text: impl Into<String>) -> Self {
        self.lines.push(ReportLine::Claim(text.into()));
        self
    }

    pub fn warning(mut self, text: impl Into<String>) -> Self {
        self.lines.push(ReportLine::Warning(text.into()));
        self
    }

    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.values.extend(values.into_iter().map(|v| v.to_string()));
        self
    }

    pub fn sample(mut self, sample: BenchmarkSample) -> Self {
        self.samples.push(sample);
        self
    }

    pub fn speedup(mut self, speedup: Speedup) -> Self {
        self.speedup = Some(speedup);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.lines
            .iter()
            .any(|line| matches!(line, ReportLine::Warning(_)))
    }
}

/// Ratio of host elapsed time to JtV elapsed time
///
/// `None` when the JtV measurement is zero (clock resolution) or the ratio is
/// not finite; displayed as "N/A".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Speedup(Option<f64>);

impl Speedup {
    pub fn compute(host: Duration, runtime: Duration) -> Self {
        if runtime.is_zero() {
            return Speedup(None);
        }
        let ratio = host.as_secs_f64() / runtime.as_secs_f64();
        Speedup(Some(ratio).filter(|r| r.is_finite() && *r >= 0.0))
    }
}

impl fmt::Display for Speedup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ratio) => write!(f, "{:.2}x", ratio),
            None => f.write_str("N/A"),
        }
    }
}
