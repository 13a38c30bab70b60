// Bridge constants (ADR: No magic values)
use std::time::Duration;

/// Executable name looked up on PATH when none is configured
pub const DEFAULT_EXECUTABLE: &str = "jtv";

/// Wall-clock limit applied to every invocation (5s)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Time a timed-out child gets to exit after SIGTERM before SIGKILL (250ms)
pub const GRACEFUL_TERMINATION_TIMEOUT: Duration = Duration::from_millis(250);

/// Build step shown when the JtV executable is missing
pub const BUILD_HINT: &str = "Build JtV first: cd packages/jtv-lang && cargo build --release";

/// Fibonacci argument used by the comparison scenario
pub const DEFAULT_FIBONACCI_N: u32 = 20;

/// Untrusted input fed to the injection-safety scenario
pub const DEFAULT_UNTRUSTED_INPUT: &str = "5";
