//! Shared fixtures: a stand-in `jtv` executable written once per test binary

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use jtv_bridge_core::application::{JtvRunner, RunnerConfig};
use jtv_bridge_core::port::time_provider::SystemTimeProvider;
use jtv_bridge_infra_system::SubprocessInvoker;

/// Understands the `run -` / `run <path>` contract and a few directives:
/// - `@sleep <pidfile>`: records its pid, then sleeps (same pid via exec)
/// - `@fail`: parse error on stderr, exit 2
/// - the five harness programs: their expected output
/// - otherwise prints each `print(<int>)` argument
const FAKE_JTV: &str = r#"#!/bin/sh
if [ "$1" != "run" ] || [ $# -ne 2 ]; then
    echo "usage: jtv run <file|->" >&2
    exit 64
fi
if [ "$2" = "-" ]; then
    src=$(cat)
else
    src=$(cat "$2") || exit 66
fi
case "$src" in
    *"@sleep "*)
        pidfile=$(printf '%s\n' "$src" | sed -n 's/^@sleep //p')
        echo $$ > "$pidfile"
        exec sleep 30
        ;;
    *"@fail"*)
        echo "parse error: unexpected token '@fail'" >&2
        exit 2
        ;;
    *"result = fibonacci(20)"*) echo 6765 ;;
    *"user_value = 5"*) echo 15 ;;
    *"matrix_add(1, 2, 3, 4, 5, 6, 7, 8)"*) printf '6\n8\n10\n12\n' ;;
    *"calculate_score(values)"*) echo 55 ;;
    *"transfer(1000, 500, 100)"*) printf '900\n600\n' ;;
    *)
        printf '%s\n' "$src" | sed -n 's/^[[:space:]]*print(\(-*[0-9]*\))[[:space:]]*$/\1/p'
        ;;
esac
"#;

static FAKE_JTV_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Directory unique to this test binary
pub fn scratch_dir() -> &'static Path {
    fake_jtv().parent().expect("fake jtv lives in a directory")
}

/// Path of the fake executable, written on first use
pub fn fake_jtv() -> &'static Path {
    FAKE_JTV_PATH.get_or_init(|| {
        let dir = std::env::temp_dir().join(format!("jtv-bridge-it-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("jtv");
        std::fs::write(&path, FAKE_JTV).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    })
}

pub fn invoker() -> Arc<SubprocessInvoker> {
    Arc::new(SubprocessInvoker::new(Arc::new(SystemTimeProvider)))
}

pub fn runner_with_timeout(timeout: Duration) -> JtvRunner {
    let config = RunnerConfig::new(fake_jtv().to_string_lossy()).with_timeout(timeout);
    JtvRunner::new(invoker(), config)
}

pub fn runner() -> JtvRunner {
    runner_with_timeout(Duration::from_secs(5))
}
