// JtV Bridge Core - Domain Logic, Ports & Application Services
// NO process or OS dependencies (hexagonal layout: adapters live in infra crates)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{Result, RunnerError, RuntimeFailure};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
