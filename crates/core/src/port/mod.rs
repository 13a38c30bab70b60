// Port Layer - Interfaces for external dependencies

pub mod process_invoker;
pub mod time_provider;

// Re-exports
pub use process_invoker::{InvocationError, ProcessInvoker};
pub use time_provider::TimeProvider;
