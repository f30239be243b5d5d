// Port Layer - Interfaces for external dependencies

pub mod time_provider;

// Re-exports
pub use time_provider::{SteppingTimeProvider, SystemTimeProvider, TimeProvider};
