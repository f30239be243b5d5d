// Triage Core - Queue Logic & Ports
// NO transport dependencies: facades call in, nothing calls out

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{Admission, AdmitRequest, QueueStats, TriageQueue};
pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
