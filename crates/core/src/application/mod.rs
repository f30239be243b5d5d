// Application Layer - Use Cases and Business Logic

pub mod triage;

// Re-exports
pub use triage::{Admission, AdmitRequest, QueueStats, TriageQueue};
