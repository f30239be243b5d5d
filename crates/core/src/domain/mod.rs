// Domain Layer - Pure queue entities and ordering

pub mod entry;
pub mod error;
pub mod priority;
pub mod served_log;
pub mod timestamp;
pub mod waiting_set;

// Re-exports
pub use entry::{Entry, Identity, OrderKey, Sequence};
pub use error::DomainError;
pub use priority::PriorityClass;
pub use served_log::{Departure, ServedLog, ServedRecord};
pub use waiting_set::WaitingSet;
