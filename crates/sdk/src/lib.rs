//! Triage SDK - Rust Client Library
//!
//! Provides a typed client for the triage queue daemon.
//!
//! # Example
//!
//! ```no_run
//! use triage_sdk::{AddRequest, TriageClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TriageClient::connect("http://127.0.0.1:9530").await?;
//!
//!     client.add(AddRequest::new("Bed 4", "Chest pain", 1)).await?;
//!     let next = client.take_next().await?;
//!
//!     println!("Now serving: {} ({})", next.identity, next.severity_label);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::TriageClient;
pub use error::{code, Result, SdkError};
pub use types::{
    AddRequest, AddResponse, Entry, HistoryResponse, ListResponse, ServedRecord, StatsResponse,
};
