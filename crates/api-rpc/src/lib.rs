//! JSON-RPC API Layer
//!
//! Request/response facade over a shared [`triage_core::TriageQueue`].
//! Owns no queue state: every method deserializes, calls one queue operation,
//! and serializes the result.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
