// Admit Use Case

use super::TriageQueue;
use crate::domain::timestamp::parse_timestamp;
use crate::domain::{DomainError, Entry, PriorityClass};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const MAX_IDENTITY_LEN: usize = 256;
pub const MAX_DESCRIPTOR_LEN: usize = 1024;

/// Admission request as it arrives from a facade (unvalidated)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmitRequest {
    pub identity: String,
    #[serde(default)]
    pub descriptor: String,
    pub priority_class: i64,

    /// Optional caller-supplied arrival time; see [`parse_timestamp`]
    #[serde(default)]
    pub arrival_timestamp: Option<String>,
}

/// Result of an admission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub entry: Entry,

    /// True when the supplied arrival timestamp could not be parsed and the
    /// queue clock was used instead
    pub arrival_substituted: bool,
}

/// Validate the shape of an admission request
///
/// Returns the validated priority class so callers never re-convert it.
pub fn validate_request(req: &AdmitRequest) -> std::result::Result<PriorityClass, DomainError> {
    if req.identity.trim().is_empty() {
        return Err(DomainError::EmptyIdentity);
    }
    if req.identity.chars().count() > MAX_IDENTITY_LEN {
        return Err(DomainError::Validation(format!(
            "identity too long (max {} characters)",
            MAX_IDENTITY_LEN
        )));
    }
    if req.descriptor.chars().count() > MAX_DESCRIPTOR_LEN {
        return Err(DomainError::Validation(format!(
            "descriptor too long (max {} characters)",
            MAX_DESCRIPTOR_LEN
        )));
    }
    PriorityClass::try_from(req.priority_class)
}

/// Execute admit use case
///
/// Validation failures are errors. A malformed arrival timestamp is not: the
/// queue clock is substituted and the substitution is reported in the result.
pub fn execute(queue: &TriageQueue, req: AdmitRequest) -> Result<Admission> {
    let priority_class = validate_request(&req)?;

    let (arrival, arrival_substituted) = match req.arrival_timestamp.as_deref() {
        None => (None, false),
        Some(raw) if raw.trim().is_empty() => (None, false),
        Some(raw) => match parse_timestamp(raw) {
            Some(ts) => (Some(ts), false),
            None => {
                warn!(
                    identity = %req.identity,
                    arrival_timestamp = %raw,
                    "Unparseable arrival timestamp, substituting queue clock"
                );
                (None, true)
            }
        },
    };

    let entry = queue.add(req.identity, req.descriptor, priority_class, arrival);

    Ok(Admission {
        entry,
        arrival_substituted,
    })
}
