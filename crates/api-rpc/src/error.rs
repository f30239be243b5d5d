//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes. Routine outcomes (empty
//! queue, unknown identity) get their own 4xxx codes so clients can tell them
//! apart from faults.

use jsonrpsee::types::ErrorObjectOwned;
use triage_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const QUEUE_EMPTY: i32 = 4004;
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Domain(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::NotFound(msg) => ErrorObjectOwned::owned(code::NOT_FOUND, msg, None::<()>),
        AppError::Empty => {
            ErrorObjectOwned::owned(code::QUEUE_EMPTY, AppError::Empty.to_string(), None::<()>)
        }
        AppError::Config(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
        AppError::Internal(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::domain::DomainError;

    #[test]
    fn test_routine_outcomes_have_distinct_codes() {
        assert_eq!(to_rpc_error(AppError::Empty).code(), code::QUEUE_EMPTY);
        assert_eq!(
            to_rpc_error(AppError::NotFound("Z".into())).code(),
            code::NOT_FOUND
        );
        assert_ne!(code::QUEUE_EMPTY, code::INTERNAL_ERROR);
    }

    #[test]
    fn test_domain_errors_are_client_errors() {
        let err = to_rpc_error(AppError::Domain(DomainError::InvalidPriorityClass(7)));
        assert_eq!(err.code(), code::VALIDATION_ERROR);
        assert!(err.message().contains('7'));
    }
}
