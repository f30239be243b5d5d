//! RPC Method Handlers
//!
//! One handler method per JSON-RPC method, each calling exactly one queue
//! operation.

use crate::error::to_rpc_error;
use crate::types::{
    AddRequest, AddResponse, EntryView, HistoryResponse, ListResponse, RemoveRequest,
    ServedRecordView, StatsResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use triage_core::error::AppError;
use triage_core::{AdmitRequest, TriageQueue};

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    queue: Arc<TriageQueue>,
    start_time: Instant,
}

impl RpcHandler {
    pub fn new(queue: Arc<TriageQueue>) -> Self {
        Self {
            queue,
            start_time: Instant::now(),
        }
    }

    /// triage.add.v1
    pub fn add(&self, params: AddRequest) -> Result<AddResponse, ErrorObjectOwned> {
        let req = AdmitRequest {
            identity: params.identity,
            descriptor: params.descriptor,
            priority_class: params.priority_class,
            arrival_timestamp: params.arrival_timestamp,
        };

        let admission = self.queue.admit(req).map_err(|e| {
            warn!(error = %e, "Rejected admission");
            to_rpc_error(e)
        })?;

        info!(
            identity = %admission.entry.identity(),
            priority_class = admission.entry.priority_class().as_u8(),
            arrival_substituted = admission.arrival_substituted,
            "Entry added"
        );

        Ok(AddResponse {
            entry: EntryView::from(&admission.entry),
            arrival_substituted: admission.arrival_substituted,
        })
    }

    /// triage.list.v1
    pub fn list(&self) -> Result<ListResponse, ErrorObjectOwned> {
        let entries: Vec<EntryView> = self.queue.list().iter().map(EntryView::from).collect();
        Ok(ListResponse {
            count: entries.len(),
            entries,
        })
    }

    /// triage.peek.v1
    pub fn peek(&self) -> Result<EntryView, ErrorObjectOwned> {
        self.queue
            .peek()
            .map(|entry| EntryView::from(&entry))
            .ok_or_else(|| routine(AppError::Empty))
    }

    /// triage.next.v1
    pub fn take_next(&self) -> Result<EntryView, ErrorObjectOwned> {
        let entry = self.queue.take_next().ok_or_else(|| routine(AppError::Empty))?;

        info!(
            identity = %entry.identity(),
            priority_class = entry.priority_class().as_u8(),
            "Next entry called"
        );
        Ok(EntryView::from(&entry))
    }

    /// triage.remove.v1
    pub fn remove(&self, params: RemoveRequest) -> Result<EntryView, ErrorObjectOwned> {
        let entry = self
            .queue
            .remove_by_identity(&params.identity)
            .ok_or_else(|| {
                routine(AppError::NotFound(format!(
                    "No waiting entry with identity {}",
                    params.identity
                )))
            })?;

        info!(identity = %entry.identity(), "Entry removed");
        Ok(EntryView::from(&entry))
    }

    /// triage.history.v1
    pub fn history(&self) -> Result<HistoryResponse, ErrorObjectOwned> {
        let records: Vec<ServedRecordView> =
            self.queue.history().iter().map(ServedRecordView::from).collect();
        Ok(HistoryResponse {
            count: records.len(),
            records,
        })
    }

    /// admin.stats.v1
    pub fn stats(&self) -> Result<StatsResponse, ErrorObjectOwned> {
        Ok(StatsResponse::new(
            self.queue.stats(),
            self.start_time.elapsed().as_secs(),
        ))
    }
}

/// Empty / not-found: mapped to an error code for the wire, logged as routine
fn routine(err: AppError) -> ErrorObjectOwned {
    if err.is_routine() {
        debug!(outcome = %err, "Routine outcome");
    } else {
        warn!(error = %err, "Unexpected failure");
    }
    to_rpc_error(err)
}
