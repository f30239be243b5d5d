//! Triage Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    AddRequest, AddResponse, Entry, HistoryResponse, ListResponse, StatsResponse,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde::Serialize;
use std::time::Duration;

/// Triage queue client
///
/// # Example
///
/// ```no_run
/// use triage_sdk::TriageClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TriageClient::connect("http://127.0.0.1:9530").await?;
/// # Ok(())
/// # }
/// ```
pub struct TriageClient {
    client: HttpClient,
}

impl TriageClient {
    /// Connect to the triage daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9530`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Add an entry to the waiting list
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use triage_sdk::{TriageClient, AddRequest};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = TriageClient::connect("http://127.0.0.1:9530").await?;
    /// let response = client.add(AddRequest::new("Bed 4", "Chest pain", 1)).await?;
    /// println!("Arrived at {}", response.entry.arrival_timestamp);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add(&self, request: AddRequest) -> Result<AddResponse> {
        let params = object_params(&request)?;
        Ok(self.client.request("triage.add.v1", params).await?)
    }

    /// Waiting entries in dequeue order
    pub async fn list(&self) -> Result<ListResponse> {
        Ok(self.client.request("triage.list.v1", rpc_params![]).await?)
    }

    /// Entry that would be called next, left in place
    ///
    /// An empty queue is reported as an error with [`SdkError::is_empty`] set.
    pub async fn peek(&self) -> Result<Entry> {
        Ok(self.client.request("triage.peek.v1", rpc_params![]).await?)
    }

    /// Call the next entry
    ///
    /// An empty queue is reported as an error with [`SdkError::is_empty`] set.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use triage_sdk::TriageClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = TriageClient::connect("http://127.0.0.1:9530").await?;
    /// match client.take_next().await {
    ///     Ok(entry) => println!("Next: {}", entry.identity),
    ///     Err(e) if e.is_empty() => println!("Nobody waiting"),
    ///     Err(e) => return Err(e.into()),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn take_next(&self) -> Result<Entry> {
        Ok(self.client.request("triage.next.v1", rpc_params![]).await?)
    }

    /// Remove the soonest-due entry with this identity
    ///
    /// An unknown identity is reported with [`SdkError::is_not_found`] set.
    pub async fn remove(&self, identity: impl Into<String>) -> Result<Entry> {
        let mut params = ObjectParams::new();
        params.insert("identity", identity.into())?;
        Ok(self.client.request("triage.remove.v1", params).await?)
    }

    /// Served log, oldest first
    pub async fn history(&self) -> Result<HistoryResponse> {
        Ok(self.client.request("triage.history.v1", rpc_params![]).await?)
    }

    /// Queue counters and uptime
    pub async fn stats(&self) -> Result<StatsResponse> {
        Ok(self.client.request("admin.stats.v1", rpc_params![]).await?)
    }
}

/// Send a request struct as by-name params, one entry per field
fn object_params<T: Serialize>(request: &T) -> Result<ObjectParams> {
    let mut params = ObjectParams::new();
    if let serde_json::Value::Object(fields) = serde_json::to_value(request)? {
        for (name, value) in fields {
            params.insert(&name, value)?;
        }
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonrpsee::core::traits::ToRpcParams;

    #[test]
    fn test_add_request_sent_by_name() {
        let request = AddRequest::new("Bed 4", "Chest pain", 1).arrived_at("2024-01-01 09:00:00");
        let raw = object_params(&request)
            .unwrap()
            .to_rpc_params()
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(raw.get()).unwrap();

        assert_eq!(value["identity"], "Bed 4");
        assert_eq!(value["priority_class"], 1);
        assert_eq!(value["arrival_timestamp"], "2024-01-01 09:00:00");
    }

    #[test]
    fn test_absent_timestamp_is_omitted() {
        let request = AddRequest::new("Bed 4", "Chest pain", 1);
        let raw = object_params(&request)
            .unwrap()
            .to_rpc_params()
            .unwrap()
            .unwrap();

        assert!(!raw.get().contains("arrival_timestamp"));
    }

    #[test]
    fn test_connect_rejects_malformed_url() {
        let result = tokio_test::block_on(TriageClient::connect("not a url"));
        assert!(matches!(result, Err(SdkError::Connection(_))));
    }
}
