//! JSON-RPC Server
//!
//! Serves the triage methods over HTTP on a TCP address.

use crate::handler::RpcHandler;
use crate::types::{AddRequest, RemoveRequest};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use triage_core::error::AppError;
use triage_core::TriageQueue;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9530;

/// Method names (versioned wire contract)
pub mod method {
    pub const ADD: &str = "triage.add.v1";
    pub const LIST: &str = "triage.list.v1";
    pub const PEEK: &str = "triage.peek.v1";
    pub const NEXT: &str = "triage.next.v1";
    pub const REMOVE: &str = "triage.remove.v1";
    pub const HISTORY: &str = "triage.history.v1";
    pub const STATS: &str = "admin.stats.v1";
}

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    /// 0 picks an ephemeral port (see [`RpcServer::start`] for the bound address)
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: RpcHandler,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, queue: Arc<TriageQueue>) -> Self {
        Self {
            config,
            handler: RpcHandler::new(queue),
        }
    }

    /// Build the method table without binding a socket
    pub fn into_module(self) -> Result<RpcModule<RpcHandler>, AppError> {
        build_module(self.handler)
    }

    /// Bind and start serving
    ///
    /// Returns the handle used to stop the server and the address actually bound.
    pub async fn start(self) -> Result<(ServerHandle, SocketAddr), AppError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| AppError::Config(format!("Failed to bind {}: {}", addr, e)))?;
        let local_addr = server
            .local_addr()
            .map_err(|e| AppError::Internal(format!("No local address: {}", e)))?;

        let module = build_module(self.handler)?;
        let handle = server.start(module);

        info!(addr = %local_addr, "JSON-RPC server started successfully");
        Ok((handle, local_addr))
    }
}

fn build_module(handler: RpcHandler) -> Result<RpcModule<RpcHandler>, AppError> {
    let mut module = RpcModule::new(handler);

    module
        .register_method(method::ADD, |params, handler, _| {
            let req: AddRequest = params.parse()?;
            handler.add(req)
        })
        .map_err(register_error)?;

    module
        .register_method(method::LIST, |_, handler, _| handler.list())
        .map_err(register_error)?;

    module
        .register_method(method::PEEK, |_, handler, _| handler.peek())
        .map_err(register_error)?;

    module
        .register_method(method::NEXT, |_, handler, _| handler.take_next())
        .map_err(register_error)?;

    module
        .register_method(method::REMOVE, |params, handler, _| {
            let req: RemoveRequest = params.parse()?;
            handler.remove(req)
        })
        .map_err(register_error)?;

    module
        .register_method(method::HISTORY, |_, handler, _| handler.history())
        .map_err(register_error)?;

    // Admin APIs
    module
        .register_method(method::STATS, |_, handler, _| handler.stats())
        .map_err(register_error)?;

    Ok(module)
}

fn register_error(e: impl std::fmt::Display) -> AppError {
    AppError::Internal(format!("Failed to register method: {}", e))
}
