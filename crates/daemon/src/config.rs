//! Daemon configuration from environment variables
//!
//! | variable | default |
//! |----------|---------|
//! | `TRIAGE_RPC_HOST` | `127.0.0.1` |
//! | `TRIAGE_RPC_PORT` | `9530` |
//! | `TRIAGE_LOG_FORMAT` | `pretty` (`json` for structured output) |
//! | `TRIAGE_SHUTDOWN_GRACE_SECS` | `5` |

use std::time::Duration;
use triage_api_rpc::RpcServerConfig;
use triage_core::error::{AppError, Result};

const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub rpc: RpcServerConfig,
    pub log_format: LogFormat,
    pub shutdown_grace: Duration,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the env)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut rpc = RpcServerConfig::default();
        if let Some(host) = lookup("TRIAGE_RPC_HOST") {
            rpc.host = host;
        }
        if let Some(port) = lookup("TRIAGE_RPC_PORT") {
            rpc.port = parse("TRIAGE_RPC_PORT", &port)?;
        }

        let log_format = match lookup("TRIAGE_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "TRIAGE_LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                    other
                )))
            }
        };

        let grace_secs = match lookup("TRIAGE_SHUTDOWN_GRACE_SECS") {
            Some(raw) => parse("TRIAGE_SHUTDOWN_GRACE_SECS", &raw)?,
            None => DEFAULT_SHUTDOWN_GRACE_SECS,
        };

        Ok(Self {
            rpc,
            log_format,
            shutdown_grace: Duration::from_secs(grace_secs),
        })
    }
}

fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} has invalid value '{}'", key, raw)))
}
