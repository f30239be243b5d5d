//! Triage CLI - Command-line interface for the triage queue daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9530";

const NOT_FOUND: i32 = 4001;
const QUEUE_EMPTY: i32 = 4004;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Triage Queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "TRIAGE_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a patient to the waiting list
    Add {
        /// Patient identity (used later by `remove`)
        identity: String,

        /// Reported condition (e.g., "Chest pain", "Fever")
        #[arg(short, long, default_value = "")]
        condition: String,

        /// Severity: 1 = Critical, 2 = Serious, 3 = Stable
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..=3))]
        severity: i64,

        /// Arrival time (YYYY-MM-DD HH:MM:SS, UTC); defaults to now
        #[arg(long)]
        arrived_at: Option<String>,
    },

    /// Show the waiting list in call order
    Queue,

    /// Show who would be called next without calling them
    Peek,

    /// Call the next patient
    Next,

    /// Remove a waiting patient by identity
    Remove {
        /// Patient identity
        identity: String,
    },

    /// Show everyone who has left the waiting list
    History,

    /// Show queue status
    Status,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct EntryRow {
    identity: String,
    #[tabled(rename = "condition")]
    descriptor: String,
    #[tabled(rename = "severity")]
    severity_label: String,
    #[tabled(rename = "arrived (UTC)")]
    arrival_timestamp: String,
}

#[derive(Tabled)]
struct QueueRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(inline)]
    entry: EntryRow,
}

#[derive(Deserialize, Tabled)]
struct HistoryRow {
    identity: String,
    #[tabled(rename = "condition")]
    descriptor: String,
    #[tabled(rename = "severity")]
    severity_label: String,
    departure: String,
    #[tabled(rename = "served (UTC)")]
    served_at: String,
}

/// Send one request; transport failures are errors, RPC errors are returned
async fn call_rpc_raw(
    url: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<std::result::Result<serde_json::Value, JsonRpcError>> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        return Ok(Err(error));
    }

    response
        .result
        .map(Ok)
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    match call_rpc_raw(url, method, params).await? {
        Ok(result) => Ok(result),
        Err(error) => anyhow::bail!("RPC error ({}): {}", error.code, error.message),
    }
}

fn print_entry(headline: &str, result: serde_json::Value) -> Result<()> {
    let entry: EntryRow = serde_json::from_value(result)?;
    println!("{}", headline.green().bold());
    println!();
    println!("{}", Table::new(vec![entry]));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Add {
            identity,
            condition,
            severity,
            arrived_at,
        } => {
            let mut params = json!({
                "identity": identity,
                "descriptor": condition,
                "priority_class": severity,
            });
            if let Some(arrived_at) = arrived_at {
                params["arrival_timestamp"] = json!(arrived_at);
            }

            let result = call_rpc(&cli.rpc_url, "triage.add.v1", params).await?;

            if result["arrival_substituted"].as_bool().unwrap_or(false) {
                println!(
                    "{}",
                    "⚠ Arrival time not understood; the daemon clock was used instead".yellow()
                );
            }
            print_entry("✓ Patient added to queue", result["entry"].clone())?;
        }

        Commands::Queue => {
            let result = call_rpc(&cli.rpc_url, "triage.list.v1", json!({})).await?;
            let entries: Vec<EntryRow> = serde_json::from_value(result["entries"].clone())?;

            if entries.is_empty() {
                println!("{}", "Queue is currently empty".yellow());
            } else {
                println!("{}", "Current Triage Queue".cyan().bold());
                println!();
                let rows: Vec<QueueRow> = entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| QueueRow {
                        position: i + 1,
                        entry,
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }

        Commands::Peek => match call_rpc_raw(&cli.rpc_url, "triage.peek.v1", json!({})).await? {
            Ok(result) => print_entry("Next up", result)?,
            Err(error) if error.code == QUEUE_EMPTY => {
                println!("{}", "No patients in the queue".yellow())
            }
            Err(error) => anyhow::bail!("RPC error ({}): {}", error.code, error.message),
        },

        Commands::Next => match call_rpc_raw(&cli.rpc_url, "triage.next.v1", json!({})).await? {
            Ok(result) => print_entry("📣 Next patient", result)?,
            Err(error) if error.code == QUEUE_EMPTY => {
                println!("{}", "No patients in the queue".yellow())
            }
            Err(error) => anyhow::bail!("RPC error ({}): {}", error.code, error.message),
        },

        Commands::Remove { identity } => {
            let params = json!({ "identity": identity });
            match call_rpc_raw(&cli.rpc_url, "triage.remove.v1", params).await? {
                Ok(result) => print_entry(&format!("✓ {} removed", identity), result)?,
                Err(error) if error.code == NOT_FOUND => {
                    println!("{}", format!("No waiting patient named {}", identity).yellow())
                }
                Err(error) => anyhow::bail!("RPC error ({}): {}", error.code, error.message),
            }
        }

        Commands::History => {
            let result = call_rpc(&cli.rpc_url, "triage.history.v1", json!({})).await?;
            let records: Vec<HistoryRow> = serde_json::from_value(result["records"].clone())?;

            if records.is_empty() {
                println!("{}", "No patient history yet".yellow());
            } else {
                println!("{}", "Patient History".cyan().bold());
                println!();
                println!("{}", Table::new(records));
            }
        }

        Commands::Status => {
            println!("{}", "Queue Status".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "admin.stats.v1", json!({})).await {
                Ok(stats) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!();
                    println!("  {} {}", "Waiting:".bold(), stats["waiting"]);
                    println!("    {} {}", "Critical:".red(), stats["waiting_critical"]);
                    println!("    {} {}", "Serious:".yellow(), stats["waiting_serious"]);
                    println!("    {} {}", "Stable:".green(), stats["waiting_stable"]);
                    println!("  {} {}", "Served:".bold(), stats["served"]);
                    println!("  {} {}", "Admitted:".bold(), stats["admitted"]);
                    println!();
                    println!("  {} {} seconds", "Uptime:".bold(), stats["uptime_seconds"]);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
