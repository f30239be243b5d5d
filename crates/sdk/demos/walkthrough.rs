//! SDK Walkthrough
//!
//! Admits a few entries, calls them in priority order and prints the history.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package triage-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package triage-sdk --example walkthrough
//!    ```

use triage_sdk::{AddRequest, TriageClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Triage SDK - Walkthrough");
    println!("========================\n");

    println!("1. Connecting to daemon...");
    let client = TriageClient::connect("http://127.0.0.1:9530").await?;
    println!("   ✓ Connected\n");

    println!("2. Adding entries...");
    for (identity, condition, class) in [
        ("Ana", "Fever", 3),
        ("Ben", "Chest pain", 1),
        ("Caro", "Fracture", 2),
    ] {
        let added = client.add(AddRequest::new(identity, condition, class)).await?;
        println!(
            "   ✓ {} - {} ({}) at {}",
            added.entry.identity,
            added.entry.descriptor,
            added.entry.severity_label,
            added.entry.arrival_timestamp
        );
    }
    println!();

    println!("3. Waiting list:");
    for (i, entry) in client.list().await?.entries.iter().enumerate() {
        println!("   {}. {} - {}", i + 1, entry.identity, entry.severity_label);
    }
    println!();

    println!("4. Calling everyone...");
    loop {
        match client.take_next().await {
            Ok(entry) => println!("   → {} ({})", entry.identity, entry.descriptor),
            Err(e) if e.is_empty() => break,
            Err(e) => return Err(e.into()),
        }
    }
    println!();

    println!("5. History:");
    for record in client.history().await?.records {
        println!(
            "   ✓ {} [{}] served at {}",
            record.entry.identity, record.departure, record.served_at
        );
    }

    Ok(())
}
