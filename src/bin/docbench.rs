//! docbench: time separate-entity vs embedded document storage in MongoDB
//!
//! Usage:
//!   # Load a file into the four entity collections
//!   docbench insert-separate customers.jsonl
//!
//!   # Read one customer's subscriptions from the embedded collection
//!   docbench query-embedded u1
//!
//!   # Run every operation for both shapes and print a summary
//!   docbench --uri mongodb://localhost:27017/ compare customers.jsonl u1
//!
//! Set `RUST_LOG=info` (or `debug`) for progress logging on stderr.

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docbench::connection::{DEFAULT_DATABASE, DEFAULT_URI};
use docbench::{Connection, ConnectionConfig, OperationReport};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "docbench")]
#[command(about = "Benchmark separate-entity vs embedded MongoDB schemas", long_about = None)]
struct Args {
    /// MongoDB connection string
    #[arg(long, default_value = DEFAULT_URI)]
    uri: String,

    /// Database holding the benchmark collections
    #[arg(long, default_value = DEFAULT_DATABASE)]
    database: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert records into customers/addresses/payments/subscriptions
    InsertSeparate {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Insert records into embedded_customers
    InsertEmbedded {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Join a customer's subscriptions across the separate collections
    QuerySeparate {
        #[arg(value_name = "MERCHANT_USER_ID")]
        merchant_user_id: String,
    },

    /// Read a customer's subscriptions from embedded_customers
    QueryEmbedded {
        #[arg(value_name = "MERCHANT_USER_ID")]
        merchant_user_id: String,
    },

    /// Upsert customers and subscriptions in the separate collections
    UpdateSeparate {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Upsert combined documents in embedded_customers
    UpdateEmbedded {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Insert, query and update with both shapes, then summarise
    Compare {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[arg(value_name = "MERCHANT_USER_ID")]
        merchant_user_id: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ConnectionConfig {
        uri: args.uri,
        database: args.database,
    };
    let conn = Connection::connect(&config)
        .with_context(|| format!("Failed to connect to {}", config.uri))?;
    println!("Connected to MongoDB");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::InsertSeparate { input } => {
            let report = docbench::insert_separate_entities(&conn, &input)
                .with_context(|| format!("Failed to insert {}", input.display()))?;
            report.write_to(&mut out)?;
        }
        Command::InsertEmbedded { input } => {
            let report = docbench::insert_embedded_model(&conn, &input)
                .with_context(|| format!("Failed to insert {}", input.display()))?;
            report.write_to(&mut out)?;
        }
        Command::QuerySeparate { merchant_user_id } => {
            let report = docbench::query_separate_entities(&conn, &merchant_user_id, &mut out)
                .context("Separate entities query failed")?;
            report.write_to(&mut out)?;
        }
        Command::QueryEmbedded { merchant_user_id } => {
            let report = docbench::query_embedded_model(&conn, &merchant_user_id, &mut out)
                .context("Embedded model query failed")?;
            report.write_to(&mut out)?;
        }
        Command::UpdateSeparate { input } => {
            let report = docbench::update_separate_entities(&conn, &input)
                .with_context(|| format!("Failed to update from {}", input.display()))?;
            report.write_to(&mut out)?;
        }
        Command::UpdateEmbedded { input } => {
            let report = docbench::update_embedded_model(&conn, &input)
                .with_context(|| format!("Failed to update from {}", input.display()))?;
            report.write_to(&mut out)?;
        }
        Command::Compare {
            input,
            merchant_user_id,
        } => compare(&conn, &input, &merchant_user_id, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

/// Run all six operations, separate shape first within each phase
fn compare<W: Write>(
    conn: &Connection,
    input: &Path,
    merchant_user_id: &str,
    out: &mut W,
) -> Result<()> {
    let mut reports: Vec<OperationReport> = Vec::with_capacity(6);

    reports.push(docbench::insert_separate_entities(conn, input).context("Separate insert failed")?);
    reports.push(docbench::insert_embedded_model(conn, input).context("Embedded insert failed")?);
    for report in &reports[0..2] {
        report.write_to(out)?;
    }

    let report = docbench::query_separate_entities(conn, merchant_user_id, out)
        .context("Separate query failed")?;
    report.write_to(out)?;
    reports.push(report);

    let report = docbench::query_embedded_model(conn, merchant_user_id, out)
        .context("Embedded query failed")?;
    report.write_to(out)?;
    reports.push(report);

    reports.push(docbench::update_separate_entities(conn, input).context("Separate update failed")?);
    reports.push(docbench::update_embedded_model(conn, input).context("Embedded update failed")?);
    for report in &reports[4..6] {
        report.write_to(out)?;
    }

    writeln!(out)?;
    writeln!(out, "{:<10} | {:>14} | {:>14}", "Operation", "Separate (s)", "Embedded (s)")?;
    writeln!(out, "{}", "-".repeat(44))?;
    for (phase, pair) in ["Write", "Read", "Update"].iter().zip(reports.chunks(2)) {
        writeln!(
            out,
            "{:<10} | {:>14.6} | {:>14.6}",
            phase,
            pair[0].elapsed.as_secs_f64(),
            pair[1].elapsed.as_secs_f64()
        )?;
    }

    Ok(())
}
