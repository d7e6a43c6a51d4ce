//! `shiplog`: export/import CLI over a JSON store file.

use clap::{Parser, Subcommand};
use sl_archive::{EntryKind, ParseMode};
use sl_model::EntityStore;
use sl_core::logging::{init_logging, LogFormat};
use sl_core::{exporter, importer, store_file, Result};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "shiplog", version, about = "Cruise-trip export/import tool")]
struct Cli {
    /// Store file holding the cruise entities.
    #[arg(long, env = "SHIPLOG_STORE", default_value = "shiplog-store.json", global = true)]
    store: PathBuf,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Log filter override (otherwise SHIPLOG_LOG, default "info").
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export all cruises as interchange JSON.
    Export {
        /// Output file.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Import a web-app archive (ZIP) or a bare interchange JSON file.
    Import {
        /// Archive or JSON file to import.
        input: PathBuf,
    },
    /// List the entries of an archive without importing it.
    Inspect {
        /// Archive to inspect.
        archive: PathBuf,
        /// Keep entries parsed before the first inconsistency instead of
        /// failing.
        #[arg(long)]
        lenient: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level.as_deref());

    if let Err(err) = run(cli) {
        error!(error = %err, "command failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Export { output } => {
            let store = store_file::load(&cli.store)?;
            exporter::export_to_file(store.cruises(), &output)?;
            let summary = serde_json::json!({
                "cruises": store.len(),
                "output": output,
            });
            println!("{summary}");
        }
        Command::Import { input } => {
            let mut store = store_file::load(&cli.store)?;
            let bytes = std::fs::read(&input)?;

            let result = if bytes.starts_with(b"PK") {
                importer::import_archive(&mut store, &bytes)?
            } else {
                importer::import_json(&mut store, &bytes)?
            };

            store_file::save(&cli.store, &store)?;
            println!("{}", serde_json::to_string(&result)?);
        }
        Command::Inspect { archive, lenient } => {
            let bytes = std::fs::read(&archive)?;
            let mode = if lenient {
                ParseMode::Lenient
            } else {
                ParseMode::Strict
            };
            let entries = sl_archive::parse_with_mode(&bytes, mode)?;

            let listing: Vec<serde_json::Value> = entries
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "path": entry.path,
                        "kind": match entry.kind {
                            EntryKind::File => "file",
                            EntryKind::Directory => "directory",
                        },
                        "bytes": entry.payload.as_ref().map(Vec::len),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }

    Ok(())
}
