use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotwise_cli::config::AppConfig;
use slotwise_store::{BlobSlotStore, FileBlobStore};
use tracing::info;

/// Rewrite the stored slot collection in the current format.
#[derive(Debug, Parser)]
#[command(name = "slotwise-migrate", version, about)]
struct Args {
    /// Directory holding the slot store (overrides SLOTWISE_STORE_DIR)
    #[arg(long, value_name = "DIR")]
    store_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let args = Args::parse();
    let config = AppConfig::from_env()?.with_store_dir(args.store_dir);
    slotwise_cli::init_tracing(&config)?;

    info!("Opening slot store at {}", config.store_dir.display());
    let mut store = BlobSlotStore::new(FileBlobStore::open(&config.store_dir)?);

    let report = store.migrate()?;
    if report.rewritten {
        println!(
            "Migrated {:?} data: {} slots in {} batches, {} malformed records dropped.",
            report.shape, report.slots, report.batches, report.skipped
        );
    } else {
        println!("Slot store already up to date ({} slots).", report.slots);
    }

    Ok(())
}
