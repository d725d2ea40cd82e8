use anyhow::Result;
use chrono::Utc;
use clap::{Arg, Command};
use socialmint::constants::DEFAULT_BACKUP_DIR;
use socialmint::db::{get_db_pool, DatabaseConfig, DocumentStore, PgDocumentStore};
use socialmint::models::{collection_by_name, Collection, ALL_COLLECTIONS};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    socialmint::utils::init_logging();

    let matches = Command::new("wipe-collections")
        .about("Back up and delete every document in one or all collections")
        .arg(
            Arg::new("collection")
                .long("collection")
                .short('c')
                .help("Only wipe this collection (default: all collections)"),
        )
        .arg(
            Arg::new("confirm-wipe")
                .long("confirm-wipe")
                .help("Confirm that you want to delete the documents (required for wipe)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip-backup")
                .long("skip-backup")
                .help("Do not write a JSON backup before wiping")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let collections: Vec<Collection> = match matches.get_one::<String>("collection") {
        Some(name) => vec![collection_by_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown collection '{}'", name))?],
        None => ALL_COLLECTIONS.to_vec(),
    };
    let confirm_wipe = matches.get_flag("confirm-wipe");
    let skip_backup = matches.get_flag("skip-backup");

    let db_config = DatabaseConfig::from_env()?;
    let store = PgDocumentStore::new(get_db_pool(&db_config).await?);
    info!("Connected to database");

    if !skip_backup {
        for collection in &collections {
            let file = backup_collection(&store, collection, Path::new(DEFAULT_BACKUP_DIR)).await?;
            info!("Backup created: {}", file);
        }
    }

    if !confirm_wipe {
        warn!("Wipe not confirmed. Use --confirm-wipe to delete the documents.");
        return Ok(());
    }

    for collection in &collections {
        let deleted = wipe_collection(&store, collection).await?;
        info!("Wiped {} documents from {}", deleted, collection.name);
    }

    Ok(())
}

async fn backup_collection(store: &PgDocumentStore, collection: &Collection, dir: &Path) -> Result<String> {
    fs::create_dir_all(dir)?;
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}_before_wipe_{}.json", collection.name, timestamp));

    let documents = store.find_all(collection).await?;
    fs::write(&path, serde_json::to_string_pretty(&documents)?)?;

    Ok(path.display().to_string())
}

async fn wipe_collection(store: &PgDocumentStore, collection: &Collection) -> Result<u64> {
    let count_before = store.count(collection).await?;
    info!("{} documents in {} before deletion", count_before, collection.name);

    let deleted = store.clear(collection).await?;

    let count_after = store.count(collection).await?;
    if count_after != 0 {
        error!("Warning: {} documents still remain in {}", count_after, collection.name);
    }

    Ok(deleted)
}
