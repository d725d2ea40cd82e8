use anyhow::Result;
use chrono::Utc;
use clap::{Arg, Command};
use socialmint::constants::DEFAULT_BACKUP_DIR;
use socialmint::db::{get_db_pool, DatabaseConfig, DocumentStore, PgDocumentStore};
use socialmint::models::{collection_by_name, Collection, ALL_COLLECTIONS};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    socialmint::utils::init_logging();

    let matches = Command::new("backup-db")
        .about("Export document collections to JSON files")
        .arg(
            Arg::new("collection")
                .long("collection")
                .short('c')
                .help("Only export this collection (e.g. users, likes)"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .help("Output directory for backup files")
                .default_value(DEFAULT_BACKUP_DIR),
        )
        .get_matches();

    let collections = select_collections(matches.get_one::<String>("collection"))?;
    let output_dir = matches
        .get_one::<String>("output-dir")
        .map(String::as_str)
        .unwrap_or(DEFAULT_BACKUP_DIR);

    let db_config = DatabaseConfig::from_env()?;
    let store = PgDocumentStore::new(get_db_pool(&db_config).await?);
    info!("Connected to database");

    let written = export_collections(&store, &collections, Path::new(output_dir)).await?;
    for file in &written {
        info!("Wrote {}", file.display());
    }
    info!("Database backup complete ({} files)", written.len());

    Ok(())
}

fn select_collections(name: Option<&String>) -> Result<Vec<Collection>> {
    match name {
        Some(name) => collection_by_name(name)
            .map(|c| vec![c])
            .ok_or_else(|| anyhow::anyhow!("Unknown collection '{}'", name)),
        None => Ok(ALL_COLLECTIONS.to_vec()),
    }
}

/// Write one `<collection>_<timestamp>.json` array per collection
async fn export_collections(
    store: &PgDocumentStore,
    collections: &[Collection],
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");

    let mut written = Vec::new();
    for collection in collections {
        let documents = store.find_all(collection).await?;
        info!("Found {} {} documents to back up", documents.len(), collection.name);

        let path = output_dir.join(format!("{}_{}.json", collection.name, timestamp));
        fs::write(&path, serde_json::to_string_pretty(&documents)?)?;
        written.push(path);
    }

    Ok(written)
}
