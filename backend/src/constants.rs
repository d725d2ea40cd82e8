// =============================================================================
// SocialMint Backend Constants
// =============================================================================
// Tunables shared by the server and the operator binaries.

// =============================================================================
// SERVER
// =============================================================================

/// Port the HTTP server listens on when PORT is not set
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default tracing filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "socialmint=info,tower_http=debug,server=debug";

// =============================================================================
// DATABASE
// =============================================================================

/// Connection string used when DATABASE_URL is not set
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/socialmintdb";

/// Pool size used when DB_MAX_CONNECTIONS is not set
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// OPERATOR TOOLING
// =============================================================================

/// Directory backups are written to unless --output-dir is given
pub const DEFAULT_BACKUP_DIR: &str = "./db_backups";
