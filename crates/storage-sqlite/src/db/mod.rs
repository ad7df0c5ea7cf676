//! Connection management and schema bootstrap.
//!
//! There is no pool: every unit of work opens its own connection through
//! [`Database`] and closes it when the connection is dropped.

use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::errors::StorageError;
use ledger_core::errors::Result;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbConnection = SqliteConnection;

const CONNECTION_PRAGMAS: &str = "
    PRAGMA busy_timeout = 30000;
    PRAGMA synchronous = NORMAL;
";

/// Columns missing from older on-disk layouts, with the statement that adds each.
const LEGACY_COLUMNS: [(&str, &str); 1] = [(
    "operation",
    "ALTER TABLE transactions ADD COLUMN operation TEXT NOT NULL DEFAULT 'BUY';",
)];

/// Prepares the database file: creates the parent directory and enables WAL.
pub fn init(db_path: &str) -> Result<String> {
    if let Some(db_dir) = Path::new(db_path).parent() {
        if !db_dir.as_os_str().is_empty() && !db_dir.exists() {
            fs::create_dir_all(db_dir)?;
        }
    }

    let mut conn = SqliteConnection::establish(db_path).map_err(StorageError::from)?;
    conn.batch_execute("PRAGMA journal_mode = WAL;")
        .map_err(StorageError::from)?;

    Ok(db_path.to_string())
}

/// Connection provider for the ledger database.
///
/// The schema is ensured on the first successful connection; later
/// connections skip the check.
#[derive(Debug)]
pub struct Database {
    db_path: String,
    schema_ready: AtomicBool,
}

impl Database {
    pub fn new(db_path: impl Into<String>) -> Self {
        Database {
            db_path: db_path.into(),
            schema_ready: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Opens a fresh connection with the schema in place.
    pub fn get_connection(&self) -> Result<DbConnection> {
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(StorageError::from)?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .map_err(StorageError::from)?;

        if !self.schema_ready.load(Ordering::Acquire) {
            ensure_schema(&mut conn);
            self.schema_ready.store(true, Ordering::Release);
        }

        Ok(conn)
    }

    /// Runs `job` on a connection that is closed as soon as the job returns,
    /// whether it succeeded or not.
    pub fn with_connection<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut DbConnection) -> Result<T>,
    {
        let mut conn = self.get_connection()?;
        job(&mut conn)
    }
}

/// Creates the transactions table if needed and upgrades older layouts.
///
/// Idempotent and never fatal. Failures are logged and otherwise ignored; an
/// unusable schema then surfaces on the first statement that touches it.
pub fn ensure_schema(conn: &mut DbConnection) {
    if let Err(e) = run_migrations(conn) {
        warn!("Continuing without schema migrations: {}", e);
    }
    upgrade_legacy_columns(conn);
}

pub fn run_migrations(conn: &mut DbConnection) -> Result<()> {
    debug!("Running database migrations");

    let result = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Database migration failed: {}", e);
        StorageError::MigrationFailed(e.to_string())
    })?;

    if result.is_empty() {
        debug!("No pending migrations to apply.");
    } else {
        info!("Applied the following migrations:");
        for migration_version in &result {
            info!("  - {}", migration_version);
        }
    }

    Ok(())
}

#[derive(QueryableByName)]
struct TableColumn {
    #[diesel(sql_type = Text)]
    name: String,
}

fn upgrade_legacy_columns(conn: &mut DbConnection) {
    let columns: HashSet<String> = match diesel::sql_query("PRAGMA table_info(transactions)")
        .load::<TableColumn>(conn)
    {
        Ok(rows) => rows.into_iter().map(|c| c.name).collect(),
        Err(e) => {
            error!("Failed to inspect transactions table: {}", e);
            return;
        }
    };

    for (column, statement) in LEGACY_COLUMNS {
        if columns.contains(column) {
            continue;
        }
        info!("Adding missing column '{}' to transactions table", column);
        if let Err(e) = conn.batch_execute(statement) {
            warn!(
                "Could not add column '{}' to transactions table, the database may be incompatible: {}",
                column, e
            );
        }
    }
}
