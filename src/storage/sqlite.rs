//! SQLite-backed durable store.

use std::{
    future::Future,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::config::DurableBackend;

use super::{KeyValueStore, MemoryStore, StorageError};

/// Get the database path in the user's data directory
pub fn default_db_path() -> Result<PathBuf> {
    db_path_in(dirs::data_dir())
}

fn db_path_in(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    let mut path = data_dir.context("Failed to determine data directory")?;

    path.push("quiz-master");

    std::fs::create_dir_all(&path).context("Failed to create quiz-master data directory")?;

    path.push("quiz.db");
    Ok(path)
}

/// Open the durable store, falling back to memory when the database
/// cannot be located or opened.
pub async fn open_durable_store(backend: &DurableBackend) -> Box<dyn KeyValueStore> {
    let path = match backend {
        DurableBackend::Memory => {
            info!("Durable storage disabled, scores will not be kept");
            return Box::new(MemoryStore::new());
        }
        DurableBackend::Sqlite(Some(path)) => Ok(path.clone()),
        DurableBackend::Sqlite(None) => default_db_path(),
    };

    open_or_fallback(path).await
}

async fn open_or_fallback(path: Result<PathBuf>) -> Box<dyn KeyValueStore> {
    let opened = match path {
        Ok(path) => create_pool(&path)
            .await
            .and_then(SqliteStore::new)
            .map(|store| (path, store)),
        Err(e) => Err(e),
    };

    match opened {
        Ok((path, store)) => {
            info!("Using database at {}", path.display());
            Box::new(store)
        }
        Err(e) => {
            warn!("Falling back to in-memory storage: {:#}", e);
            Box::new(MemoryStore::new())
        }
    }
}

/// Open (creating if needed) the database file and run migrations.
pub async fn create_pool(db_path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Single-connection in-memory database, gone when the pool drops.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("Failed to open in-memory database")?;

    migrate(&pool).await?;
    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

pub async fn set_value(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    let updated_at = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO kv_store (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE
        SET value = excluded.value, updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_value(pool: &SqlitePool, key: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM kv_store WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(())
}

/// Synchronous [`KeyValueStore`] view over a pool.
///
/// Must be used from a multi-threaded tokio runtime (or outside any
/// runtime); the async queries are driven with `block_in_place`.
pub struct SqliteStore {
    pool: SqlitePool,
    handle: Handle,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Result<Self> {
        let handle = Handle::try_current().context("SQLite store needs a tokio runtime")?;
        Ok(Self { pool, handle })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn block_on<F, T>(&self, future: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::task::block_in_place(|| self.handle.block_on(future)).map_err(StorageError::from)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.block_on(get_value(&self.pool, key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.block_on(set_value(&self.pool, key, value))
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.block_on(delete_value(&self.pool, key))
    }
}
