use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use sqlx::error::ErrorKind;
use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow,
    SqliteSynchronous,
};
use sqlx::{Pool, Sqlite};

use crate::application::ports::store_error::StoreError;

pub type SqlitePool = Pool<Sqlite>;
pub type Statement<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

const READER_CONNECTIONS: u32 = 8;

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub rows_affected: u64,
    /// Rowid assigned by the last insert on the writer connection.
    pub last_insert_id: i64,
}

/// File-backed SQLite store.
///
/// Mutations go through a single writer connection, so they are applied one
/// at a time; reads use a separate pool and run concurrently. The database
/// runs in WAL mode with `synchronous = FULL`, so a statement is durable by
/// the time `execute` returns.
#[derive(Clone, Debug)]
pub struct Store {
    writer: SqlitePool,
    reader: SqlitePool,
    path: PathBuf,
}

impl Store {
    /// Opens the database at `path`, creating the parent directory and the
    /// file when missing, and applies the embedded migrations. Safe to call
    /// against an existing database.
    pub async fn initialize(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create data dir {}", dir.display()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .with_context(|| format!("open database {}", path.display()))?;
        sqlx::migrate!("./migrations")
            .run(&writer)
            .await
            .context("apply migrations")?;
        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options)
            .await
            .with_context(|| format!("open database {}", path.display()))?;

        tracing::info!(path = %path.display(), "store_initialized");
        Ok(Self {
            writer,
            reader,
            path,
        })
    }

    /// Pool for read-only statements.
    pub fn reader(&self) -> &SqlitePool {
        &self.reader
    }

    /// Applies an insert, update or delete through the writer connection.
    pub async fn execute(&self, statement: Statement<'_>) -> Result<Mutation, StoreError> {
        let done = statement.execute(&self.writer).await?;
        Ok(Mutation {
            rows_affected: done.rows_affected(),
            last_insert_id: done.last_insert_rowid(),
        })
    }

    pub async fn fetch_optional(
        &self,
        statement: Statement<'_>,
    ) -> Result<Option<SqliteRow>, StoreError> {
        Ok(statement.fetch_optional(&self.reader).await?)
    }

    pub async fn fetch_all(&self, statement: Statement<'_>) -> Result<Vec<SqliteRow>, StoreError> {
        Ok(statement.fetch_all(&self.reader).await?)
    }

    /// Waits for in-flight statements and closes every connection.
    pub async fn close(&self) {
        self.reader.close().await;
        self.writer.close().await;
        tracing::info!(path = %self.path.display(), "store_closed");
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return StoreError::ConstraintViolation(db.message().to_string());
                }
                _ => {}
            }
        }
        tracing::debug!(error = %err, "sqlx operation failed");
        StoreError::Storage(err.into())
    }
}

pub mod repositories;
