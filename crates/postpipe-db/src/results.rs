//! Database operations for the `results` table.

use chrono::{SecondsFormat, Utc};
use sqlx::{SqliteExecutor, SqlitePool};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `results` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ResultRow {
    pub id: i64,
    pub original: String,
    pub analysis: String,
    pub sentiment: String,
    /// RFC 3339 UTC creation time, e.g. `2026-10-19T08:30:00.123456Z`.
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Create the `results` table if it does not exist yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn ensure_results_table<'e, E>(executor: E) -> Result<(), DbError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS results ( \
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             original TEXT, \
             analysis TEXT, \
             sentiment TEXT, \
             timestamp TEXT \
         )",
    )
    .execute(executor)
    .await?;

    Ok(())
}

/// Append one analyzed post and return the timestamp written with it.
///
/// The table is created if absent, then the row is inserted in its own
/// transaction. Any failure drops the transaction, which rolls it back and
/// returns the connection to the pool. The insert must stay the first
/// statement of the transaction: a read before it can fail with a stale WAL
/// snapshot when another writer commits in between.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a connection cannot be acquired or any
/// statement fails (e.g. the database is locked past the busy timeout).
pub async fn persist_result(
    pool: &SqlitePool,
    original: &str,
    analysis: &str,
    sentiment: &str,
) -> Result<String, DbError> {
    ensure_results_table(pool).await?;

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

    let mut tx = pool.begin().await?;
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO results (original, analysis, sentiment, timestamp) \
         VALUES (?, ?, ?, ?) \
         RETURNING id",
    )
    .bind(original)
    .bind(analysis)
    .bind(sentiment)
    .bind(&timestamp)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(id, sentiment, "stored result");
    Ok(timestamp)
}

/// List stored results, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_results(pool: &SqlitePool, limit: i64) -> Result<Vec<ResultRow>, DbError> {
    ensure_results_table(pool).await?;

    let rows = sqlx::query_as::<_, ResultRow>(
        "SELECT id, original, analysis, sentiment, timestamp \
         FROM results \
         ORDER BY id DESC \
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
