use serde::{Deserialize, Serialize};
use sqlx::AnyPool;

use crate::error::{Error, Result};
use crate::types::{FavoriteRecord, MediaKind};

/// Counts over the favorites table, for the CLI stats view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total: usize,
    pub images: usize,
    pub videos: usize,
}

/// Insert a record, or replace the row sharing its id. An id of 0 means
/// "assign one"; the assigned id is returned either way. Replacement is
/// last-write-wins, never an error.
pub async fn insert_or_replace(pool: &AnyPool, record: &FavoriteRecord) -> Result<i64> {
    if record.id == 0 {
        let res = sqlx::query("INSERT INTO favorites(kind, uri) VALUES(?, ?)")
            .bind(record.kind.as_str())
            .bind(&record.uri)
            .execute(pool)
            .await?;
        // A driver that cannot report the assigned id would otherwise hand
        // back 0, which the rest of the crate reads as "not yet persisted".
        res.last_insert_id()
            .filter(|id| *id > 0)
            .ok_or_else(|| Error::Storage("store did not report an assigned id".to_string()))
    } else {
        sqlx::query("INSERT OR REPLACE INTO favorites(id, kind, uri) VALUES(?, ?, ?)")
            .bind(record.id)
            .bind(record.kind.as_str())
            .bind(&record.uri)
            .execute(pool)
            .await?;
        Ok(record.id)
    }
}

/// Full collection, most recently added first. Empty store -> empty vec.
pub async fn list_all(pool: &AnyPool) -> Result<Vec<FavoriteRecord>> {
    let rows = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, kind, uri FROM favorites ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(id, kind, uri)| Ok(FavoriteRecord { id, uri, kind: MediaKind::from_db(&kind)? }))
        .collect()
}

pub async fn find_by_id(pool: &AnyPool, id: i64) -> Result<Option<FavoriteRecord>> {
    let row = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, kind, uri FROM favorites WHERE id = ? LIMIT 1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(|(id, kind, uri)| Ok(FavoriteRecord { id, uri, kind: MediaKind::from_db(&kind)? }))
        .transpose()
}

/// Remove the row matching every field of `record`. Returns rows affected;
/// 0 (no exact match) is a no-op, not an error.
pub async fn delete_by_record(pool: &AnyPool, record: &FavoriteRecord) -> Result<u64> {
    let res = sqlx::query("DELETE FROM favorites WHERE id = ? AND kind = ? AND uri = ?")
        .bind(record.id)
        .bind(record.kind.as_str())
        .bind(&record.uri)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

/// Remove the row with the given id, if any. Returns rows affected.
pub async fn delete_by_id(pool: &AnyPool, id: i64) -> Result<u64> {
    let res = sqlx::query("DELETE FROM favorites WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn stats(pool: &AnyPool) -> Result<LibraryStats> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites")
        .fetch_one(pool)
        .await?;
    let images: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE kind = 'image'")
        .fetch_one(pool)
        .await?;
    let videos: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE kind = 'video'")
        .fetch_one(pool)
        .await?;

    Ok(LibraryStats {
        total: total as usize,
        images: images as usize,
        videos: videos as usize,
    })
}
