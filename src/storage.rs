use async_trait::async_trait;

use crate::dao::LibraryStats;
use crate::error::Result;
use crate::types::FavoriteRecord;

/// Durable CRUD over favorite records. The store is the only component that
/// touches the underlying table; everything else goes through this seam.
///
/// Every operation is atomic per call and fails only on storage I/O faults.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Insert (assigning an id when `record.id == 0`) or replace the row with
    /// the same id. Returns the id the row ended up with.
    async fn insert_or_replace(&self, record: &FavoriteRecord) -> Result<i64>;

    /// The whole collection, ordered by id descending.
    async fn list_all(&self) -> Result<Vec<FavoriteRecord>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<FavoriteRecord>>;

    /// Delete the row matching all fields. No-op when nothing matches.
    async fn delete_by_record(&self, record: &FavoriteRecord) -> Result<u64>;

    /// Delete by id. No-op when absent.
    async fn delete_by_id(&self, id: i64) -> Result<u64>;

    async fn stats(&self) -> Result<LibraryStats>;
}
