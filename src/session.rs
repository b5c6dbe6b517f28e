use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex as AsyncMutex;

use crate::dao::LibraryStats;
use crate::db::{project_dirs, Database};
use crate::error::{Error, Result};
use crate::presenter::{ListEdit, ListPresenter};
use crate::storage::FavoritesStore;
use crate::types::{FavoriteRecord, Selection};

/// Default undo window, matching the transient notice duration of the
/// original UI. Override with MEDIALIB_UNDO_TTL_SECS.
const DEFAULT_UNDO_TTL_SECS: i64 = 10;

const EXPORT_FILE_NAME: &str = "favorites_export.json";

/// Proof of a completed deletion. Consuming it through [`Session::undo`]
/// before `expires_at` re-inserts the exact record that was removed.
/// Serializable so a CLI invocation can park it between processes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoToken {
    pub expires_at: i64,
    pub record: FavoriteRecord,
}

impl UndoToken {
    pub fn is_expired(&self) -> bool {
        current_epoch() > self.expires_at
    }
}

/// Session owns the store and the presenter and keeps the presented list
/// consistent with the store after every mutation. All mutations serialize
/// through a single writer lock, so the collection always reflects a
/// consistent sequence of operations; a caller arriving mid-mutation queues
/// behind the in-flight one.
pub struct Session {
    db: Database,
    presenter: Mutex<ListPresenter>,
    writer: AsyncMutex<()>,
    undo_ttl_secs: i64,
}

impl Session {
    /// Initialize the database and (optionally) run migrations. If
    /// `database_url` is None, a SQLite file in the user's data directory is
    /// used.
    pub async fn connect(database_url: Option<&str>, run_migrations: bool) -> Result<Self> {
        let db = Database::connect(database_url).await?;
        if run_migrations {
            db.run_migrations().await?;
        }
        let undo_ttl_secs = std::env::var("MEDIALIB_UNDO_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_UNDO_TTL_SECS);
        Ok(Self {
            db,
            presenter: Mutex::new(ListPresenter::new()),
            writer: AsyncMutex::new(()),
            undo_ttl_secs,
        })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Persist the selected media as a favorite and refresh the presented
    /// list. `None` means nothing is currently selected, which is a notice to
    /// the user, not a fault of the store.
    pub async fn add_favorite(&self, selection: Option<&Selection>) -> Result<FavoriteRecord> {
        let selection = selection.ok_or(Error::NoSelection)?;
        let _guard = self.writer.lock().await;

        let mut record = FavoriteRecord::new(selection.uri.clone(), selection.kind);
        record.id = self.db.insert_or_replace(&record).await?;
        tracing::info!(id = record.id, kind = %record.kind, "added favorite");

        self.reload().await?;
        Ok(record)
    }

    /// Delete a record (exact match on all fields; a stale record that no
    /// longer matches is a no-op) and refresh. The returned token re-inserts
    /// the identical record, id included, until it expires.
    pub async fn delete_favorite(&self, record: &FavoriteRecord) -> Result<UndoToken> {
        let _guard = self.writer.lock().await;

        let removed = self.db.delete_by_record(record).await?;
        tracing::info!(id = record.id, removed, "deleted favorite");

        self.reload().await?;
        Ok(UndoToken {
            record: record.clone(),
            expires_at: current_epoch() + self.undo_ttl_secs,
        })
    }

    /// Restore the record a token stands for. Returns false without touching
    /// the store when the undo window has closed. A token is single-use by
    /// convention; re-running it is harmless (insert-or-replace of the same
    /// row) but callers should discard it after the first call.
    pub async fn undo(&self, token: &UndoToken) -> Result<bool> {
        if token.is_expired() {
            tracing::debug!(id = token.record.id, "undo token expired");
            return Ok(false);
        }
        let _guard = self.writer.lock().await;

        self.db.insert_or_replace(&token.record).await?;
        tracing::info!(id = token.record.id, "restored favorite");

        self.reload().await?;
        Ok(true)
    }

    /// Serialize the full collection to the fixed application-private export
    /// file. Returns the number of records written and the file path.
    pub async fn export(&self) -> Result<(usize, PathBuf)> {
        let path = default_export_path()?;
        let count = self.export_to(&path).await?;
        Ok((count, path))
    }

    /// Serialize the full collection as a JSON array to `path`.
    pub async fn export_to(&self, path: &Path) -> Result<usize> {
        let favorites = self.db.list_all().await?;
        let json = serde_json::to_string_pretty(&favorites)
            .map_err(|e| Error::Storage(format!("serializing favorites: {e}")))?;
        tokio::fs::write(path, json).await?;
        tracing::info!(count = favorites.len(), path = %path.display(), "exported favorites");
        Ok(favorites.len())
    }

    /// Deserialize a favorites list from `payload` and insert every record
    /// via insert-or-replace (supplied ids overwrite existing rows, missing
    /// ids are assigned). The whole payload is parsed before anything is
    /// written, so a malformed payload leaves the store untouched.
    pub async fn import(&self, payload: &str) -> Result<usize> {
        let records: Vec<FavoriteRecord> = serde_json::from_str(payload)?;
        let _guard = self.writer.lock().await;

        for record in &records {
            self.db.insert_or_replace(record).await?;
        }
        tracing::info!(count = records.len(), "imported favorites");

        self.reload().await?;
        Ok(records.len())
    }

    /// Reload the collection from the store and hand it to the presenter.
    /// Returns the edit script relative to the previously presented snapshot.
    pub async fn refresh(&self) -> Result<Vec<ListEdit>> {
        let _guard = self.writer.lock().await;
        self.reload().await
    }

    /// The currently presented collection.
    pub fn snapshot(&self) -> Vec<FavoriteRecord> {
        self.presenter.lock().unwrap().items().to_vec()
    }

    pub async fn stats(&self) -> Result<LibraryStats> {
        self.db.stats().await
    }

    // Full reload into the presenter; callers hold the writer lock.
    async fn reload(&self) -> Result<Vec<ListEdit>> {
        let favorites = self.db.list_all().await?;
        Ok(self.presenter.lock().unwrap().submit(favorites))
    }
}

/// Fixed, application-private location the export is written to.
pub fn default_export_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.data_dir().to_path_buf();
    std::fs::create_dir_all(&dir)
        .map_err(|e| Error::Storage(format!("creating data dir {}: {e}", dir.display())))?;
    Ok(dir.join(EXPORT_FILE_NAME))
}

fn current_epoch() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
