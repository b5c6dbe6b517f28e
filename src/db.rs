use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Once;

use async_trait::async_trait;
use directories::ProjectDirs;
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::{migrate::Migrator, AnyPool, ConnectOptions};

use crate::dao;
use crate::error::{Error, Result};
use crate::storage::FavoritesStore;
use crate::types::FavoriteRecord;

// Ensure drivers are installed exactly once for sqlx::any
static INSTALL_DRIVERS: Once = Once::new();

// Embed SQL migrations from the migrations/ directory
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    // Create a connection pool. If database_url is None, use a sensible
    // default (SQLite file in the user's data directory).
    pub async fn connect(database_url: Option<&str>) -> Result<Self> {
        // Register compiled-in drivers for sqlx::any
        INSTALL_DRIVERS.call_once(|| sqlx::any::install_default_drivers());

        let url = match database_url {
            Some(u) if !u.trim().is_empty() => u.to_string(),
            _ => default_sqlite_url()?,
        };

        let opts = AnyConnectOptions::from_str(&url)
            .map_err(|e| Error::Storage(format!("invalid database URL {url}: {e}")))?;
        // Quiet by default; callers can enable SQLX_LOG if they want
        let opts = opts.disable_statement_logging();

        let pool = AnyPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .map_err(|e| Error::Storage(format!("failed to connect to database {url}: {e}")))?;

        tracing::debug!(%url, "connected to favorites database");
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}

#[async_trait]
impl FavoritesStore for Database {
    async fn insert_or_replace(&self, record: &FavoriteRecord) -> Result<i64> {
        dao::insert_or_replace(&self.pool, record).await
    }

    async fn list_all(&self) -> Result<Vec<FavoriteRecord>> {
        dao::list_all(&self.pool).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<FavoriteRecord>> {
        dao::find_by_id(&self.pool, id).await
    }

    async fn delete_by_record(&self, record: &FavoriteRecord) -> Result<u64> {
        dao::delete_by_record(&self.pool, record).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64> {
        dao::delete_by_id(&self.pool, id).await
    }

    async fn stats(&self) -> Result<dao::LibraryStats> {
        dao::stats(&self.pool).await
    }
}

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "medialib", "medialib")
        .ok_or_else(|| Error::Storage("unable to determine application directories".to_string()))
}

fn default_sqlite_url() -> Result<String> {
    let proj = project_dirs()?;
    let mut path: PathBuf = proj.data_dir().to_path_buf();
    std::fs::create_dir_all(&path)
        .map_err(|e| Error::Storage(format!("creating data dir {}: {e}", path.display())))?;
    path.push("favorites.db");

    // Ensure the file exists so SQLite can open it in rw mode
    let _ = std::fs::OpenOptions::new().create(true).write(true).open(&path);

    // Encode spaces in the path for a valid sqlite URL
    let mut path_str = path.to_string_lossy().to_string();
    if path_str.contains(' ') {
        path_str = path_str.replace(' ', "%20");
    }
    Ok(format!("sqlite://{path_str}?mode=rwc"))
}
