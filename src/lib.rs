pub mod dao;
pub mod db;
pub mod error;
pub mod prefs;
pub mod presenter;
pub mod session;
pub mod storage;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::dao::LibraryStats;
    pub use crate::error::{Error, Result};
    pub use crate::prefs::Preferences;
    pub use crate::presenter::{ListEdit, ListPresenter};
    pub use crate::session::{Session, UndoToken};
    pub use crate::storage::FavoritesStore;
    pub use crate::types::{FavoriteRecord, MediaKind, Selection};
}

pub use error::{Error, Result};
pub use session::Session;
pub use types::{FavoriteRecord, MediaKind, Selection};
