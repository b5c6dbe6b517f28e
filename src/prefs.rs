use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::db::project_dirs;
use crate::error::{Error, Result};
use crate::session::UndoToken;
use crate::types::{MediaKind, Selection};

/// Small key-value state persisted across invocations: the most recently
/// viewed media item (restored at startup) and a pending undo token from
/// the last deletion, if its window is still open.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub last_uri: Option<String>,
    /// Kind chosen when the item was picked; when absent it is re-inferred
    /// from the URI on restore.
    pub last_kind: Option<MediaKind>,
    pub pending_undo: Option<UndoToken>,
}

impl Preferences {
    /// Rebuild the current selection from the persisted last-viewed item.
    /// An explicitly picked kind wins over inference from the locator.
    pub fn selection(&self) -> Option<Selection> {
        let uri = self.last_uri.as_deref()?;
        Some(match self.last_kind {
            Some(kind) => Selection::new(uri, kind),
            None => Selection::from_uri(uri),
        })
    }

    /// Load from the default location; a missing file is an empty set of
    /// preferences, not an error.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_prefs_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&default_prefs_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Storage(format!("reading preferences: {e}")))?;
        toml::from_str(&content)
            .map_err(|e| Error::Storage(format!("parsing preferences: {e}")))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string(self)
            .map_err(|e| Error::Storage(format!("serializing preferences: {e}")))?;
        std::fs::write(path, content)
            .map_err(|e| Error::Storage(format!("writing preferences: {e}")))
    }
}

fn default_prefs_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.config_dir().to_path_buf();
    std::fs::create_dir_all(&dir)
        .map_err(|e| Error::Storage(format!("creating config dir {}: {e}", dir.display())))?;
    Ok(dir.join("prefs.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FavoriteRecord, MediaKind};

    #[test]
    fn round_trips_through_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("prefs.toml");

        let prefs = Preferences {
            last_uri: Some("content://media/external/images/media/9".to_string()),
            last_kind: Some(MediaKind::Image),
            pending_undo: Some(UndoToken {
                record: FavoriteRecord {
                    id: 4,
                    uri: "content://x".to_string(),
                    kind: MediaKind::Image,
                },
                expires_at: 1_700_000_000,
            }),
        };
        prefs.save_to(&path).unwrap();

        let back = Preferences::load_from(&path).unwrap();
        assert_eq!(back.last_uri, prefs.last_uri);
        let undo = back.pending_undo.unwrap();
        assert_eq!(undo.record.id, 4);
        assert_eq!(undo.expires_at, 1_700_000_000);
    }

    #[test]
    fn missing_file_is_empty_prefs() {
        let tmp = tempfile::tempdir().unwrap();
        let prefs = Preferences::load_from(&tmp.path().join("absent.toml")).unwrap();
        assert!(prefs.last_uri.is_none());
        assert!(prefs.last_kind.is_none());
        assert!(prefs.pending_undo.is_none());
    }

    #[test]
    fn picked_kind_overrides_uri_inference() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("prefs.toml");

        // A locator whose text says "image", explicitly picked as video.
        let prefs = Preferences {
            last_uri: Some("content://media/external/images/media/7".to_string()),
            last_kind: Some(MediaKind::Video),
            pending_undo: None,
        };
        prefs.save_to(&path).unwrap();

        let selection = Preferences::load_from(&path).unwrap().selection().unwrap();
        assert_eq!(selection.kind, MediaKind::Video);
    }

    #[test]
    fn selection_falls_back_to_inference_without_a_stored_kind() {
        let prefs = Preferences {
            last_uri: Some("content://media/external/images/media/7".to_string()),
            last_kind: None,
            pending_undo: None,
        };
        assert_eq!(prefs.selection().unwrap().kind, MediaKind::Image);

        let empty = Preferences::default();
        assert!(empty.selection().is_none());
    }
}
