use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Closed media classification. Serialized as `"image"`/`"video"`; anything
/// else is rejected at the parse boundary instead of defaulting silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Decode a kind column read back from the store. The schema constrains
    /// the column, so anything unrecognized means a corrupted table.
    pub(crate) fn from_db(s: &str) -> crate::error::Result<Self> {
        s.parse()
            .map_err(|_| Error::Storage(format!("unrecognized media kind in store: {s:?}")))
    }

    /// Guess the kind from the locator the way the picker does: URIs that
    /// mention "image" are images, everything else is treated as video.
    pub fn infer_from_uri(uri: &str) -> Self {
        if uri.to_ascii_lowercase().contains("image") {
            MediaKind::Image
        } else {
            MediaKind::Video
        }
    }
}

impl FromStr for MediaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(Error::MalformedPayload(format!(
                "unrecognized media kind: {other:?} (expected \"image\" or \"video\")"
            ))),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One favorited media item. `id` is a surrogate key assigned by the store on
/// insert; 0 means "not yet persisted". `uri` is an opaque locator, never
/// dereferenced here, and duplicates across records are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    #[serde(default)]
    pub id: i64,
    pub uri: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

impl FavoriteRecord {
    /// A record not yet persisted; the store assigns the id on insert.
    pub fn new(uri: impl Into<String>, kind: MediaKind) -> Self {
        Self { id: 0, uri: uri.into(), kind }
    }
}

/// The currently viewed media item, passed explicitly to `add_favorite`
/// rather than kept as ambient session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub uri: String,
    pub kind: MediaKind,
}

impl Selection {
    pub fn new(uri: impl Into<String>, kind: MediaKind) -> Self {
        Self { uri: uri.into(), kind }
    }

    /// Build a selection from a bare locator, inferring the kind. Used when
    /// restoring the last-viewed item, which persists only the URI.
    pub fn from_uri(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let kind = MediaKind::infer_from_uri(&uri);
        Self { uri, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_json() {
        let r = FavoriteRecord { id: 7, uri: "content://x/1".into(), kind: MediaKind::Video };
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"type\":\"video\""));
        let back: FavoriteRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = serde_json::from_str::<FavoriteRecord>(
            r#"{"id":1,"uri":"content://x","type":"audio"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn missing_id_defaults_to_zero() {
        let r: FavoriteRecord =
            serde_json::from_str(r#"{"uri":"content://x","type":"image"}"#).unwrap();
        assert_eq!(r.id, 0);
    }

    #[test]
    fn kind_inferred_from_uri() {
        assert_eq!(
            MediaKind::infer_from_uri("content://media/external/images/media/12"),
            MediaKind::Image
        );
        assert_eq!(
            MediaKind::infer_from_uri("content://media/external/video/media/34"),
            MediaKind::Video
        );
    }
}
