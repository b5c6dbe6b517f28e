use thiserror::Error;

/// Failure taxonomy for the library. Everything is recoverable: callers are
/// expected to turn these into user-visible notices rather than abort.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O fault in the underlying store (database or export file). Not
    /// retried here; retry policy, if any, belongs to the caller.
    #[error("storage failure: {0}")]
    Storage(String),

    /// The import payload did not parse as a favorites list.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Add-to-favorites attempted with no media selected.
    #[error("no media selected")]
    NoSelection,
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Error::Storage(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Error::Storage(format!("migration failed: {e}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedPayload(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_map_to_malformed_payload() {
        let e = serde_json::from_str::<Vec<i64>>("[1,").unwrap_err();
        assert!(matches!(Error::from(e), Error::MalformedPayload(_)));
    }

    #[test]
    fn io_errors_map_to_storage() {
        let e = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(e);
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().starts_with("storage failure"));
    }
}
