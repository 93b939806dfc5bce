//! Error taxonomy shared by the library, playlist, queue and store layers.
//!
//! Every variant is recoverable: callers print a message and carry on.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid duration `{input}`: expected mm:ss with seconds below 60")]
    InvalidFormat { input: String },

    #[error("{entity} already exists: {key}")]
    Duplicate { entity: &'static str, key: String },

    #[error("The {0} is empty")]
    EmptyCollection(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed store file: {0}")]
    Json(#[from] serde_json::Error),
}

impl LibraryError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn duplicate(entity: &'static str, key: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            key: key.into(),
        }
    }

    /// True for the "nothing matched" family of errors that the menus report
    /// as a plain message rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// False only for persistence failures.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_entity() {
        let err = LibraryError::not_found("Playlist", "Road Trip");
        assert_eq!(err.to_string(), "Playlist not found: Road Trip");
        assert!(err.is_not_found());

        let err = LibraryError::duplicate("Track", "Alpha");
        assert_eq!(err.to_string(), "Track already exists: Alpha");
        assert!(!err.is_not_found());

        let err = LibraryError::EmptyCollection("queue");
        assert_eq!(err.to_string(), "The queue is empty");
        assert!(err.is_recoverable());

        let err = LibraryError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(!err.is_recoverable());
    }
}
