use thiserror::Error;

use crate::model::FetchMode;

/// Startup failure while loading or joining the map data. Fatal to rendering.
#[derive(Debug, Error)]
pub enum DataJoinError {
    #[error("failed to load {what} from {url}: {reason}")]
    Load {
        what: &'static str,
        url: String,
        reason: String,
    },
    #[error("world geometry is not valid TopoJSON: {0}")]
    Geometry(#[from] serde_json::Error),
    #[error("topology has no object named `{0}`")]
    MissingObject(String),
    #[error("topology references missing arc {0}")]
    ArcIndex(i64),
    #[error("country name table is malformed: {0}")]
    Names(#[from] csv::Error),
}

/// Failure of a single media search. Terminal to that request only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediaError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("selected result has no {0} preview")]
    MissingPreview(FetchMode),
}

impl MediaError {
    /// Human readable status text, when the server supplied one.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            MediaError::Http { status_text, .. } if !status_text.trim().is_empty() => {
                Some(status_text.as_str())
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, MediaError::Http { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_carries_status_text() {
        let e = MediaError::Http {
            status: 401,
            status_text: "Unauthorized".into(),
        };
        assert!(e.is_unauthorized());
        assert_eq!(e.status_text(), Some("Unauthorized"));
    }

    #[test]
    fn blank_status_text_is_not_surfaced() {
        let e = MediaError::Http {
            status: 500,
            status_text: "  ".into(),
        };
        assert_eq!(e.status_text(), None);
        assert!(!e.is_unauthorized());
        assert_eq!(MediaError::Network("offline".into()).status_text(), None);
    }
}
