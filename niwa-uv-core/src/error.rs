use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::provider::ProductId;

/// Coarse failure category, surfaced to HTTP callers alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Configuration,
    Upstream,
    Parse,
}

#[derive(Debug, thiserror::Error)]
pub enum UvError {
    #[error("Missing configuration value {0}")]
    MissingConfig(&'static str),

    #[error("Failed to send request to NIWA: {0}")]
    Request(#[from] reqwest::Error),

    #[error("NIWA request failed with status {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse NIWA JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("NIWA response contained no '{0}' product")]
    MissingProduct(ProductId),

    #[error("NIWA series lengths differ: {clear_sky} clear sky values, {cloudy_sky} cloudy sky values")]
    SeriesMismatch { clear_sky: usize, cloudy_sky: usize },

    #[error("NIWA series are misaligned at index {index}: clear sky {clear_sky}, cloudy sky {cloudy_sky}")]
    MisalignedSample {
        index: usize,
        clear_sky: DateTime<Utc>,
        cloudy_sky: DateTime<Utc>,
    },
}

impl UvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UvError::MissingConfig(_) => ErrorKind::Configuration,
            UvError::Request(_) | UvError::UpstreamStatus { .. } => ErrorKind::Upstream,
            UvError::Parse(_)
            | UvError::MissingProduct(_)
            | UvError::SeriesMismatch { .. }
            | UvError::MisalignedSample { .. } => ErrorKind::Parse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_failure_stage() {
        assert_eq!(UvError::MissingConfig("NIWA_API_KEY").kind(), ErrorKind::Configuration);

        let status = UvError::UpstreamStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert_eq!(status.kind(), ErrorKind::Upstream);

        let mismatch = UvError::SeriesMismatch { clear_sky: 3, cloudy_sky: 2 };
        assert_eq!(mismatch.kind(), ErrorKind::Parse);
        assert_eq!(UvError::MissingProduct(ProductId::CloudySky).kind(), ErrorKind::Parse);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&ErrorKind::Configuration).unwrap();
        assert_eq!(json, "\"configuration\"");
    }

    #[test]
    fn missing_config_names_the_variable() {
        let err = UvError::MissingConfig("NIWA_API_URL");
        assert_eq!(err.to_string(), "Missing configuration value NIWA_API_URL");
    }
}
