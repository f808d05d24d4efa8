use thiserror::Error;

/// Errors surfaced while resolving, fetching or normalizing head metadata
#[derive(Error, Debug)]
pub enum SeoError {
    /// No metadata transport is configured or it could not be constructed
    #[error("Metadata transport unavailable: {0}")]
    TransportUnavailable(String),

    /// The transport was reached but the fetch itself failed
    #[error("Metadata fetch failed: {0}")]
    Transport(String),

    /// The fetch succeeded but returned no container bundle
    #[error("No SEO data was returned from the metadata source")]
    MissingData,

    /// A present container could not be decoded into its expected shape
    #[error("Malformed container '{container}': {reason}")]
    MalformedContainer {
        container: &'static str,
        reason: String,
    },
}

impl SeoError {
    pub(crate) fn malformed(container: &'static str, reason: impl Into<String>) -> Self {
        SeoError::MalformedContainer {
            container,
            reason: reason.into(),
        }
    }

    /// Name of the offending container, for `MalformedContainer` errors
    pub fn container(&self) -> Option<&'static str> {
        match self {
            SeoError::MalformedContainer { container, .. } => Some(container),
            _ => None,
        }
    }
}

/// Implement From<reqwest::Error> for SeoError
impl From<reqwest::Error> for SeoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SeoError::Transport(format!("request timed out: {err}"))
        } else {
            SeoError::Transport(err.to_string())
        }
    }
}

pub type SeoResult<T> = Result<T, SeoError>;
