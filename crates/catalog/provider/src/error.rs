//! Provider error types.

/// Which side of the provider contract a failure broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a usable response.
    Transport,
    /// A response arrived but its body is not the expected document.
    Decode,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("unexpected document shape at {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no document at {url}")]
    NotFound { url: String },

    #[error("provider unavailable for {url}: {reason}")]
    Unavailable { url: String, reason: String },

    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Decode { .. } => ErrorKind::Decode,
            ProviderError::Transport { .. }
            | ProviderError::Status { .. }
            | ProviderError::NotFound { .. }
            | ProviderError::Unavailable { .. }
            | ProviderError::Client(_) => ErrorKind::Transport,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    pub fn is_decode(&self) -> bool {
        self.kind() == ErrorKind::Decode
    }

    /// Url of the failed lookup, when there was one.
    pub fn url(&self) -> Option<&str> {
        match self {
            ProviderError::Transport { url, .. }
            | ProviderError::Status { url, .. }
            | ProviderError::Decode { url, .. }
            | ProviderError::NotFound { url }
            | ProviderError::Unavailable { url, .. } => Some(url),
            ProviderError::Client(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
