use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response structure from {url}")]
    InvalidShape {
        url: String,
        #[source]
        source: ShapeError,
    },

    #[error("Invalid request URL built from base '{base_url}'")]
    InvalidUrl {
        base_url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

impl FetchError {
    /// True for connection, timeout and non-success status failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Transport { .. } | FetchError::HttpStatus { .. }
        )
    }

    pub fn is_invalid_shape(&self) -> bool {
        matches!(self, FetchError::InvalidShape { .. })
    }
}

/// Why a response body could not be read as a daily point payload.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("Response body is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("Response has no `properties.parameter` object")]
    MissingParameterBlock,

    #[error("`properties.parameter` is not a map of date-to-number maps")]
    MalformedParameterBlock(#[source] serde_json::Error),
}
