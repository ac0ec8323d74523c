use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure or non-2xx response. `status` is set when the
    /// server answered.
    #[error("Fetch error: {message}")]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn status(status: u16) -> Self {
        Error::Fetch {
            status: Some(status),
            message: format!("failed to fetch page: status code {}", status),
        }
    }

    /// HTTP status reported by the upstream server, if any.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Error::Fetch { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if !status.is_success() => Error::status(status.as_u16()),
            _ if err.is_decode() => Error::Parse(err.to_string()),
            _ => Error::Fetch {
                status: None,
                message: err.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
