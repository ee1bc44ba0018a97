use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Feed body is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Atom parsing error: {0}")]
    AtomError(#[from] atom_syndication::Error),

    #[error("RSS parsing error: {0}")]
    RssError(#[from] rss::Error),

    #[error("Pattern compilation failed: {0}")]
    RegexError(#[from] regex::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Feed entry is missing field '{field}'")]
    MissingField { field: String },

    #[error("Invalid URL in '{field}': {value} ({reason})")]
    InvalidUrl {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Feed request was cancelled")]
    Cancelled,

    #[error("Fallback construction failed: {message}")]
    FallbackError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    #[error("Authentication error: {message}")]
    AuthError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parse,
    Fallback,
    Config,
    Storage,
    Validation,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::HttpError(_) | DashboardError::Cancelled => ErrorCategory::Network,
            DashboardError::EncodingError(_)
            | DashboardError::AtomError(_)
            | DashboardError::RssError(_)
            | DashboardError::MissingField { .. }
            | DashboardError::InvalidUrl { .. }
            | DashboardError::UrlError(_) => ErrorCategory::Parse,
            DashboardError::FallbackError { .. } => ErrorCategory::Fallback,
            DashboardError::RegexError(_)
            | DashboardError::ConfigError { .. }
            | DashboardError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            DashboardError::IoError(_) | DashboardError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            DashboardError::ValidationError { .. }
            | DashboardError::NotFound { .. }
            | DashboardError::AuthError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the feed: {}", self),
            ErrorCategory::Parse => format!("The feed could not be read: {}", self),
            ErrorCategory::Fallback => format!("No fallback images available: {}", self),
            ErrorCategory::Config => format!("Please check the configuration: {}", self),
            ErrorCategory::Storage => format!("Data store problem: {}", self),
            ErrorCategory::Validation => self.to_string(),
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation => 1,
            ErrorCategory::Config => 2,
            ErrorCategory::Storage => 3,
            ErrorCategory::Network | ErrorCategory::Parse | ErrorCategory::Fallback => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
