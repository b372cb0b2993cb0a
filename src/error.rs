use thiserror::Error;

#[derive(Error, Debug)]
pub enum PropertyCacheError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Redis command failed: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Redis pool error: {reason}")]
    Pool { reason: String },

    #[error("Record store returned {status}: {body}")]
    Store { status: u16, body: String },

    #[error("In-process cache lock poisoned during {op}")]
    LockPoisoned { op: &'static str },

    #[error("Cache info report is missing counter '{name}'")]
    MissingCounter { name: String },

    #[error("Cache info counter '{name}' is not a non-negative integer: '{raw}'")]
    InvalidCounter { name: String, raw: String },

    #[error("Cache metrics unavailable: {0}")]
    MetricsUnavailable(Box<PropertyCacheError>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, PropertyCacheError>;
