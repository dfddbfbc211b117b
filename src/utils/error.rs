use thiserror::Error;

#[derive(Error, Debug)]
pub enum QkamuraError {
    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("response parse error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{service} response is {status}: {body}")]
    UpstreamError {
        service: String,
        status: u16,
        body: String,
    },

    #[error("invalid stay date {value}: {reason}")]
    DateFormatError { value: String, reason: String },

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("slack post failed: {source}, message: {message}")]
    NotifyError {
        source: Box<QkamuraError>,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, QkamuraError>;
