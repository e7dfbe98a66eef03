
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParsedrillError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Lookup failed: {0}")]
    Lookup(String),
    #[error("Malformed payload: {message}")]
    Payload { message: String },
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, ParsedrillError>;

// Helper conversions
impl From<reqwest::Error> for ParsedrillError {
    fn from(e: reqwest::Error) -> Self { Self::Transport(e.to_string()) }
}
impl From<config::ConfigError> for ParsedrillError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
