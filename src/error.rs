use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not a git repository")]
    NotARepository,
    #[error(
        "{variable} environment variable not set\n   Get your API key from: https://aistudio.google.com/apikey\n   Then run: export {variable}=your_api_key_here"
    )]
    MissingApiKey { variable: &'static str },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("API error: {message}")]
    Api { code: i64, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("empty response: {0}")]
    EmptyResponse(String),
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
