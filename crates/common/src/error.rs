//! Unified error type for the digest bot.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Firestore API error (status={status}): {message}")]
    Firestore { status: u16, message: String },

    #[error("Open-Meteo API error: {0}")]
    OpenMeteo(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
