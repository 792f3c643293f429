//! Common error type and result alias used across the crate.
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// The Gemini API key is not configured. Generation fails fast on this;
    /// enhancement treats it as a soft failure and keeps the original text.
    #[error("GEMINI_API_KEY is missing. Set it in the environment or .env")]
    MissingCredential,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The remote call itself failed (network, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Gemini answered with a non-success status.
    #[error("Gemini API error: {0}")]
    Gemini(String),

    #[error("No candidates returned from Gemini")]
    NoCandidates,

    /// The model answered with text instead of an image, usually a refusal
    /// or safety block. The text is carried so callers can show the reason.
    #[error("Model returned text instead of image: {0}")]
    TextOnlyResponse(String),

    #[error("No image data found in response")]
    EmptyResponse,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}
