// ── CIGAM Atoms: Error Types ───────────────────────────────────────────────
// Single canonical error enum for the bridge, built with `thiserror`.
//
// Design rules:
//   • Transport failures keep the three-way split the ERP client reports:
//     remote rejection, no response, request construction.
//   • Everything below the dispatcher returns `CigamResult`; the dispatcher
//     turns the `Display` text into an error envelope.
//   • No variant carries the shared secret in its message.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CigamError {
    /// Base address or PIN missing. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The ERP answered with a non-2xx status.
    #[error("CIGAM API Error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The request went out but nothing came back (connect failure, timeout).
    #[error("No response from CIGAM server")]
    NoResponse,

    /// The request could not be built or sent.
    #[error("Request error: {0}")]
    Request(String),

    /// Tool arguments are missing a required field or have the wrong shape.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No tool is registered under this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// stdio failure on the protocol channel.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ── Convenience constructors ───────────────────────────────────────────────

impl CigamError {
    /// Create an API error from a status code and server-provided detail.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api { status, message: message.into() }
    }

    /// Create an invalid-arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

pub type CigamResult<T> = Result<T, CigamError>;

impl From<CigamError> for String {
    fn from(e: CigamError) -> Self {
        e.to_string()
    }
}
