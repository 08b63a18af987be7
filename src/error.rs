// src/error.rs
use thiserror::Error;

/// Main application error type
///
/// Every failure in the core maps to one of these variants. None of them is
/// fatal: settings errors fall back to defaults, ledger errors leave the
/// pending record in memory for a retry, and invalid operations leave all
/// state untouched.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Couldn't write call log at {path}: {message}")]
    Ledger { path: String, message: String },

    #[error("No active call")]
    NoActiveCall,

    #[error("A call is already in progress")]
    CallInProgress,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
