//! Error types for the wizard
//!
//! Two families live here:
//! - [`WizardError`] ends the session. Every variant maps to a non-zero exit status.
//! - [`InputError`] and [`Rejection`] describe bad user input. They are never fatal; their
//!   `Display` text becomes the transient error notice shown before the next prompt.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that terminate the wizard
#[derive(Error, Debug)]
pub enum WizardError {
    /// The metadata request could not complete (DNS, connect, timeout, HTTP status)
    #[error("Failed to fetch metadata from {url}: {reason}")]
    Network { url: String, reason: String },

    /// The metadata endpoint answered with an empty body
    #[error("Metadata endpoint {url} returned an empty response")]
    EmptyResponse { url: String },

    /// The metadata body is not the expected JSON document
    #[error("Failed to parse metadata document: {0}")]
    MalformedMetadata(#[from] serde_json::Error),

    /// A field the wizard prompts for has no selectable values
    #[error("Metadata document has no values for field '{key}'")]
    MissingField { key: String },

    /// A configured endpoint is not a valid URL
    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The archive request failed
    #[error("Failed to download project archive from {url}: {reason}")]
    Download { url: String, reason: String },

    /// The downloaded archive could not be unpacked
    #[error("Failed to extract {path}: {reason}")]
    Extract { path: PathBuf, reason: String },

    /// Standard input was closed while a prompt was waiting
    #[error("Input closed before the wizard finished")]
    InputClosed,

    /// Local file or terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WizardError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Recoverable input problems, shown as an error notice before re-prompting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{value} is out of range, choose between 1 and {max}")]
    OutOfRange { value: usize, max: usize },

    #[error("No default available, please choose an option")]
    NoDefault,

    #[error("'{0}' is invalid, use only letters, digits, '.', '_' and '-'")]
    InvalidCharacters(String),

    #[error("Enter a number or a comma-separated list of dependency ids")]
    EmptyDependencyInput,

    #[error("Input is not valid UTF-8, please try again")]
    InvalidEncoding,

    #[error("Please answer y or n")]
    UnrecognizedAnswer,
}

/// Why a dependency id was not added to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The id is valid but already selected
    Duplicate,
    /// The id does not exist in any dependency category
    Invalid,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Duplicate => write!(f, "duplicate"),
            Rejection::Invalid => write!(f, "invalid"),
        }
    }
}

pub type Result<T> = std::result::Result<T, WizardError>;
