//! Error types shared by the invitation components.
//!
//! The countdown arithmetic itself cannot fail. Errors arise only while
//! loading configuration or when a guest submits one of the local forms
//! with input that does not pass validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while configuring the page or validating form input.
#[derive(Debug, Error)]
pub enum InvitationError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::InvitationConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The target moment is not an RFC 3339 timestamp with an explicit offset.
    #[error("invalid target moment {value:?}: {source}")]
    InvalidTarget {
        /// The rejected input.
        value: String,
        /// Parser diagnostics.
        #[source]
        source: chrono::ParseError,
    },

    /// A required form field was left blank.
    #[error("{0} is required")]
    EmptyField(&'static str),

    /// The gift amount was missing, not a number, or not positive.
    #[error("Please enter a valid amount")]
    InvalidAmount,

    /// The selected file is not an image.
    #[error("{0} is not an image file")]
    UnsupportedPhoto(String),

    /// No uploaded photo has the given id.
    #[error("no photo with id {0}")]
    NoSuchPhoto(u64),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InvitationError>;
