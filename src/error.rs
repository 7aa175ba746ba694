//
// Copyright (c) 2025 Nathan Fiedler
//

//! Error types returned by the chunker framework and registry.

use std::fmt;

/// Identifies which field of a [`crate::options::ChunkerOptions`] failed
/// validation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum OptionsField {
    MinSize,
    NormalSize,
    MaxSize,
}

impl fmt::Display for OptionsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsField::MinSize => write!(f, "MinSize"),
            OptionsField::NormalSize => write!(f, "NormalSize"),
            OptionsField::MaxSize => write!(f, "MaxSize"),
        }
    }
}

/// The error type returned from the registry and the [`crate::Chunker`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No algorithm is registered under the given name.
    #[error("unknown chunking algorithm: {0}")]
    UnknownAlgorithm(String),

    /// An algorithm was already registered under this name.
    #[error("algorithm already registered: {0}")]
    AlreadyRegistered(String),

    /// The supplied [`crate::options::ChunkerOptions`] violate an invariant.
    #[error("invalid {field}: {reason}")]
    InvalidOptions { field: OptionsField, reason: String },

    /// Reading from the input source failed.
    #[error("i/o error reading source: {0}")]
    Io(#[source] std::io::Error),

    /// Writing to the `copy` sink failed.
    #[error("i/o error writing sink: {0}")]
    Sink(#[source] std::io::Error),

    /// The `split` callback returned an error.
    #[error("callback error: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn invalid(field: OptionsField, reason: impl Into<String>) -> Self {
        Error::InvalidOptions {
            field,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error)
    }
}
