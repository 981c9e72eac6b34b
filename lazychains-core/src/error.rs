// lazychains-core - Error types for chain forcing
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for chain operations.

use std::fmt;

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while forcing or querying a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// head/tail/dest on an exhausted chain
    EmptySequence { operation: &'static str },
    /// Index out of bounds. `length` is the full length for negative
    /// lookups, and the number of elements found before exhaustion otherwise.
    IndexOutOfBounds { index: i64, length: usize },
    /// A producer could not satisfy the produce-or-exhaust contract
    InvalidSource(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptySequence { operation } => {
                write!(f, "Trying to take the {} of an empty chain", operation)
            }
            Error::IndexOutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for chain of length {}",
                    index, length
                )
            }
            Error::InvalidSource(msg) => {
                write!(f, "Invalid chain source: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create an empty-sequence error for the named operation.
    pub fn empty(operation: &'static str) -> Self {
        Error::EmptySequence { operation }
    }

    /// Create an index error.
    pub fn index(index: i64, length: usize) -> Self {
        Error::IndexOutOfBounds { index, length }
    }

    /// Create an invalid-source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Error::InvalidSource(message.into())
    }
}
