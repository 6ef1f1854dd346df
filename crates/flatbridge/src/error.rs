// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for flatbridge.
//!
//! Every fallible operation returns [`Result<T>`]. The C binding crate maps
//! each variant onto a stable integer code, so new variants must be added at
//! the end of their category.

use std::fmt;

/// flatbridge error.
///
/// # Example
///
/// ```rust
/// use flatbridge::{FlatArray, Error};
///
/// match FlatArray::from_parts(vec![1, 2, 3], vec![2, 2]) {
///     Err(Error::SizeMismatch { expected, actual }) => {
///         assert_eq!((expected, actual), (4, 3));
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Input Errors
    // ========================================================================
    /// Absent input, negative group size, or malformed element.
    InvalidArgument(&'static str),
    /// Group sizes do not add up to the number of elements.
    SizeMismatch {
        /// Sum of the group sizes.
        expected: usize,
        /// Number of elements actually present.
        actual: usize,
    },
    /// Two flattened structures that must share one outer grouping disagree
    /// on the number of groups.
    GroupCountMismatch {
        /// Group count of the first structure.
        first: usize,
        /// Group count of the second structure.
        second: usize,
    },
    /// A count does not fit the 32-bit integer used on the wire.
    LengthOverflow(usize),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration could not be parsed or holds an invalid value.
    Config(String),
    /// Configuration file not found at specified path.
    ConfigFileNotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(what) => write!(f, "Invalid argument: {}", what),
            Error::SizeMismatch { expected, actual } => write!(
                f,
                "Group sizes add up to {} but {} elements are present",
                expected, actual
            ),
            Error::GroupCountMismatch { first, second } => write!(
                f,
                "Group count mismatch: {} groups vs {} groups",
                first, second
            ),
            Error::LengthOverflow(len) => {
                write!(f, "Length {} does not fit a 32-bit wire count", len)
            }
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::ConfigFileNotFound(path) => write!(f, "Config file not found: {}", path),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for flatbridge operations.
pub type Result<T> = std::result::Result<T, Error>;
