// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for chordsmith.
//!
//! Every failure is terminal for the request that raised it. Nothing in
//! the library retries or recovers internally.

use thiserror::Error;

use crate::generator::GenerationError;

/// Main error type for progression and suggestion operations
#[derive(Error, Debug)]
pub enum Error {
    /// Position argument outside the current slot range
    #[error("Invalid position {index}: valid range is 0..{len}")]
    InvalidPosition {
        /// The offending index
        index: usize,
        /// Sequence length at the time of the call
        len: usize,
    },

    /// The text generator failed; carried as-is
    #[error("External generation error: {0}")]
    ExternalGeneration(#[source] GenerationError),

    /// The generator's text failed structural, count or notation checks
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Build an `InvalidPosition` error
    pub fn invalid_position(index: usize, len: usize) -> Self {
        Error::InvalidPosition { index, len }
    }

    /// Build an `InvalidResponse` error from any displayable reason
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Error::InvalidResponse(reason.into())
    }
}

/// Convenience Result type using the chordsmith Error
pub type Result<T> = std::result::Result<T, Error>;
