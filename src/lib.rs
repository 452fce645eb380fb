// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! chordsmith: chord progression editing with model-backed suggestions.
//!
//! A [`ProgressionStore`] holds a key and an ordered list of chord slots.
//! A [`SuggestionPipeline`] takes a snapshot of it, asks a
//! [`TextGenerator`] for chords for one slot, and validates the reply into
//! exactly [`SUGGESTION_COUNT`] chord symbols.

pub mod config;
pub mod error;
pub mod generator;
pub mod progression;
pub mod suggest;

pub use error::{Error, Result};
pub use generator::{ChatCompletionsClient, GenerationError, TextGenerator};
pub use progression::{ProgressionSnapshot, ProgressionStore};
pub use suggest::{SuggestionPipeline, SUGGESTION_COUNT};
