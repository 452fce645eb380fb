// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord suggestion pipeline.
//!
//! This module provides:
//! - Prompt construction from a progression snapshot
//! - Response extraction and validation
//! - Chord symbol notation checks
//!
//! A request checks the position, builds the prompt, awaits the generator
//! once and validates what comes back. Nothing is retried here.

pub mod chord_symbol;
pub mod prompt;
pub mod response;

use tracing::{debug, info, warn};

pub use chord_symbol::{is_valid_chord_symbol, ChordSymbol, Quality};
pub use prompt::build_prompt;
pub use response::{extract_candidate, parse_suggestions};

use crate::error::{Error, Result};
use crate::generator::TextGenerator;
use crate::progression::ProgressionSnapshot;

/// Number of chords every successful request returns
pub const SUGGESTION_COUNT: usize = 12;

/// Suggestion pipeline over a text generator
pub struct SuggestionPipeline<G> {
    generator: G,
}

impl<G: TextGenerator> SuggestionPipeline<G> {
    /// Create a pipeline driving the given generator
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Get the generator
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Suggest [`SUGGESTION_COUNT`] chords for the slot at `position`.
    ///
    /// The snapshot is read only; the live store can keep changing while
    /// the request is in flight. The returned order is the generator's.
    ///
    /// # Errors
    /// * `InvalidPosition` if `position` is outside the snapshot
    /// * `ExternalGeneration` if the generator fails
    /// * `InvalidResponse` if the reply does not validate
    pub async fn suggest_chords(
        &self,
        snapshot: &ProgressionSnapshot,
        position: usize,
    ) -> Result<Vec<String>> {
        snapshot.check_position(position)?;

        let prompt = build_prompt(snapshot, position);
        debug!(
            generator = self.generator.name(),
            position,
            slots = snapshot.len(),
            prompt_chars = prompt.len(),
            "Requesting chord suggestions"
        );

        let reply = self
            .generator
            .generate(&prompt)
            .await
            .map_err(Error::ExternalGeneration)?;

        match parse_suggestions(&reply) {
            Ok(suggestions) => {
                info!(
                    generator = self.generator.name(),
                    position,
                    count = suggestions.len(),
                    "Chord suggestions accepted"
                );
                Ok(suggestions)
            }
            Err(e) => {
                warn!(
                    generator = self.generator.name(),
                    position,
                    reply_chars = reply.len(),
                    "Rejected generator reply: {}",
                    e
                );
                Err(e)
            }
        }
    }
}
