// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Progression store.
//!
//! Holds the tonal center and an ordered sequence of slots, each either a
//! chord symbol or empty. Every position-based operation is bounds-checked
//! and a rejected call leaves the store untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Key used when none is supplied
pub const DEFAULT_KEY: &str = "C major";

/// Detached copy of a progression at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    /// Tonal center (free-form, e.g. "B major")
    pub key: String,
    /// Slots in playback order; `None` marks an empty slot
    pub chords: Vec<Option<String>>,
}

impl ProgressionSnapshot {
    /// Create an empty snapshot for a key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            chords: Vec::new(),
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    /// Whether there are no slots
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Fail with `InvalidPosition` unless `position` addresses a slot
    pub fn check_position(&self, position: usize) -> Result<()> {
        check_bounds(position, self.chords.len())
    }
}

impl fmt::Display for ProgressionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.key)?;
        for (i, slot) in self.chords.iter().enumerate() {
            let sep = if i == 0 { " " } else { " | " };
            match slot {
                Some(chord) => write!(f, "{}{}", sep, chord)?,
                None => write!(f, "{}-", sep)?,
            }
        }
        Ok(())
    }
}

fn check_bounds(position: usize, len: usize) -> Result<()> {
    if position < len {
        Ok(())
    } else {
        Err(Error::invalid_position(position, len))
    }
}

/// Mutable owner of the live progression
#[derive(Debug, Clone)]
pub struct ProgressionStore {
    key: String,
    slots: Vec<Option<String>>,
}

impl ProgressionStore {
    /// Create an empty store in the default key
    pub fn new() -> Self {
        Self::with_key(DEFAULT_KEY)
    }

    /// Create an empty store in the given key
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            slots: Vec::new(),
        }
    }

    /// Rebuild a store from a snapshot's key and slots
    pub fn from_snapshot(snapshot: &ProgressionSnapshot) -> Self {
        Self {
            key: snapshot.key.clone(),
            slots: snapshot.chords.clone(),
        }
    }

    /// Current key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the key. Spelling is not checked.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
        debug!(key = %self.key, "Key changed");
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read one slot
    pub fn chord(&self, position: usize) -> Result<Option<&str>> {
        check_bounds(position, self.slots.len())?;
        Ok(self.slots[position].as_deref())
    }

    /// Add an empty slot.
    ///
    /// With `None` the slot is appended. With `Some(position)` it is inserted
    /// before the slot currently at `position`, which must already exist;
    /// growing the sequence is only possible through the append form.
    pub fn add_slot(&mut self, position: Option<usize>) -> Result<()> {
        match position {
            None => self.slots.push(None),
            Some(position) => {
                check_bounds(position, self.slots.len())?;
                self.slots.insert(position, None);
            }
        }
        debug!(?position, len = self.slots.len(), "Slot added");
        Ok(())
    }

    /// Put a chord symbol into an existing slot, overwriting what was there.
    ///
    /// The symbol is stored as given; notation is not checked here.
    pub fn add_chord(&mut self, position: usize, chord: impl Into<String>) -> Result<()> {
        check_bounds(position, self.slots.len())?;
        let chord = chord.into();
        debug!(position, chord = %chord, "Chord set");
        self.slots[position] = Some(chord);
        Ok(())
    }

    /// Put a chord in slot `position`, or in a new slot when `position`
    /// is exactly one past the end.
    ///
    /// Any larger position fails with `InvalidPosition` before anything
    /// changes, so the sequence grows by at most one slot per call.
    pub fn put_chord(&mut self, position: usize, chord: impl Into<String>) -> Result<()> {
        if position == self.slots.len() {
            self.add_slot(None)?;
        }
        self.add_chord(position, chord)
    }

    /// Delete a slot, shifting later slots down by one
    pub fn remove_slot(&mut self, position: usize) -> Result<()> {
        check_bounds(position, self.slots.len())?;
        self.slots.remove(position);
        debug!(position, len = self.slots.len(), "Slot removed");
        Ok(())
    }

    /// Empty a slot without changing the sequence length
    pub fn remove_chord(&mut self, position: usize) -> Result<()> {
        check_bounds(position, self.slots.len())?;
        self.slots[position] = None;
        debug!(position, "Chord cleared");
        Ok(())
    }

    /// Independent copy of the current state
    pub fn snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            key: self.key.clone(),
            chords: self.slots.clone(),
        }
    }
}

impl Default for ProgressionStore {
    fn default() -> Self {
        Self::new()
    }
}
