// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord progression state.
//!
//! This module provides:
//! - The progression store: key plus an ordered list of chord slots
//! - Snapshots: detached copies handed to the suggestion pipeline

pub mod store;

pub use store::{ProgressionSnapshot, ProgressionStore, DEFAULT_KEY};
