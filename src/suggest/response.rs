// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Response validation.
//!
//! Turns the generator's free text into a checked suggestion list in two
//! stages: a scan locates the first object that declares a
//! `chordSuggestions` array, then serde_json parses exactly that substring.
//! Checks run in order and the first failure wins.

use serde::Deserialize;

use super::chord_symbol::is_valid_chord_symbol;
use super::SUGGESTION_COUNT;
use crate::error::{Error, Result};

/// Field holding the suggestion array
pub const SUGGESTION_FIELD: &str = "chordSuggestions";

#[derive(Debug, Deserialize)]
struct SuggestionPayload {
    #[serde(rename = "chordSuggestions")]
    chord_suggestions: Vec<String>,
}

/// Validate a generator response and return its suggestions verbatim.
///
/// Fails with `InvalidResponse` when no suggestion object is found or it
/// does not parse, when the array does not hold exactly
/// [`SUGGESTION_COUNT`] entries, or on the first entry that is not a valid
/// chord symbol. Duplicate entries are accepted.
pub fn parse_suggestions(text: &str) -> Result<Vec<String>> {
    let candidate =
        extract_candidate(text).ok_or_else(|| Error::invalid_response("malformed JSON"))?;

    let payload: SuggestionPayload = serde_json::from_str(candidate)
        .map_err(|e| Error::invalid_response(format!("malformed JSON: {}", e)))?;
    let suggestions = payload.chord_suggestions;

    if suggestions.len() != SUGGESTION_COUNT {
        return Err(Error::invalid_response(format!(
            "wrong count: expected {}, got {}",
            SUGGESTION_COUNT,
            suggestions.len()
        )));
    }

    if let Some(bad) = suggestions.iter().find(|c| !is_valid_chord_symbol(c)) {
        return Err(Error::invalid_response(format!(
            "invalid chord symbol: {}",
            bad
        )));
    }

    Ok(suggestions)
}

/// Find the first balanced `{...}` whose top level has a
/// `"chordSuggestions": [` member. Prose, whitespace and markdown fences
/// around it are skipped.
///
/// One pass with a stack of open brackets. Quotes only start string
/// literals inside an open object, so stray quotes in prose are ignored.
pub fn extract_candidate(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut stack: Vec<Frame> = Vec::new();
    let mut earliest: Option<(usize, usize)> = None;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' if !stack.is_empty() => {
                let Some(close) = string_end(bytes, i) else {
                    break;
                };
                if let Some(Frame::Object { declares_field, .. }) = stack.last_mut() {
                    if &bytes[i + 1..close] == SUGGESTION_FIELD.as_bytes()
                        && opens_array_member(&bytes[close + 1..])
                    {
                        *declares_field = true;
                    }
                }
                i = close;
            }
            b'{' => stack.push(Frame::Object {
                start: i,
                declares_field: false,
            }),
            b'[' if !stack.is_empty() => stack.push(Frame::Array),
            b'}' | b']' if !stack.is_empty() => {
                if let Some(Frame::Object {
                    start,
                    declares_field: true,
                }) = stack.pop()
                {
                    if earliest.map_or(true, |(s, _)| start < s) {
                        earliest = Some((start, i));
                    }
                }
                // Anything opened after this point starts later
                if stack.is_empty() && earliest.is_some() {
                    break;
                }
            }
            _ => {}
        }
        i += 1;
    }

    // Both ends are ASCII braces, so the slice is on char boundaries
    earliest.map(|(start, end)| &text[start..=end])
}

/// An open bracket during the scan
enum Frame {
    Object { start: usize, declares_field: bool },
    Array,
}

/// Index of the quote closing the string literal that opens at `open`
fn string_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Whether `rest` starts with `: [` (any whitespace)
fn opens_array_member(rest: &[u8]) -> bool {
    let mut it = rest.iter().copied().filter(|b| !b.is_ascii_whitespace());
    it.next() == Some(b':') && it.next() == Some(b'[')
}
