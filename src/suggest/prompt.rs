// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Prompt construction.
//!
//! Encodes a progression snapshot and a target slot as one instruction
//! text for the generator.

use serde_json::Value;

use super::response::SUGGESTION_FIELD;
use super::SUGGESTION_COUNT;
use crate::progression::ProgressionSnapshot;

/// Render the slots as a JSON array with `null` for empty slots
pub fn render_chords(snapshot: &ProgressionSnapshot) -> String {
    Value::Array(
        snapshot
            .chords
            .iter()
            .map(|slot| match slot {
                Some(chord) => Value::String(chord.clone()),
                None => Value::Null,
            })
            .collect(),
    )
    .to_string()
}

/// Build the instruction text for suggesting chords at `position`.
///
/// `position` is expected to be in range; the pipeline checks it first.
pub fn build_prompt(snapshot: &ProgressionSnapshot, position: usize) -> String {
    let key = Value::String(snapshot.key.clone());
    let chords = render_chords(snapshot);
    let current = match snapshot.chords.get(position) {
        Some(Some(chord)) => format!(
            "That slot currently holds {}; suggest chords that could go there instead or keep it.",
            Value::String(chord.clone())
        ),
        _ => "That slot is currently empty.".to_string(),
    };

    format!(
        "You are helping a musician write a chord progression.\n\
         \n\
         Key: {key}\n\
         Progression: {chords}\n\
         Empty slots are shown as null.\n\
         \n\
         Suggest chords for the slot at position {position}. Positions are zero-indexed: \
         position 0 is the first chord in the progression, position 1 the second, and so on. \
         {current}\n\
         \n\
         Rules:\n\
         - Give exactly {count} different chords, ordered from the best harmonic fit to the least.\n\
         - Stay within simple Western tonal harmony that fits the key and the surrounding chords.\n\
         - Do not repeat a chord in the list.\n\
         - Use standard chord notation: a root A-G with optional # or b, then optionally one of \
         maj, min, m, dim, aug (each optionally followed by 7), or a bare extension \
         (2, 4, 5, 6, 7, 9, 11, 13).\n\
         - Put suspensions, added tones and alterations in parentheses, one per pair, \
         e.g. C(sus4), G7(b9), Dm7(b5), F(add9).\n\
         - An optional bass note goes after a slash, e.g. C/E.\n\
         - Keep symbols simple; at most two parenthesized modifiers per chord.\n\
         \n\
         Respond with strict JSON only, no prose and no markdown, in exactly this shape:\n\
         {{\"{field}\": [\"<chord 1>\", \"<chord 2>\", ..., \"<chord {count}>\"]}}\n\
         The array must contain exactly {count} strings.",
        key = key,
        chords = chords,
        position = position,
        current = current,
        count = SUGGESTION_COUNT,
        field = SUGGESTION_FIELD,
    )
}
