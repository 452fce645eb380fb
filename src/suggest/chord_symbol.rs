// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord symbol notation.
//!
//! Recognizes the restricted notation accepted from the text generator:
//!
//! ```text
//! symbol    := root quality? extension? modifier* bass?
//! root      := [A-G] ('#' | 'b')?
//! quality   := ('maj' | 'min' | 'dim' | 'aug' | 'm') '7'?
//! extension := '13' | '11' | '9' | '7' | '6' | '5' | '4' | '2'
//! modifier  := '(' (sus2 | sus4 | add2 | add4 | add9 | add11 | add13
//!                   | ('#' | 'b') ('5' | '9' | '11' | '13')) ')'
//! bass      := '/' [A-G] ('#' | 'b')?
//! ```
//!
//! An extension is only allowed when the quality has no explicit seventh,
//! and alterations must be bracketed, so `C13#11b9` is rejected while
//! `C13(#11)(b9)` is accepted. This is notation only; nothing here knows
//! which notes a chord contains.

/// Chord quality marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    /// `maj`
    Major,
    /// `m` or `min`
    Minor,
    /// `dim`
    Diminished,
    /// `aug`
    Augmented,
}

/// Quality spellings, longest first so `maj`/`min` win over `m`
const QUALITY_TOKENS: [(&str, Quality); 5] = [
    ("maj", Quality::Major),
    ("min", Quality::Minor),
    ("dim", Quality::Diminished),
    ("aug", Quality::Augmented),
    ("m", Quality::Minor),
];

const EXTENSIONS: [&str; 8] = ["13", "11", "9", "7", "6", "5", "4", "2"];

const MODIFIERS: [&str; 13] = [
    "sus2", "sus4", "add2", "add4", "add9", "add11", "add13", "b5", "#5", "b9", "#9", "#11",
    "b13",
];

/// A chord symbol split into its notational parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSymbol {
    /// Root letter with optional accidental, e.g. `F#`
    pub root: String,
    /// Quality as written (`m` or `min`, ...) and what it denotes
    pub quality: Option<(String, Quality)>,
    /// Whether the quality carries an explicit `7`
    pub seventh: bool,
    /// Bare numeric extension, e.g. `9` in `C9`
    pub extension: Option<u8>,
    /// Bracketed modifiers without parentheses, e.g. `sus4`, `#11`
    pub modifiers: Vec<String>,
    /// Slash bass note
    pub bass: Option<String>,
}

impl ChordSymbol {
    /// Parse a whole string as a chord symbol. No trimming is done.
    pub fn parse(text: &str) -> Option<Self> {
        let mut cursor = Cursor { rest: text };

        let root = cursor.note()?;

        let (quality, seventh) = match cursor.eat_quality() {
            Some((spelling, kind)) => (Some((spelling.to_string(), kind)), cursor.eat("7")),
            None => (None, false),
        };

        let extension = if seventh {
            None
        } else {
            cursor
                .eat_any(&EXTENSIONS)
                .and_then(|e| e.parse::<u8>().ok())
        };

        let mut modifiers = Vec::new();
        while cursor.eat("(") {
            let modifier = cursor.eat_any(&MODIFIERS)?;
            if !cursor.eat(")") {
                return None;
            }
            modifiers.push(modifier.to_string());
        }

        let bass = if cursor.eat("/") {
            Some(cursor.note()?)
        } else {
            None
        };

        if !cursor.rest.is_empty() {
            return None;
        }

        Some(Self {
            root,
            quality,
            seventh,
            extension,
            modifiers,
            bass,
        })
    }
}

/// Whether `text` is a well-formed chord symbol
pub fn is_valid_chord_symbol(text: &str) -> bool {
    ChordSymbol::parse(text).is_some()
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn eat(&mut self, token: &str) -> bool {
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn eat_any(&mut self, tokens: &[&'static str]) -> Option<&'static str> {
        let token = tokens.iter().copied().find(|t| self.rest.starts_with(*t))?;
        self.rest = &self.rest[token.len()..];
        Some(token)
    }

    fn eat_quality(&mut self) -> Option<(&'static str, Quality)> {
        let (spelling, kind) = QUALITY_TOKENS
            .iter()
            .copied()
            .find(|(t, _)| self.rest.starts_with(*t))?;
        self.rest = &self.rest[spelling.len()..];
        Some((spelling, kind))
    }

    /// Letter A-G with optional `#` or `b`
    fn note(&mut self) -> Option<String> {
        let letter = self.rest.chars().next().filter(|c| ('A'..='G').contains(c))?;
        self.rest = &self.rest[1..];
        let mut note = letter.to_string();
        if let Some(acc) = self.eat_any(&["#", "b"]) {
            note.push_str(acc);
        }
        Some(note)
    }
}
