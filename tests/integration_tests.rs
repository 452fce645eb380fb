// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for chordsmith
//!
//! These tests drive the store and the suggestion pipeline together through
//! the public API, with scripted generators standing in for a model.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chordsmith::config::ProgressionFile;
use chordsmith::{
    Error, GenerationError, ProgressionStore, SuggestionPipeline, TextGenerator, SUGGESTION_COUNT,
};

const CHORDS: [&str; 12] = [
    "F#m", "D", "A/C#", "Bm7", "E7", "G", "C#m7", "Dmaj7", "E(sus4)", "A(add9)", "F#m7", "B7(b9)",
];

fn reply_with(chords: &[&str]) -> String {
    let quoted: Vec<String> = chords.iter().map(|c| format!("\"{}\"", c)).collect();
    format!("{{\"chordSuggestions\":[{}]}}", quoted.join(","))
}

/// Generator that plays back scripted replies and records prompts
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    delay: Duration,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Other("script exhausted".to_string())))
    }
}

fn a_major_store() -> ProgressionStore {
    let mut store = ProgressionStore::with_key("A major");
    for _ in 0..4 {
        store.add_slot(None).unwrap();
    }
    store.add_chord(0, "A").unwrap();
    store.add_chord(2, "D").unwrap();
    store.add_chord(3, "E7").unwrap();
    store
}

/// Test that a progression built slot by slot reads back in order
#[test]
fn test_build_and_read_back() {
    let chords = ["C", "Am", "F", "G7", "C/E"];
    let mut store = ProgressionStore::new();

    for _ in 0..chords.len() {
        store.add_slot(None).unwrap();
    }
    for (i, chord) in chords.iter().enumerate() {
        store.add_chord(i, *chord).unwrap();
    }

    let snapshot = store.snapshot();
    let read_back: Vec<&str> = snapshot.chords.iter().map(|c| c.as_deref().unwrap()).collect();
    assert_eq!(read_back, chords.to_vec());
}

/// Test a full request: store -> snapshot -> prompt -> reply -> suggestions
#[tokio::test]
async fn test_suggestion_flow() {
    let store = a_major_store();
    let generator = ScriptedGenerator::new(vec![Ok(reply_with(&CHORDS))]);
    let pipeline = SuggestionPipeline::new(generator);

    let suggestions = pipeline.suggest_chords(&store.snapshot(), 1).await.unwrap();
    assert_eq!(suggestions, CHORDS.to_vec());
    assert_eq!(suggestions.len(), SUGGESTION_COUNT);

    let prompts = pipeline.generator().prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(r#"Key: "A major""#));
    assert!(prompts[0].contains(r#"["A",null,"D","E7"]"#));
    assert!(prompts[0].contains("position 1"));
}

/// Test that replies wrapped in prose and a code fence still validate
#[tokio::test]
async fn test_wrapped_reply_accepted() {
    let reply = format!(
        "Here are my suggestions:\n\n```json\n{}\n```\n\nLet me know if you want more.",
        reply_with(&CHORDS)
    );
    let pipeline = SuggestionPipeline::new(ScriptedGenerator::new(vec![Ok(reply)]));

    let suggestions = pipeline.suggest_chords(&a_major_store().snapshot(), 0).await.unwrap();
    assert_eq!(suggestions, CHORDS.to_vec());
}

/// Test count and notation failures through the pipeline
#[tokio::test]
async fn test_rejected_replies() {
    let mut bad_symbol = CHORDS.to_vec();
    bad_symbol[6] = "C13#11b9";
    let mut thirteen = CHORDS.to_vec();
    thirteen.push("A");

    let pipeline = SuggestionPipeline::new(ScriptedGenerator::new(vec![
        Ok(reply_with(&CHORDS[..11])),
        Ok(reply_with(&thirteen)),
        Ok(reply_with(&bad_symbol)),
        Ok("```\nnot json at all\n```".to_string()),
    ]));
    let snapshot = a_major_store().snapshot();

    let mut reasons = Vec::new();
    for _ in 0..4 {
        match pipeline.suggest_chords(&snapshot, 1).await {
            Err(Error::InvalidResponse(reason)) => reasons.push(reason),
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    assert_eq!(reasons[0], "wrong count: expected 12, got 11");
    assert_eq!(reasons[1], "wrong count: expected 12, got 13");
    assert_eq!(reasons[2], "invalid chord symbol: C13#11b9");
    assert_eq!(reasons[3], "malformed JSON");
}

/// Test that generator failures come through untouched
#[tokio::test]
async fn test_generator_error_passthrough() {
    let pipeline = SuggestionPipeline::new(ScriptedGenerator::new(vec![Err(
        GenerationError::Api {
            status: 401,
            body: "bad key".to_string(),
        },
    )]));

    match pipeline.suggest_chords(&a_major_store().snapshot(), 2).await {
        Err(Error::ExternalGeneration(GenerationError::Api { status, body })) => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad key");
        }
        other => panic!("expected ExternalGeneration, got {:?}", other),
    }
}

/// Test that store changes during an in-flight request do not leak into it
#[tokio::test]
async fn test_store_mutation_during_request() {
    let mut store = a_major_store();
    let snapshot = store.snapshot();

    let generator = ScriptedGenerator::new(vec![Ok(reply_with(&CHORDS))])
        .with_delay(Duration::from_millis(20));
    let pipeline = SuggestionPipeline::new(generator);

    let request = pipeline.suggest_chords(&snapshot, 3);
    let mutate = async {
        store.remove_slot(3).unwrap();
        store.remove_slot(2).unwrap();
        store.set_key("F minor");
    };
    let (result, _) = tokio::join!(request, mutate);

    assert_eq!(result.unwrap(), CHORDS.to_vec());
    assert_eq!(store.len(), 2);
    assert_eq!(snapshot.len(), 4);
    assert_eq!(snapshot.key, "A major");
}

/// Test that independent requests can run side by side
#[tokio::test]
async fn test_concurrent_requests() {
    let generator = ScriptedGenerator::new(vec![
        Ok(reply_with(&CHORDS)),
        Ok(reply_with(&CHORDS)),
        Ok(reply_with(&CHORDS)),
    ])
    .with_delay(Duration::from_millis(10));
    let pipeline = SuggestionPipeline::new(generator);
    let snapshot = a_major_store().snapshot();

    let (a, b, c) = tokio::join!(
        pipeline.suggest_chords(&snapshot, 0),
        pipeline.suggest_chords(&snapshot, 1),
        pipeline.suggest_chords(&snapshot, 2),
    );

    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(pipeline.generator().prompts().len(), 3);
}

/// Test that a stale snapshot is still bounds-checked on its own terms
#[tokio::test]
async fn test_snapshot_bounds_checked() {
    let mut store = a_major_store();
    store.remove_slot(3).unwrap();

    let pipeline = SuggestionPipeline::new(ScriptedGenerator::new(vec![]));
    match pipeline.suggest_chords(&store.snapshot(), 3).await {
        Err(Error::InvalidPosition { index, len }) => {
            assert_eq!(index, 3);
            assert_eq!(len, 3);
        }
        other => panic!("expected InvalidPosition, got {:?}", other),
    }
    assert!(pipeline.generator().prompts().is_empty());
}

/// Test that a caller-side timeout wraps a slow request cleanly
#[tokio::test]
async fn test_caller_timeout() {
    let generator = ScriptedGenerator::new(vec![Ok(reply_with(&CHORDS))])
        .with_delay(Duration::from_millis(500));
    let pipeline = SuggestionPipeline::new(generator);
    let snapshot = a_major_store().snapshot();

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        pipeline.suggest_chords(&snapshot, 0),
    )
    .await;
    assert!(outcome.is_err());
}

/// Test that a session file replays into the same progression
#[test]
fn test_session_file_flow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.yaml");

    let store = a_major_store();
    ProgressionFile::from(store.snapshot()).save(&path).unwrap();

    let reloaded = ProgressionFile::load(&path).unwrap().to_store().unwrap();
    assert_eq!(reloaded.snapshot(), store.snapshot());
    assert_eq!(reloaded.chord(1).unwrap(), None);
}
