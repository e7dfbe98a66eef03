use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use parsedrill::construct::{LexiconDefinition, LexiconEntry};
use parsedrill::error::{ParsedrillError, Result};
use parsedrill::loader::{VerseLoader, format_reference, map_verse};
use parsedrill::source::{RawVerse, VerseSource};
use parsedrill::taxonomy::Field;

/// In-memory verse source; `None` payload simulates an unreachable service.
struct FakeVerse {
    payload: Option<serde_json::Value>,
    lookups: Arc<AtomicUsize>,
}

impl FakeVerse {
    fn serving(payload: serde_json::Value) -> Self {
        Self { payload: Some(payload), lookups: Arc::new(AtomicUsize::new(0)) }
    }
    fn unreachable() -> Self {
        Self { payload: None, lookups: Arc::new(AtomicUsize::new(0)) }
    }
    fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl VerseSource for &FakeVerse {
    async fn lookup(&self, _reference: &str) -> Result<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match &self.payload {
            Some(_) => Ok("/v0/verse/640101.json".to_string()),
            None => Err(ParsedrillError::Transport("verse service unreachable".into())),
        }
    }
    async fn fetch_verse(&self, _verse_id: &str) -> Result<RawVerse> {
        let payload = self
            .payload
            .clone()
            .ok_or_else(|| ParsedrillError::Transport("verse service unreachable".into()))?;
        serde_json::from_value(payload)
            .map_err(|e| ParsedrillError::Payload { message: e.to_string() })
    }
}

#[test]
fn references_are_trimmed_and_collapsed() {
    assert_eq!(format_reference("  Jn   1:1 "), "Jn 1:1");
    assert_eq!(format_reference("John\t1.2"), "John 1.2");
    assert_eq!(format_reference("   "), "");
}

#[test]
fn mapping_covers_all_three_raw_representations() {
    let raw: RawVerse = serde_json::from_value(json!({
        "@id": "/v0/verse/000000.json",
        "title": "Test 1.1",
        "words": [
            { "text": "ἀρχῇ", "lemma": "ἀρχή", "pos": "N", "case": "D", "number": "S", "gender": "F" },
            { "text": "ἀρχῇ", "lemma": "ἀρχή", "morph": "noun,dat,sg,fem" },
            { "text": "ἀρχῇ", "lemma": "ἀρχή",
              "parse": { "pos": "noun", "case": "dat", "number": "sg", "gender": "fem" } }
        ]
    }))
    .unwrap();
    let verse = map_verse(&raw);
    let parses: Vec<_> = verse.words().iter().map(|word| word.parse().cloned()).collect();
    assert!(parses[0].is_some());
    assert_eq!(parses[0], parses[1], "letter codes and compact string must map identically");
    assert_eq!(parses[1], parses[2], "compact string and structured record must map identically");
}

#[test]
fn word_ids_fall_back_to_position() {
    let raw: RawVerse = serde_json::from_value(json!({
        "@id": "/v0/verse/640101.json",
        "title": "John 1.1",
        "words": [
            { "@id": "w-640101-01", "text": "Ἐν", "lemma": "ἐν", "pos": "P" },
            { "text": "ἀρχῇ", "lemma": "ἀρχή", "pos": "N" }
        ]
    }))
    .unwrap();
    let verse = map_verse(&raw);
    assert_eq!(verse.words()[0].id(), "w-640101-01");
    assert_eq!(verse.words()[1].id(), "/v0/verse/640101.json-1");
}

#[test]
fn surface_prefers_text_then_word_then_crit_text() {
    let raw: RawVerse = serde_json::from_value(json!({
        "title": "Test 1.1",
        "words": [
            { "text": "α", "word": "β", "crit_text": "γ" },
            { "word": "β", "crit_text": "γ" },
            { "crit_text": "γ" },
            {}
        ]
    }))
    .unwrap();
    let verse = map_verse(&raw);
    let surfaces: Vec<&str> = verse.words().iter().map(|word| word.surface()).collect();
    assert_eq!(surfaces, ["α", "β", "γ", ""]);
    // words with no morphological representation at all carry no parse
    assert!(verse.words()[3].parse().is_none());
}

#[tokio::test]
async fn verses_load_through_the_source() {
    let source = FakeVerse::serving(json!({
        "@id": "/v0/verse/640101.json",
        "title": "John 1.1",
        "words": [
            { "text": "Ἐν", "lemma": "ἐν", "pos": "P" },
            { "text": "ἀρχῇ", "lemma": "ἀρχή", "pos": "N", "case": "D", "number": "S", "gender": "F" }
        ]
    }));
    let loader = VerseLoader::new(&source);
    let verse = loader.load("Jn 1:1").await.expect("verse should load");
    assert_eq!(verse.reference(), "John 1.1");
    assert_eq!(verse.words().len(), 2);
    let parse = verse.words()[1].parse().expect("second word carries gold fields");
    assert_eq!(parse.get(Field::Pos), Some("noun"));
    assert_eq!(parse.get(Field::Case), Some("dat"));
    assert_eq!(parse.get(Field::Number), Some("sg"));
    assert_eq!(parse.get(Field::Gender), Some("fem"));
}

#[tokio::test]
async fn blank_references_fail_without_touching_the_source() {
    let source = FakeVerse::unreachable();
    let loader = VerseLoader::new(&source);
    let err = loader.load("   ").await.unwrap_err();
    assert!(matches!(err, ParsedrillError::Lookup(_)));
    assert_eq!(source.lookup_count(), 0);
}

#[tokio::test]
async fn known_references_fall_back_when_the_source_is_down() {
    let source = FakeVerse::unreachable();
    let loader = VerseLoader::new(&source);

    let verse = loader.load("Jn 1:1").await.expect("Jn 1:1 has a built-in fallback");
    assert_eq!(verse.words().len(), 17);
    assert!(
        verse.words().iter().all(|word| word.parse().is_some()),
        "every fallback word must be fully decodable"
    );
    assert!(verse.words().iter().all(|word| word.lemma().is_some()));

    // tolerant of separator and case variants
    for reference in ["jn 1.2", "JOHN 1:2", "John  1.2"] {
        let verse = loader
            .load(reference)
            .await
            .unwrap_or_else(|e| panic!("{reference:?} should fall back: {e}"));
        assert_eq!(verse.words().len(), 7);
        let first = verse.words()[0].parse().expect("οὗτος carries gold fields");
        assert_eq!(first.get(Field::Pos), Some("pron"));
        assert_eq!(first.get(Field::Case), Some("nom"));
    }
}

#[tokio::test]
async fn unknown_references_surface_a_lookup_failure() {
    let source = FakeVerse::unreachable();
    let loader = VerseLoader::new(&source);
    let err = loader.load("Mt 5:3").await.unwrap_err();
    assert!(matches!(err, ParsedrillError::Lookup(_)), "got {err}");
}

#[tokio::test]
async fn definitions_merge_into_a_replacement_verse() {
    let source = FakeVerse::serving(json!({
        "@id": "/v0/verse/640101.json",
        "title": "John 1.1",
        "words": [
            { "text": "Ἐν", "lemma": "ἐν", "pos": "P" },
            { "text": "λόγος", "lemma": "λόγος", "pos": "N", "case": "N", "number": "S", "gender": "M" },
            { "text": "καὶ" }
        ]
    }));
    let loader = VerseLoader::new(&source);
    let verse = loader.load("Jn 1:1").await.unwrap();

    let mut resolved = HashMap::new();
    resolved.insert(
        "λόγος".to_string(),
        LexiconEntry::new("3056", "λόγος", vec![LexiconDefinition::new("brief", "a word")]),
    );
    let merged = verse.with_definitions(&resolved);

    // the original is untouched, the replacement carries the definition
    assert!(verse.words().iter().all(|word| word.definition().is_none()));
    let definition = merged.words()[1].definition().expect("λόγος resolved");
    assert_eq!(definition.brief.as_deref(), Some("a word"));
    assert!(merged.words()[0].definition().is_none(), "unresolved lemma stays absent");
    assert!(merged.words()[2].definition().is_none(), "a word without a lemma stays absent");
    // order and identity of words are preserved
    assert_eq!(merged.words().len(), verse.words().len());
    assert_eq!(merged.words()[1].id(), verse.words()[1].id());
}
