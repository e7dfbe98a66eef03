use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::taxonomy::Field;

// ------------- Parse -------------
/// A sparse morphological analysis: one optional slot per taxonomy field.
///
/// Absence of a slot means the source never supplied that field. This is
/// semantically distinct from an empty or placeholder value and is never
/// coerced to one.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
}

impl Parse {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Pos => self.pos.as_deref(),
            Field::Case => self.case.as_deref(),
            Field::Number => self.number.as_deref(),
            Field::Gender => self.gender.as_deref(),
            Field::Tense => self.tense.as_deref(),
            Field::Voice => self.voice.as_deref(),
            Field::Mood => self.mood.as_deref(),
            Field::Person => self.person.as_deref(),
        }
    }
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            Field::Pos => self.pos = value,
            Field::Case => self.case = value,
            Field::Number => self.number = value,
            Field::Gender => self.gender = value,
            Field::Tense => self.tense = value,
            Field::Voice => self.voice = value,
            Field::Mood => self.mood = value,
            Field::Person => self.person = value,
        }
    }
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_none())
    }
    /// Present fields, in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .iter()
            .filter_map(|field| self.get(*field).map(|value| (*field, value)))
    }
}

impl fmt::Display for Parse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        for (field, value) in self.entries() {
            s += &format!("{field}:{value},");
        }
        s.pop();
        write!(f, "{{{}}}", s)
    }
}

// ------------- Definition -------------
/// The merged per-word view of lexicon data: the first brief and the first
/// full definition found on the resolved entry. Either may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
}

impl Definition {
    pub fn is_empty(&self) -> bool {
        self.brief.is_none() && self.full.is_none()
    }
}

// ------------- LexiconEntry -------------
/// One dictionary entry as carried by a letter shard.
///
/// `orth` is the raw comma-joined orthographic form list exactly as the source
/// stores it (e.g. `"ὁ, ἡ, τό"`); the primary form is the text before the
/// first comma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    #[serde(rename = "n")]
    headword: String,
    orth: String,
    #[serde(default)]
    definitions: Vec<LexiconDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconDefinition {
    role: String,
    text: String,
}

impl LexiconDefinition {
    pub const BRIEF: &'static str = "brief";
    pub const FULL: &'static str = "full";

    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self { role: role.into(), text: text.into() }
    }
    pub fn role(&self) -> &str {
        &self.role
    }
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl LexiconEntry {
    pub fn new(
        headword: impl Into<String>,
        orth: impl Into<String>,
        definitions: Vec<LexiconDefinition>,
    ) -> Self {
        Self { headword: headword.into(), orth: orth.into(), definitions }
    }
    pub fn headword(&self) -> &str {
        &self.headword
    }
    pub fn orth(&self) -> &str {
        &self.orth
    }
    /// The text before the first comma of the form list, trimmed.
    pub fn primary_form(&self) -> &str {
        self.orth.split(',').next().unwrap_or("").trim()
    }
    /// All comma-delimited orthographic forms, in source order.
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        self.orth.split(',').map(str::trim)
    }
    fn definition_with_role(&self, role: &str) -> Option<&str> {
        self.definitions
            .iter()
            .find(|d| d.role == role)
            .map(|d| d.text.as_str())
    }
    /// The first definition tagged "brief", if any.
    pub fn brief(&self) -> Option<&str> {
        self.definition_with_role(LexiconDefinition::BRIEF)
    }
    /// The first definition tagged "full", if any.
    pub fn full(&self) -> Option<&str> {
        self.definition_with_role(LexiconDefinition::FULL)
    }
    pub fn definition(&self) -> Definition {
        Definition {
            brief: self.brief().map(String::from),
            full: self.full().map(String::from),
        }
    }
}

impl fmt::Display for LexiconEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.headword, self.orth)
    }
}

// ------------- Word -------------
/// One word of a verse in canonical form, unique by `id` within its verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    id: String,
    surface: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lemma: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse: Option<Parse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    definition: Option<Definition>,
}

impl Word {
    pub fn new(
        id: impl Into<String>,
        surface: impl Into<String>,
        lemma: Option<String>,
        parse: Option<Parse>,
    ) -> Self {
        Self {
            id: id.into(),
            surface: surface.into(),
            lemma,
            parse,
            definition: None,
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn surface(&self) -> &str {
        &self.surface
    }
    pub fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }
    pub fn parse(&self) -> Option<&Parse> {
        self.parse.as_ref()
    }
    pub fn definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.parse {
            Some(parse) => write!(f, "{} {}", self.surface, parse),
            None => write!(f, "{}", self.surface),
        }
    }
}

// ------------- Verse -------------
/// An ordered verse of canonical words. Created fresh on every load and
/// immutable once produced; merging lexicon data builds a replacement verse
/// rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verse {
    reference: String,
    words: Vec<Word>,
}

impl Verse {
    pub fn new(reference: impl Into<String>, words: Vec<Word>) -> Self {
        Self { reference: reference.into(), words }
    }
    pub fn reference(&self) -> &str {
        &self.reference
    }
    pub fn words(&self) -> &[Word] {
        &self.words
    }
    /// Lemmas of all words that carry one, in verse order, duplicates kept.
    pub fn lemmas(&self) -> Vec<String> {
        self.words
            .iter()
            .filter_map(|word| word.lemma.clone())
            .collect()
    }
    /// A replacement verse with resolved definitions merged onto its words.
    /// Words without a lemma, or whose lemma did not resolve, keep an absent
    /// definition. Word order is preserved.
    pub fn with_definitions(&self, resolved: &HashMap<String, LexiconEntry>) -> Verse {
        let words = self
            .words
            .iter()
            .map(|word| {
                let definition = word
                    .lemma
                    .as_ref()
                    .and_then(|lemma| resolved.get(lemma))
                    .map(LexiconEntry::definition)
                    .filter(|definition| !definition.is_empty());
                Word { definition, ..word.clone() }
            })
            .collect();
        Verse { reference: self.reference.clone(), words }
    }
}

impl fmt::Display for Verse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let surfaces: Vec<&str> = self.words.iter().map(Word::surface).collect();
        write!(f, "{}: {}", self.reference, surfaces.join(" "))
    }
}
