//! The static registry of morphological fields.
//!
//! The taxonomy is fixed at compile time: eight grammatical categories, each
//! with a canonical value vocabulary. Every value the decoder produces belongs
//! to the vocabulary of its field; raw codes outside a vocabulary are dropped
//! before they ever reach a [`crate::construct::Parse`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A morphological category. The declaration order is the canonical field
/// order used everywhere fields are iterated (decoding, scoring, display).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Pos,
    Case,
    Number,
    Gender,
    Tense,
    Voice,
    Mood,
    Person,
}

impl Field {
    /// All fields, in canonical order.
    pub const ALL: [Field; 8] = [
        Field::Pos,
        Field::Case,
        Field::Number,
        Field::Gender,
        Field::Tense,
        Field::Voice,
        Field::Mood,
        Field::Person,
    ];

    /// Short identifier, as used in wire payloads and guess maps.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Pos => "pos",
            Field::Case => "case",
            Field::Number => "number",
            Field::Gender => "gender",
            Field::Tense => "tense",
            Field::Voice => "voice",
            Field::Mood => "mood",
            Field::Person => "person",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Pos => "Part of Speech",
            Field::Case => "Case",
            Field::Number => "Number",
            Field::Gender => "Gender",
            Field::Tense => "Tense",
            Field::Voice => "Voice",
            Field::Mood => "Mood",
            Field::Person => "Person",
        }
    }

    /// The canonical value vocabulary of this field. Decoded values are always
    /// members of this set; the decoder drops anything else.
    pub fn vocabulary(&self) -> &'static [&'static str] {
        match self {
            Field::Pos => &[
                "noun", "verb", "adj", "adv", "prep", "pron", "conj", "part", "article", "interj",
            ],
            Field::Case => &["nom", "gen", "dat", "acc", "voc"],
            Field::Number => &["sg", "pl"],
            Field::Gender => &["masc", "fem", "neut"],
            Field::Tense => &["pres", "impf", "fut", "aor", "perf", "plup"],
            Field::Voice => &["act", "mid", "pass", "mp"],
            Field::Mood => &["ind", "impv", "subj", "opt", "inf", "part"],
            Field::Person => &["1", "2", "3"],
        }
    }

    /// Drill options offered to a learner: the vocabulary plus the explicit
    /// "not applicable" placeholder. The placeholder is an input convention
    /// only and is never produced by the decoder.
    pub fn options(&self) -> Vec<&'static str> {
        let mut options: Vec<&'static str> = self.vocabulary().to_vec();
        options.push("—");
        options
    }

    /// Membership check against the canonical vocabulary.
    pub fn allows(&self, value: &str) -> bool {
        self.vocabulary().contains(&value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
