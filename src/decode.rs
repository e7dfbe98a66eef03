//! Normalization of heterogeneous morphological representations.
//!
//! Source data arrives in one of three shapes: an already-canonical field
//! record, a compact delimiter-separated tag string, or a record of
//! single-letter category codes (two letters for the article and the pronoun
//! subtypes). [`RawParse`] makes the shape explicit and [`decode`] maps all
//! three onto the same canonical [`Parse`]. Decoding is pure: the same raw
//! input always yields the same output.

use serde::Deserialize;

use crate::construct::Parse;
use crate::taxonomy::Field;

// ------------- Raw representations -------------
/// One raw morphological representation, discriminated explicitly rather than
/// probed at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawParse {
    /// Already-canonical taxonomy fields, passed through unchanged.
    Structured(Parse),
    /// Compact tag string, e.g. `"noun,dat,sg,fem"` or `"V 3 impf act ind"`.
    Compact(String),
    /// Per-category letter codes, e.g. `{pos:"N", case:"D", number:"S"}`.
    Coded(CodedTags),
}

/// The letter-coded variant as carried by the verse source: one optional code
/// per grammatical category.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct CodedTags {
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub case: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub tense: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub person: Option<String>,
}

impl CodedTags {
    pub fn is_empty(&self) -> bool {
        self.pos.is_none()
            && self.case.is_none()
            && self.number.is_none()
            && self.gender.is_none()
            && self.tense.is_none()
            && self.voice.is_none()
            && self.mood.is_none()
            && self.person.is_none()
    }
}

// ------------- Letter-code tables -------------
// MorphGNT category codes mapped to the canonical vocabulary. A code absent
// from its table is dropped, never passed through.
fn decode_code(field: Field, code: &str) -> Option<&'static str> {
    let value = match field {
        Field::Pos => match code {
            "N" => "noun",
            "V" => "verb",
            "RA" => "article",
            "RD" | "RR" | "RP" => "pron",
            "P" => "prep",
            "C" => "conj",
            "D" => "adv",
            "A" => "adj",
            "I" => "interj",
            "X" => "part",
            _ => return None,
        },
        Field::Case => match code {
            "N" => "nom",
            "G" => "gen",
            "D" => "dat",
            "A" => "acc",
            "V" => "voc",
            _ => return None,
        },
        Field::Number => match code {
            "S" => "sg",
            "P" => "pl",
            _ => return None,
        },
        Field::Gender => match code {
            "M" => "masc",
            "F" => "fem",
            "N" => "neut",
            _ => return None,
        },
        Field::Tense => match code {
            "P" => "pres",
            "I" => "impf",
            "F" => "fut",
            "A" => "aor",
            "X" => "perf",
            "Y" => "plup",
            _ => return None,
        },
        Field::Voice => match code {
            "A" => "act",
            "M" => "mid",
            "P" => "pass",
            _ => return None,
        },
        Field::Mood => match code {
            "I" => "ind",
            "S" => "subj",
            "O" => "opt",
            "N" => "inf",
            "P" => "part",
            "M" => "impv",
            _ => return None,
        },
        // person is carried as the literal digit, not mapped through a table
        Field::Person => match code {
            "1" => "1",
            "2" => "2",
            "3" => "3",
            _ => return None,
        },
    };
    Some(value)
}

fn decode_coded(tags: &CodedTags) -> Parse {
    let mut parse = Parse::new();
    let codes = [
        (Field::Pos, &tags.pos),
        (Field::Case, &tags.case),
        (Field::Number, &tags.number),
        (Field::Gender, &tags.gender),
        (Field::Tense, &tags.tense),
        (Field::Voice, &tags.voice),
        (Field::Mood, &tags.mood),
        (Field::Person, &tags.person),
    ];
    for (field, code) in codes {
        if let Some(code) = code {
            if let Some(value) = decode_code(field, code) {
                parse.set(field, value);
            }
        }
    }
    parse
}

// ------------- Compact tag strings -------------
const COMPACT_DELIMITERS: [char; 6] = ['.', ',', ';', ':', '/', ' '];

fn decode_compact(compact: &str) -> Parse {
    let mut parse = Parse::new();
    for token in compact.split(COMPACT_DELIMITERS) {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }
        // a token lands on the first not-yet-set field that recognizes it, in
        // canonical field order; "part" is therefore pos unless pos is taken.
        // unmatched tokens are dropped without complaint
        let target = Field::ALL
            .into_iter()
            .find(|field| parse.get(*field).is_none() && field.allows(&token));
        if let Some(field) = target {
            parse.set(field, token);
        }
    }
    parse
}

// ------------- decode -------------
/// Map one raw representation to the canonical field set.
///
/// Returns `None` rather than an empty [`Parse`] when no field could be
/// decoded, so callers can tell "no parse data" from "parse data with every
/// field unrecognized".
pub fn decode(raw: &RawParse) -> Option<Parse> {
    let parse = match raw {
        RawParse::Structured(parse) => parse.clone(),
        RawParse::Compact(compact) => decode_compact(compact),
        RawParse::Coded(tags) => decode_coded(tags),
    };
    if parse.is_empty() { None } else { Some(parse) }
}
