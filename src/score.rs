//! Comparison of a learner's guess against the gold analysis.
//!
//! Scoring walks the taxonomy in canonical field order. A field counts toward
//! the total only when the gold analysis supplies a value for it; fields the
//! gold data never provided are not markable right or wrong and produce no
//! detail record at all.

use serde::Serialize;

use crate::construct::Parse;
use crate::taxonomy::Field;

/// Trim, lowercase, and collapse the placeholder spellings to "absent".
pub fn normalize_missing(value: Option<&str>) -> Option<String> {
    let normalized = value?.trim().to_lowercase();
    match normalized.as_str() {
        "" | "-" | "—" | "na" | "none" => None,
        _ => Some(normalized),
    }
}

/// Verdict for a single scorable field. Gold and guess carry the normalized
/// values that were compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldScore {
    pub field: Field,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guess: Option<String>,
}

/// Aggregate verdict for one word, produced fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub correct: usize,
    pub total: usize,
    pub details: Vec<FieldScore>,
}

impl ScoreResult {
    /// A word with no scorable gold fields is never "fully correct"; that
    /// would reward words carrying no gold data at all.
    pub fn is_fully_correct(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

/// Compare a guess to the gold analysis, field by field.
pub fn score(gold: Option<&Parse>, guess: &Parse) -> ScoreResult {
    let mut correct = 0;
    let mut total = 0;
    let mut details = Vec::new();
    for field in Field::ALL {
        let Some(gold_value) = normalize_missing(gold.and_then(|parse| parse.get(field))) else {
            // field not provided by the gold data -> ignored
            continue;
        };
        let guess_value = normalize_missing(guess.get(field));
        total += 1;
        let ok = guess_value.as_deref() == Some(gold_value.as_str());
        if ok {
            correct += 1;
        }
        details.push(FieldScore {
            field,
            ok,
            gold: Some(gold_value),
            guess: guess_value,
        });
    }
    ScoreResult { correct, total, details }
}
