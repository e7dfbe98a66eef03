//! Parsedrill – a core engine for drilling ancient-Greek morphological parsing.
//!
//! Parsedrill centers on three pieces of machinery:
//! * The **tag decoder** ([`decode`]) normalizes heterogeneous morphological
//!   representations – already-structured records, compact tag strings, and
//!   MorphGNT-style single-letter code records – into one canonical field set
//!   drawn from the fixed [`taxonomy`].
//! * The **lexicon resolver** ([`lexicon`]) fetches per-letter dictionary
//!   shards on demand, keeps them for the process lifetime in a
//!   [`lexicon::ShardKeeper`], and resolves a lemma to its entry through a
//!   three-tier match policy (exact primary form, exact raw form list, then
//!   prefix for lemmas of three or more characters).
//! * The **scoring engine** ([`score`]) compares a learner's guessed analysis
//!   to the gold analysis field by field; fields the gold data never supplied
//!   are excluded from scoring entirely.
//!
//! ## Modules
//! * [`construct`] – Canonical building blocks: [`construct::Parse`],
//!   [`construct::Word`], [`construct::Verse`], [`construct::LexiconEntry`].
//! * [`taxonomy`] – The static registry of morphological fields and their
//!   canonical value vocabularies.
//! * [`decode`] – The [`decode::RawParse`] tagged union and the decoder.
//! * [`lexicon`] – Shard keeper, shard-key derivation, tier matching and the
//!   [`lexicon::Resolver`].
//! * [`loader`] – The [`loader::VerseLoader`], reference formatting and the
//!   built-in fallback verses.
//! * [`score`] – Guess-versus-gold comparison.
//! * [`source`] – The fetch-and-parse boundary: source traits plus the HTTP
//!   implementations backed by the MorphGNT API and the Dodson lexicon shards.
//! * [`error`] – The crate error type and `Result` alias.
//!
//! ## Quick Start
//! ```
//! use parsedrill::construct::Parse;
//! use parsedrill::decode::{decode, CodedTags, RawParse};
//! use parsedrill::score::score;
//!
//! let raw = RawParse::Coded(CodedTags {
//!     pos: Some("N".into()),
//!     case: Some("D".into()),
//!     number: Some("S".into()),
//!     gender: Some("F".into()),
//!     ..CodedTags::default()
//! });
//! let gold = decode(&raw).unwrap();
//! assert_eq!(gold.case.as_deref(), Some("dat"));
//!
//! let mut guess = Parse::new();
//! guess.pos = Some("noun".into());
//! guess.case = Some("gen".into());
//! guess.number = Some("sg".into());
//! guess.gender = Some("fem".into());
//! let result = score(Some(&gold), &guess);
//! assert_eq!((result.correct, result.total), (3, 4));
//! ```
//!
//! ## Concurrency
//! All I/O runs on the tokio runtime as cooperative suspension points. The
//! shard keeper is the only shared mutable state; it grows monotonically and
//! its lock is never held across an await, so concurrent resolutions either
//! miss a letter (and fetch it) or observe a finalized shard.

pub mod construct;
pub mod decode;
pub mod error;
pub mod lexicon;
pub mod loader;
pub mod score;
pub mod source;
pub mod taxonomy;

// the consumer-facing surface
pub use construct::{Definition, LexiconEntry, Parse, Verse, Word};
pub use decode::{CodedTags, RawParse, decode};
pub use error::{ParsedrillError, Result};
pub use lexicon::Resolver;
pub use loader::VerseLoader;
pub use score::{ScoreResult, score};
pub use taxonomy::Field;
