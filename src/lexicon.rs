//! Letter-sharded lexicon cache and lemma resolution.
//!
//! Dictionary entries are fetched one letter shard at a time and kept by a
//! [`ShardKeeper`] for the lifetime of the process: shards are added lazily,
//! never evicted and never overwritten. A shard that fails to fetch is kept as
//! an empty entry list, so later lookups for the same letter do not refetch
//! within the same run; a fresh process retries.
//!
//! Matching a lemma against its shard applies three tiers in fixed priority:
//! exact match on the primary orthographic form, exact match on the entire raw
//! form list, and prefix match on the raw form list for lemmas of at least
//! three characters (a one-letter article must not prefix-match an unrelated
//! headword).

use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::sync::{Arc, Mutex};

use futures_util::future::join_all;
use seahash::SeaHasher;
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::construct::LexiconEntry;
use crate::source::LexiconSource;

pub type ShardHasher = BuildHasherDefault<SeaHasher>;

/// The shard a lemma belongs to: its first character, canonically decomposed,
/// stripped of combining marks and case-folded. Empty lemmas have no shard.
pub fn shard_key(lemma: &str) -> Option<char> {
    let first = lemma.chars().next()?;
    first
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .next()
}

/// Tier matching within one shard; first hit wins, no hit yields `None`.
pub fn find_entry<'a>(entries: &'a [LexiconEntry], lemma: &str) -> Option<&'a LexiconEntry> {
    // tier 1: exact match on the primary form (the text before the first comma)
    if let Some(entry) = entries.iter().find(|entry| entry.primary_form() == lemma) {
        return Some(entry);
    }
    // tier 2: exact match on the entire raw form list, e.g. "ὁ, ἡ, τό"
    if let Some(entry) = entries.iter().find(|entry| entry.orth() == lemma) {
        return Some(entry);
    }
    // tier 3: prefix match, only for lemmas long enough not to match spuriously
    if lemma.chars().count() >= 3 {
        return entries.iter().find(|entry| entry.orth().starts_with(lemma));
    }
    None
}

// ------------- ShardKeeper -------------
/// Keeper of fetched shards, keyed by normalized letter. Append-only: the
/// first writer for a letter wins and a finalized shard is never replaced.
#[derive(Debug)]
pub struct ShardKeeper {
    kept: HashMap<char, Arc<Vec<LexiconEntry>>, ShardHasher>,
}

impl ShardKeeper {
    pub fn new() -> Self {
        Self { kept: HashMap::default() }
    }
    pub fn keep(&mut self, letter: char, entries: Vec<LexiconEntry>) -> Arc<Vec<LexiconEntry>> {
        Arc::clone(
            self.kept
                .entry(letter)
                .or_insert_with(|| Arc::new(entries)),
        )
    }
    pub fn get(&self, letter: &char) -> Option<Arc<Vec<LexiconEntry>>> {
        self.kept.get(letter).map(Arc::clone)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

impl Default for ShardKeeper {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- Resolver -------------
/// Resolves lemmas to lexicon entries through the shard keeper, fetching
/// missing shards from the source on demand.
pub struct Resolver<S: LexiconSource> {
    source: S,
    shard_keeper: Arc<Mutex<ShardKeeper>>,
}

impl<S: LexiconSource> Resolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            shard_keeper: Arc::new(Mutex::new(ShardKeeper::new())),
        }
    }
    pub fn shard_keeper(&self) -> Arc<Mutex<ShardKeeper>> {
        Arc::clone(&self.shard_keeper)
    }

    /// The cached shard for a letter, fetching it first if this is the first
    /// demand. The keeper lock is never held across the fetch.
    async fn shard(&self, letter: char) -> Arc<Vec<LexiconEntry>> {
        if let Some(entries) = self.shard_keeper.lock().unwrap().get(&letter) {
            return entries;
        }
        let entries = match self.source.fetch_shard(letter).await {
            Ok(payload) => {
                debug!(%letter, entries = payload.entries.len(), "shard fetched");
                payload.entries
            }
            Err(e) => {
                // kept as empty: the letter will not be refetched this run
                warn!(%letter, error = %e, "shard fetch failed, keeping empty shard");
                Vec::new()
            }
        };
        self.shard_keeper.lock().unwrap().keep(letter, entries)
    }

    /// Resolve one lemma to its entry. An empty lemma resolves to `None`
    /// without touching the source.
    pub async fn resolve(&self, lemma: &str) -> Option<LexiconEntry> {
        let letter = shard_key(lemma)?;
        let entries = self.shard(letter).await;
        find_entry(&entries, lemma).cloned()
    }

    /// Resolve a batch of lemmas. Each distinct shard is fetched at most once
    /// even when many lemmas share it, and fetches for distinct letters run
    /// concurrently; every lemma's tier matching runs only once its shard has
    /// completed.
    pub async fn resolve_many(&self, lemmas: &[String]) -> HashMap<String, LexiconEntry> {
        let mut letters: Vec<char> = lemmas.iter().filter_map(|lemma| shard_key(lemma)).collect();
        letters.sort_unstable();
        letters.dedup();
        join_all(letters.into_iter().map(|letter| self.shard(letter))).await;

        let mut resolved = HashMap::new();
        for lemma in lemmas {
            if resolved.contains_key(lemma) {
                continue;
            }
            if let Some(entry) = self.resolve(lemma).await {
                resolved.insert(lemma.clone(), entry);
            }
        }
        resolved
    }
}
