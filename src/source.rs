//! The fetch-and-parse boundary toward the external verse and lexicon
//! services.
//!
//! The core never talks HTTP directly; it goes through [`VerseSource`] and
//! [`LexiconSource`], so tests substitute in-memory collaborators and the
//! binary wires up the [`HttpVerseSource`] / [`HttpLexiconSource`] pair. Both
//! HTTP sources treat a non-success status as a transport error; what that
//! means for the caller (fallback verse, empty shard) is decided upstream.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::construct::{LexiconEntry, Parse};
use crate::decode::{CodedTags, RawParse};
use crate::error::{ParsedrillError, Result};

// ------------- Wire payloads -------------
/// One letter shard as served by the lexicon source.
#[derive(Debug, Clone, Deserialize)]
pub struct ShardPayload {
    pub letter: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub entries: Vec<LexiconEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerseLookupPayload {
    #[serde(default)]
    pub verse_id: Option<String>,
}

/// One raw word as served by the verse source. The morphological analysis can
/// arrive as an already-structured `parse` record, a compact `morph` tag
/// string, or top-level single-letter category codes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWord {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub crit_text: Option<String>,
    #[serde(default)]
    pub lemma: Option<String>,
    #[serde(default)]
    pub parse: Option<Parse>,
    #[serde(default)]
    pub morph: Option<String>,
    #[serde(flatten)]
    pub tags: CodedTags,
}

impl RawWord {
    /// The surface form: first non-empty of `text`, `word`, `crit_text`.
    pub fn surface(&self) -> &str {
        [&self.text, &self.word, &self.crit_text]
            .into_iter()
            .filter_map(|candidate| candidate.as_deref())
            .find(|candidate| !candidate.is_empty())
            .unwrap_or("")
    }
    /// Discriminate the raw representation, in fixed priority: structured
    /// record first, then compact string, then letter codes.
    pub fn raw_parse(&self) -> Option<RawParse> {
        if let Some(parse) = &self.parse {
            return Some(RawParse::Structured(parse.clone()));
        }
        if let Some(morph) = &self.morph {
            return Some(RawParse::Compact(morph.clone()));
        }
        if !self.tags.is_empty() {
            return Some(RawParse::Coded(self.tags.clone()));
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVerse {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub words: Vec<RawWord>,
}

// ------------- Source traits -------------
/// Verse lookup and retrieval, in two steps like the upstream service: a
/// human-entered reference resolves to a verse id, the id to a payload.
pub trait VerseSource {
    fn lookup(&self, reference: &str) -> impl Future<Output = Result<String>> + Send;
    fn fetch_verse(&self, verse_id: &str) -> impl Future<Output = Result<RawVerse>> + Send;
}

/// Retrieval of one lexicon shard by its normalized first letter.
pub trait LexiconSource {
    fn fetch_shard(&self, letter: char) -> impl Future<Output = Result<ShardPayload>> + Send;
}

// ------------- HTTP sources -------------
async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    debug!(%url, "fetching");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ParsedrillError::Transport(format!("{status} for {url}")));
    }
    response
        .json()
        .await
        .map_err(|e| ParsedrillError::Payload { message: e.to_string() })
}

pub struct HttpVerseSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVerseSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl VerseSource for HttpVerseSource {
    async fn lookup(&self, reference: &str) -> Result<String> {
        // the url parser percent-encodes the reference inside the query part
        let url = format!("{}/v0/verse-lookup/?{}", self.base_url, reference);
        let payload: VerseLookupPayload = get_json(&self.client, &url).await?;
        payload
            .verse_id
            .ok_or_else(|| ParsedrillError::Lookup(format!("no verse id for {reference}")))
    }

    async fn fetch_verse(&self, verse_id: &str) -> Result<RawVerse> {
        let url = format!("{}{}", self.base_url, verse_id);
        get_json(&self.client, &url).await
    }
}

pub struct HttpLexiconSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLexiconSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl LexiconSource for HttpLexiconSource {
    async fn fetch_shard(&self, letter: char) -> Result<ShardPayload> {
        let url = format!("{}/{}.json", self.base_url, letter);
        get_json(&self.client, &url).await
    }
}
