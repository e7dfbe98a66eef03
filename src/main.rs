//! Thin driver binary: loads a verse, resolves its lemmas against the lexicon
//! and prints each word with its gold analysis and brief definition. The real
//! drilling surface lives elsewhere; this exercises the whole core once.

use config::Config;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use parsedrill::error::Result;
use parsedrill::lexicon::Resolver;
use parsedrill::loader::VerseLoader;
use parsedrill::source::{HttpLexiconSource, HttpVerseSource};

#[derive(Debug, Deserialize)]
struct Settings {
    verse_base_url: String,
    lexicon_base_url: String,
}

impl Settings {
    /// Defaults, optionally overridden by a parsedrill.toml next to the binary
    /// and by PARSEDRILL_* environment variables.
    fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("verse_base_url", "https://api.morphgnt.org")?
            .set_default(
                "lexicon_base_url",
                "https://raw.githubusercontent.com/shininglegend/Dodson-Greek-Lexicon/refs/heads/master/split-json",
            )?
            .add_source(config::File::with_name("parsedrill").required(false))
            .add_source(config::Environment::with_prefix("PARSEDRILL"))
            .build()?;
        Ok(settings.try_deserialize::<Settings>()?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let settings = Settings::load()?;

    let reference = {
        let args: Vec<String> = std::env::args().skip(1).collect();
        if args.is_empty() { "Jn 1:1".to_string() } else { args.join(" ") }
    };

    let loader = VerseLoader::new(HttpVerseSource::new(&settings.verse_base_url));
    let verse = loader.load(&reference).await?;

    let resolver = Resolver::new(HttpLexiconSource::new(&settings.lexicon_base_url));
    let resolved = resolver.resolve_many(&verse.lemmas()).await;
    info!(lemmas = verse.lemmas().len(), resolved = resolved.len(), "lexicon resolved");
    let verse = verse.with_definitions(&resolved);

    println!("{verse}");
    for word in verse.words() {
        let lemma = word.lemma().unwrap_or("-");
        let parse = word
            .parse()
            .map(|parse| parse.to_string())
            .unwrap_or_else(|| "{}".to_string());
        let brief = word
            .definition()
            .and_then(|definition| definition.brief.as_deref())
            .unwrap_or("");
        println!("{:<12} {:<12} {:<40} {}", word.surface(), lemma, parse, brief);
    }
    Ok(())
}
