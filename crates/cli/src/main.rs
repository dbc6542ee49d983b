// ABOUTME: CLI for the podcore feed parser and podcast directory search.
// ABOUTME: Parses feeds from URLs, files or stdin, searches iTunes and prints the result as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use podcore_feed::{FeedParser, ParseOptions};
use podcore_model::{DownloadError, DownloadResult, FeedComponent, FeedFileType};
use podcore_net::{
    prepare_url, refresh_feed, ClientConfig, ClientContext, CombinedSearcher, ItunesTopListLoader,
    PodcastSearcher,
};
use serde_json::{json, Value};

/// Parse podcast feeds and search podcast directories, printing JSON.
#[derive(Parser, Debug)]
#[command(name = "podcore")]
#[command(about = "Parse podcast feeds and search podcast directories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// User-Agent header for HTTP requests.
    #[arg(long, global = true, env = "PODCORE_USER_AGENT")]
    user_agent: Option<String>,

    /// Overall timeout per HTTP request, in seconds.
    #[arg(long, global = true, env = "PODCORE_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Output compact JSON instead of pretty.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one or more feeds.
    Parse {
        /// Feed URLs, local file paths, or "-" to read one feed from stdin.
        /// feed://, itpc:// and pcast:// links are accepted.
        #[arg(required = true)]
        targets: Vec<String>,

        /// URL that relative links in file or stdin input resolve against.
        #[arg(long, env = "PODCORE_DOWNLOAD_URL")]
        download_url: Option<String>,
    },
    /// Search the podcast directories by keyword.
    Search {
        query: String,

        /// Print at most this many results.
        #[arg(long, default_value_t = 25)]
        limit: usize,
    },
    /// Show the iTunes podcast chart for a country.
    Toplist {
        /// ISO 3166 country code; defaults to the locale's country.
        #[arg(long)]
        country: Option<String>,

        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Look up the feed URL of every chart entry.
        #[arg(long, default_value_t = false)]
        resolve: bool,
    },
    /// Resolve a directory page URL (such as an Apple Podcasts link) to its feed URL.
    Lookup { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::builder().timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(user_agent) = &cli.user_agent {
        config = config.user_agent(user_agent.clone());
    }
    let ctx = ClientContext::new(config.build()).context("failed to set up HTTP client")?;

    let output = match &cli.command {
        Command::Parse {
            targets,
            download_url,
        } => parse_targets(&ctx, targets, download_url.as_deref()).await,
        Command::Search { query, limit } => {
            let searcher = CombinedSearcher::with_defaults(&ctx)?;
            let mut results = searcher
                .search(query)
                .await
                .with_context(|| format!("search for {query:?} failed"))?;
            results.truncate(*limit);
            json!({ "query": query, "searcher": searcher.name(), "results": results })
        }
        Command::Toplist {
            country,
            limit,
            resolve,
        } => {
            let loader = ItunesTopListLoader::new(&ctx)?;
            let mut results = loader
                .load_toplist(country.as_deref(), *limit, &[])
                .await
                .context("failed to load the top list")?;
            if *resolve {
                let searcher = CombinedSearcher::with_defaults(&ctx)?;
                for result in &mut results {
                    let Some(page) = result.source_url.as_deref() else {
                        continue;
                    };
                    match searcher.lookup_url(page).await {
                        Ok(feed_url) => result.feed_url = Some(feed_url),
                        Err(err) => tracing::warn!(page, error = %err, "feed lookup failed"),
                    }
                }
            }
            json!({ "country": country, "results": results })
        }
        Command::Lookup { url } => {
            let searcher = CombinedSearcher::with_defaults(&ctx)?;
            let feed_url = searcher
                .lookup_url(url)
                .await
                .with_context(|| format!("lookup of {url} failed"))?;
            json!({ "url": url, "feed_url": feed_url })
        }
    };

    if cli.compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

/// One entry per target; several targets are wrapped in a summary envelope.
async fn parse_targets(ctx: &ClientContext, targets: &[String], download_url: Option<&str>) -> Value {
    let mut results = Vec::with_capacity(targets.len());
    for target in targets {
        let entry = if target == "-" || Path::new(target).exists() {
            parse_local(target, download_url)
        } else {
            let url = prepare_url(target);
            let (result, outcome) = refresh_feed(ctx, &url).await;
            json!({ "target": url, "feed": result, "outcome": outcome })
        };
        results.push(entry);
    }

    if results.len() == 1 {
        return results.remove(0);
    }
    let parsed = results.iter().filter(|r| !r["feed"].is_null()).count();
    json!({
        "feeds": results,
        "total_feeds": targets.len(),
        "parsed": parsed,
        "failed": targets.len() - parsed,
    })
}

/// Parses a file or stdin, reporting failures in the same shape as a refresh.
fn parse_local(target: &str, download_url: Option<&str>) -> Value {
    let mut options = ParseOptions::builder();
    if let Some(url) = download_url {
        options = options.download_url(url);
    }
    let parser = FeedParser::with_options(options.build());

    let parsed = load_bytes(target).and_then(|bytes| {
        parser
            .parse(&bytes, None)
            .with_context(|| format!("failed to parse {target}"))
    });

    match parsed {
        Ok(result) => {
            let outcome = DownloadResult::new(
                0,
                FeedFileType::Feed,
                result.feed.human_readable_identifier(),
                DownloadError::Success,
                true,
                None,
            );
            json!({ "target": target, "feed": result, "outcome": outcome })
        }
        Err(err) => {
            tracing::warn!(source = target, error = %err, "feed parse failed");
            let reason = err
                .downcast_ref::<podcore_feed::FeedError>()
                .map(|e| e.download_error())
                .unwrap_or(DownloadError::IoError);
            let outcome = DownloadResult::new(
                0,
                FeedFileType::Feed,
                target,
                reason,
                false,
                Some(format!("{err:#}")),
            );
            json!({ "target": target, "feed": Value::Null, "outcome": outcome })
        }
    }
}

fn load_bytes(target: &str) -> Result<Vec<u8>> {
    if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read(target).with_context(|| format!("failed to read {target}"))
}
