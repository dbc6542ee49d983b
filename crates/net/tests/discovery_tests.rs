// ABOUTME: Integration tests for iTunes search, page lookup and top lists against a mock HTTP server.
// ABOUTME: Checks JSON mapping, missing feed URLs, unknown countries and subscription filtering.

use httpmock::prelude::*;
use podcore_model::{DownloadError, Feed};
use podcore_net::{
    ClientConfig, ClientContext, CombinedSearcher, FetchError, ItunesSearcher, ItunesTopListLoader,
    PodcastSearcher,
};
use pretty_assertions::assert_eq;

const SEARCH_RESPONSE: &str = r#"{
  "resultCount": 3,
  "results": [
    {"collectionName": "Rust in Production", "artistName": "Ferris",
     "feedUrl": "https://feeds.example.com/rip.xml",
     "artworkUrl100": "https://img.example.com/rip100.jpg",
     "trackCount": 12, "releaseDate": "2024-05-01T10:00:00Z",
     "collectionViewUrl": "https://podcasts.apple.com/us/podcast/rip/id1"},
    {"collectionName": "Video Only", "artistName": "Nobody"},
    {"collectionName": "Systems Talk", "artistName": "Ada",
     "feedUrl": "https://feeds.example.com/systems.xml"}
  ]
}"#;

const TOPLIST_RESPONSE: &str = r#"{"feed": {"entry": [
  {"im:name": {"label": "Daily News"}, "title": {"label": "Daily News - Newsroom"},
   "im:artist": {"label": "Newsroom"},
   "im:image": [{"label": "https://img.example.com/55.png"}, {"label": "https://img.example.com/170.png"}],
   "id": {"label": "https://podcasts.apple.com/us/podcast/daily-news/id11"}},
  {"im:name": {"label": "Comedy Hour"}, "title": {"label": "Comedy Hour - Jokes Inc"},
   "im:artist": {"label": "Jokes Inc"},
   "id": {"label": "https://podcasts.apple.com/us/podcast/comedy-hour/id12"}},
  {"im:name": {"label": "Science Weekly"}, "title": {"label": "Science Weekly - Lab"},
   "im:artist": {"label": "Lab"},
   "id": {"label": "https://podcasts.apple.com/us/podcast/science-weekly/id13"}}
]}}"#;

fn context() -> ClientContext {
    ClientContext::new(ClientConfig::default()).unwrap()
}

#[tokio::test]
async fn search_maps_results_and_skips_entries_without_feed() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("media", "podcast")
            .query_param("term", "rust podcasts");
        then.status(200)
            .header("content-type", "application/json")
            .body(SEARCH_RESPONSE);
    });

    let searcher = ItunesSearcher::with_base_url(&context(), &server.base_url()).unwrap();
    let results = searcher.search("rust podcasts").await.unwrap();
    mock.assert();

    assert_eq!(results.len(), 2);
    let first = &results[0];
    assert_eq!(first.title, "Rust in Production");
    assert_eq!(first.feed_url.as_deref(), Some("https://feeds.example.com/rip.xml"));
    assert_eq!(first.author.as_deref(), Some("Ferris"));
    assert_eq!(first.image_url.as_deref(), Some("https://img.example.com/rip100.jpg"));
    assert_eq!(first.episode_count, Some(12));
    assert_eq!(results[1].title, "Systems Talk");
}

#[tokio::test]
async fn search_reports_http_and_json_failures() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search").query_param("term", "down");
        then.status(503);
    });
    server.mock(|when, then| {
        when.method(GET).path("/search").query_param("term", "garbled");
        then.status(200).body("{\"results\": [");
    });
    let searcher = ItunesSearcher::with_base_url(&context(), &server.base_url()).unwrap();

    let err = searcher.search("down").await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 503, .. }), "{err}");

    let err = searcher.search("garbled").await.unwrap_err();
    assert!(matches!(err, FetchError::Json { .. }), "{err}");
    assert_eq!(err.download_error(), DownloadError::ParserException);
}

#[tokio::test]
async fn podcast_page_lookup_returns_feed_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/lookup").query_param("id", "424242");
        then.status(200)
            .body(r#"{"results": [{"feedUrl": "https://feeds.example.com/found.xml"}]}"#);
    });
    let searcher = ItunesSearcher::with_base_url(&context(), &server.base_url()).unwrap();

    let page = "https://podcasts.apple.com/us/podcast/found-show/id424242";
    assert!(searcher.url_needs_lookup(page));
    let feed_url = searcher.lookup_url(page).await.unwrap();
    mock.assert();
    assert_eq!(feed_url, "https://feeds.example.com/found.xml");
}

#[tokio::test]
async fn lookup_without_feed_url_names_the_podcast() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/lookup").query_param("id", "7");
        then.status(200)
            .body(r#"{"results": [{"artistName": "Label", "trackName": "Exclusive Show"}]}"#);
    });
    let searcher = ItunesSearcher::with_base_url(&context(), &server.base_url()).unwrap();

    let err = searcher
        .lookup_url("https://podcasts.apple.com/us/podcast/exclusive/id7")
        .await
        .unwrap_err();
    match &err {
        FetchError::NoFeedUrl { artist, track } => {
            assert_eq!(artist, "Label");
            assert_eq!(track, "Exclusive Show");
        }
        other => panic!("expected a missing feed URL, got {other}"),
    }
    assert_eq!(err.download_error(), DownloadError::NotFound);
}

#[tokio::test]
async fn combined_search_lookup_passes_plain_urls_through() {
    let searcher = CombinedSearcher::with_defaults(&context()).unwrap();
    let plain = "https://example.com/feed.xml";
    assert!(!searcher.url_needs_lookup(plain));
    assert_eq!(searcher.lookup_url(plain).await.unwrap(), plain);
}

#[tokio::test]
async fn toplist_hides_subscriptions_and_applies_limit() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/de/rss/toppodcasts/limit=25/explicit=true/json");
        then.status(200).body(TOPLIST_RESPONSE);
    });
    let loader = ItunesTopListLoader::with_base_url(&context(), &server.base_url()).unwrap();

    let mut subscribed = Feed::new(None);
    subscribed.title = Some("Comedy Hour".into());
    subscribed.author = Some("Jokes Inc".into());

    let results = loader.load_toplist(Some("DE"), 5, &[subscribed]).await.unwrap();
    mock.assert();

    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Daily News - Newsroom", "Science Weekly - Lab"]);
    assert_eq!(results[0].image_url.as_deref(), Some("https://img.example.com/170.png"));
    assert_eq!(
        results[0].source_url.as_deref(),
        Some("https://podcasts.apple.com/us/podcast/daily-news/id11")
    );
    assert_eq!(results[0].feed_url, None);

    let capped = loader.load_toplist(Some("de"), 1, &[]).await.unwrap();
    assert_eq!(capped.len(), 1);
}

#[tokio::test]
async fn toplist_for_unknown_country_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/zz/rss/toppodcasts/limit=25/explicit=true/json");
        then.status(400);
    });
    let loader = ItunesTopListLoader::with_base_url(&context(), &server.base_url()).unwrap();

    let err = loader.load_toplist(Some("zz"), 10, &[]).await.unwrap_err();
    assert!(matches!(&err, FetchError::UnknownCountry { country } if country == "zz"), "{err}");
}

#[tokio::test]
async fn toplist_without_entries_is_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/us/rss/toppodcasts/limit=25/explicit=true/json");
        then.status(200).body(r#"{"feed": {"title": {"label": "Top Podcasts"}}}"#);
    });
    let loader = ItunesTopListLoader::with_base_url(&context(), &server.base_url()).unwrap();

    let results = loader.load_toplist(Some("us"), 10, &[]).await.unwrap();
    assert!(results.is_empty());
}
