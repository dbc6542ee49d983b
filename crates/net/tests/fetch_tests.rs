// ABOUTME: Integration tests for feed fetching and refresh outcomes against a mock HTTP server.
// ABOUTME: Covers redirects, status classification, size limits, HTML and connect failures.

use httpmock::prelude::*;
use podcore_model::DownloadError;
use podcore_net::{refresh_feed, ClientConfig, ClientContext, FeedFetcher, FetchError};
use pretty_assertions::assert_eq;

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Mock Cast</title>
    <item>
      <title>Pilot</title>
      <guid>ep-1</guid>
      <enclosure url="https://cdn.example.com/ep1.mp3" length="20000000" type="audio/mpeg"/>
      <itunes:duration>01:02:03</itunes:duration>
    </item>
  </channel>
</rss>"#;

fn context() -> ClientContext {
    ClientContext::new(ClientConfig::default()).unwrap()
}

#[tokio::test]
async fn fetch_without_redirect_has_no_redirect_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/feed.xml");
        then.status(200)
            .header("content-type", "application/rss+xml")
            .body(FEED);
    });

    let fetched = FeedFetcher::new(&context())
        .fetch(&server.url("/feed.xml"))
        .await
        .unwrap();
    mock.assert();

    assert_eq!(fetched.redirect_url, None);
    assert_eq!(fetched.content_type.as_deref(), Some("application/rss+xml"));
    assert_eq!(fetched.bytes.len(), FEED.len());
}

#[tokio::test]
async fn fetch_follows_redirect_and_reports_it() {
    let server = MockServer::start();
    let target = server.url("/feed.xml");
    server.mock(|when, then| {
        when.method(GET).path("/old");
        then.status(301).header("location", target.as_str());
    });
    server.mock(|when, then| {
        when.method(GET).path("/feed.xml");
        then.status(200).body(FEED);
    });

    let fetched = FeedFetcher::new(&context())
        .fetch(&server.url("/old"))
        .await
        .unwrap();

    assert_eq!(fetched.redirect_url.as_deref(), Some(target.as_str()));
    assert_eq!(fetched.final_url, target);
}

#[tokio::test]
async fn status_codes_are_classified() {
    let server = MockServer::start();
    let cases = [
        ("/gone", 404, DownloadError::NotFound),
        ("/removed", 410, DownloadError::NotFound),
        ("/login", 401, DownloadError::Unauthorized),
        ("/private", 403, DownloadError::Forbidden),
        ("/broken", 500, DownloadError::HttpDataError),
    ];
    for (path, status, _) in cases {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(status);
        });
    }

    let fetcher = FeedFetcher::new(&context());
    for (path, status, expected) in cases {
        let err = fetcher.fetch(&server.url(path)).await.unwrap_err();
        assert!(
            matches!(err, FetchError::Status { status: s, .. } if s == status),
            "unexpected error for {path}: {err}"
        );
        assert_eq!(err.download_error(), expected, "{path}");
    }
}

#[tokio::test]
async fn html_page_is_rejected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("content-type", "text/html")
            .body("<!DOCTYPE html><html><body>Subscribe here</body></html>");
    });

    let err = FeedFetcher::new(&context())
        .fetch(&server.url("/"))
        .await
        .unwrap_err();
    assert_eq!(err.download_error(), DownloadError::UnsupportedTypeHtml);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/feed.xml");
        then.status(200).body(FEED);
    });

    let ctx = ClientContext::new(ClientConfig::builder().max_body_bytes(64).build()).unwrap();
    let err = FeedFetcher::new(&ctx)
        .fetch(&server.url("/feed.xml"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::TooLarge { limit: 64, .. }));
    assert_eq!(err.download_error(), DownloadError::IoWrongSize);
}

#[tokio::test]
async fn unsupported_scheme_is_malformed_url() {
    let err = FeedFetcher::new(&context())
        .fetch("ftp://example.com/feed.xml")
        .await
        .unwrap_err();
    assert_eq!(err.download_error(), DownloadError::MalformedUrl);
}

#[tokio::test]
async fn refresh_feed_parses_successful_download() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/feed.xml");
        then.status(200).body(FEED);
    });
    let url = server.url("/feed.xml");

    let (result, outcome) = refresh_feed(&context(), &url).await;

    assert!(outcome.is_successful());
    assert_eq!(outcome.reason(), DownloadError::Success);
    assert_eq!(outcome.title(), "Mock Cast");
    let result = result.unwrap();
    assert_eq!(result.redirect_url, None);
    assert_eq!(result.feed.title.as_deref(), Some("Mock Cast"));
    assert_eq!(result.feed.items.len(), 1);
    let media = result.feed.items[0].media.as_ref().unwrap();
    assert_eq!(media.size, 20_000_000);
    assert_eq!(media.duration_ms, 3_723_000);
}

#[tokio::test]
async fn refresh_feed_reports_parse_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/feed.xml");
        then.status(200).body("<rss version=\"2.0\"><channel><title>Cut off");
    });
    let url = server.url("/feed.xml");

    let (result, outcome) = refresh_feed(&context(), &url).await;

    assert!(result.is_none());
    assert!(!outcome.is_successful());
    assert_eq!(outcome.reason(), DownloadError::ParserException);
    assert_eq!(outcome.title(), url);
    assert!(outcome.reason_detailed().is_some());
}

#[tokio::test]
async fn refresh_feed_reports_http_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/feed.xml");
        then.status(404);
    });

    let (result, outcome) = refresh_feed(&context(), &server.url("/feed.xml")).await;

    assert!(result.is_none());
    assert_eq!(outcome.reason(), DownloadError::NotFound);
}

#[tokio::test]
async fn refused_loopback_connection_counts_as_blocked() {
    let err = FeedFetcher::new(&context())
        .fetch("http://127.0.0.1:1/feed.xml")
        .await
        .unwrap_err();
    assert_eq!(err.download_error(), DownloadError::IoBlocked);
}

#[tokio::test]
async fn refused_connection_to_loopback_hostname_counts_as_blocked() {
    let err = FeedFetcher::new(&context())
        .fetch("http://localhost:1/feed.xml")
        .await
        .unwrap_err();
    match &err {
        FetchError::Connect { addresses, .. } => {
            assert!(addresses.iter().any(|ip| ip.is_loopback()), "{addresses:?}");
        }
        other => panic!("expected a connect error, got {other}"),
    }
    assert!(err.to_string().contains("127.0.0.1"), "{err}");
    assert_eq!(err.download_error(), DownloadError::IoBlocked);
}

#[tokio::test]
async fn unresolvable_host_is_unknown_host() {
    let err = FeedFetcher::new(&context())
        .fetch("http://podcore-test.invalid/feed.xml")
        .await
        .unwrap_err();
    assert_eq!(err.download_error(), DownloadError::UnknownHost);
}
