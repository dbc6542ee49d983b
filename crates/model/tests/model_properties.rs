// ABOUTME: Integration tests for the stored-code contracts of the model crate.
// ABOUTME: Covers funding codec, download error codes, sort order scope and filters.

use podcore_model::{
    extract_payment_links, get_payment_links_as_string, DownloadError, FeedFunding, FeedItem,
    FeedItemFilter, ModelError, PlayState, Scope, SortOrder,
};
use pretty_assertions::assert_eq;

#[test]
fn funding_list_survives_storage() {
    let list = vec![
        FeedFunding::new("https://example.com/support", "Become a member"),
        FeedFunding::new("https://example.com/tip", "Tip jar"),
    ];
    let stored = get_payment_links_as_string(&list);
    assert!(stored.contains('\u{1e}'));
    assert!(stored.contains('\u{1f}'));
    assert_eq!(extract_payment_links(&stored), list);
}

#[test]
fn download_error_table_is_stable() {
    let expected = [
        (0, DownloadError::Success),
        (1, DownloadError::ParserException),
        (2, DownloadError::UnsupportedType),
        (3, DownloadError::ConnectionError),
        (4, DownloadError::MalformedUrl),
        (5, DownloadError::IoError),
        (6, DownloadError::FileExists),
        (7, DownloadError::DownloadCancelled),
        (8, DownloadError::DeviceNotFound),
        (9, DownloadError::HttpDataError),
        (10, DownloadError::NotEnoughSpace),
        (11, DownloadError::UnknownHost),
        (12, DownloadError::RequestError),
        (13, DownloadError::DbAccessError),
        (14, DownloadError::Unauthorized),
        (15, DownloadError::FileType),
        (16, DownloadError::Forbidden),
        (17, DownloadError::IoWrongSize),
        (18, DownloadError::IoBlocked),
        (19, DownloadError::UnsupportedTypeHtml),
        (20, DownloadError::NotFound),
        (21, DownloadError::Certificate),
        (22, DownloadError::ParserExceptionDuplicate),
    ];
    for (code, reason) in expected {
        assert_eq!(DownloadError::from_code(code), Ok(reason));
        assert_eq!(reason.code(), code);
    }
    assert_eq!(
        DownloadError::from_code(23),
        Err(ModelError::UnknownDownloadErrorCode(23))
    );
}

#[test]
fn sort_order_scope_and_unknown_code() {
    assert_eq!(SortOrder::DateNewOld.scope(), Scope::IntraFeed);
    assert_eq!(SortOrder::Random.scope(), Scope::InterFeed);
    assert!(SortOrder::from_code_string(Some("9999")).is_err());
}

#[test]
fn filter_properties() {
    let plain = FeedItem::default();
    assert!(FeedItemFilter::unfiltered().matches(&plain));

    let played_filter = FeedItemFilter::new(["played"]);
    assert!(!played_filter.matches(&plain));
    let played = FeedItem {
        state: PlayState::Played,
        ..Default::default()
    };
    assert!(played_filter.matches(&played));
}
