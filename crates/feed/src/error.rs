// ABOUTME: Error types for feed parsing operations.
// ABOUTME: Every variant aborts the document and maps to ERROR_PARSER_EXCEPTION.

use std::fmt;
use thiserror::Error;

use podcore_model::DownloadError;

/// Errors that abort the parse of a whole document.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The tokenizer rejected the input (malformed XML).
    #[error("failed to parse feed: {0}")]
    Parse(String),

    /// The document is well-formed but its structure is broken
    /// (unbalanced frames, elements left open at the end).
    #[error("malformed feed: {0}")]
    Malformed(String),

    /// The root element is not an RSS, RDF or Atom feed.
    #[error("unsupported feed type: root element <{0}>")]
    UnsupportedFeedType(String),

    /// Nesting went deeper than the configured limit.
    #[error("feed nesting exceeds {0} levels")]
    TooDeep(usize),
}

impl FeedError {
    /// Creates a Parse error from an underlying tokenizer error.
    pub fn parse(err: impl fmt::Display) -> Self {
        FeedError::Parse(err.to_string())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        FeedError::Malformed(msg.into())
    }

    /// The download outcome a failed parse is reported as.
    pub fn download_error(&self) -> DownloadError {
        DownloadError::ParserException
    }
}
