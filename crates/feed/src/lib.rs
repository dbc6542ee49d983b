// ABOUTME: Streaming, namespace-aware podcast feed parser.
// ABOUTME: Dispatches XML events to per-namespace handlers that build a podcore Feed.

pub mod charset;
pub mod duration_parse;
pub mod error;
pub mod handler;
pub mod mime;
pub mod namespace;
pub mod options;
pub mod parser;
pub mod result;
pub mod state;
pub mod time_parse;

pub use duration_parse::{parse_duration_millis, parse_duration_seconds};
pub use error::FeedError;
pub use handler::{ElementNamespace, FeedHandler};
pub use namespace::{Attribute, Attributes, Namespace, NamespaceRegistry};
pub use options::{ParseOptions, ParseOptionsBuilder};
pub use parser::{parse_feed_bytes, FeedParser};
pub use result::FeedHandlerResult;
pub use state::{HandlerState, ParseFrame};
pub use time_parse::{parse_flexible_time, parse_or_none_if_future};
