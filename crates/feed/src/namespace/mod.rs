// ABOUTME: Namespace handlers and the dispatch enum that selects one per element.
// ABOUTME: Every handler turns start/end events into mutations of the shared HandlerState.

mod atom;
mod content;
mod dublin_core;
mod itunes;
mod media;
mod podcast_index;
mod registry;
mod rss;
mod simple_chapters;

pub use registry::NamespaceRegistry;

use crate::error::FeedError;
use crate::state::{HandlerState, ParseFrame};

/// The closed set of handlers an element can be dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Rss,
    Atom,
    Content,
    Itunes,
    PodcastIndex,
    Media,
    DublinCore,
    SimpleChapters,
    /// Elements from unregistered namespaces: tracked on the stack, otherwise ignored.
    Unsupported,
}

impl Namespace {
    /// Handles an element start and returns the frame to push.
    pub fn handle_element_start(
        self,
        local_name: &str,
        state: &mut HandlerState,
        attributes: &Attributes,
    ) -> ParseFrame {
        match self {
            Namespace::Rss => rss::handle_element_start(local_name, state, attributes),
            Namespace::Atom => atom::handle_element_start(local_name, state, attributes),
            Namespace::Content => ParseFrame::new(local_name, self),
            Namespace::Itunes => itunes::handle_element_start(local_name, state, attributes),
            Namespace::PodcastIndex => {
                podcast_index::handle_element_start(local_name, state, attributes)
            }
            Namespace::Media => media::handle_element_start(local_name, state, attributes),
            Namespace::DublinCore => ParseFrame::new(local_name, self),
            Namespace::SimpleChapters => {
                simple_chapters::handle_element_start(local_name, state, attributes)
            }
            Namespace::Unsupported => ParseFrame::new(local_name, self),
        }
    }

    /// Handles the end of an element this namespace opened.
    pub fn handle_element_end(
        self,
        local_name: &str,
        state: &mut HandlerState,
    ) -> Result<(), FeedError> {
        match self {
            Namespace::Rss => rss::handle_element_end(local_name, state),
            Namespace::Atom => atom::handle_element_end(local_name, state),
            Namespace::Content => content::handle_element_end(local_name, state),
            Namespace::Itunes => itunes::handle_element_end(local_name, state),
            Namespace::PodcastIndex => podcast_index::handle_element_end(local_name, state),
            Namespace::Media => media::handle_element_end(local_name, state),
            Namespace::DublinCore => dublin_core::handle_element_end(local_name, state),
            Namespace::SimpleChapters | Namespace::Unsupported => Ok(()),
        }
    }
}

/// One attribute of an element start event, already unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub prefix: Option<String>,
    pub local_name: String,
    pub value: String,
}

/// Attributes of an element start event in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, prefix: Option<String>, local_name: impl Into<String>, value: impl Into<String>) {
        self.0.push(Attribute {
            prefix,
            local_name: local_name.into(),
            value: value.into(),
        });
    }

    /// Value of an attribute by local name, preferring an unprefixed one.
    pub fn get(&self, local_name: &str) -> Option<&str> {
        let mut matching = self.0.iter().filter(|a| a.local_name == local_name);
        let first = matching.next()?;
        if first.prefix.is_none() {
            return Some(&first.value);
        }
        matching
            .find(|a| a.prefix.is_none())
            .or(Some(first))
            .map(|a| a.value.as_str())
    }

    /// Like `get`, but trimmed and `None` when blank.
    pub fn non_blank(&self, local_name: &str) -> Option<&str> {
        self.get(local_name).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.push(None, key, value);
        }
        attributes
    }
}
