// ABOUTME: Push-style dispatch loop turning tokenizer events into feed mutations.
// ABOUTME: Resolves the handler per element, keeps the frame stack, and assembles the result.

use crate::error::FeedError;
use crate::namespace::{Attributes, Namespace, NamespaceRegistry};
use crate::options::ParseOptions;
use crate::result::FeedHandlerResult;
use crate::state::HandlerState;

/// The namespace of an element start event as reported by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementNamespace<'a> {
    /// No namespace: plain RSS.
    Default,
    /// A declared namespace URI.
    Uri(&'a str),
    /// A prefix with no matching `xmlns` declaration.
    UndeclaredPrefix(&'a str),
}

/// Event sink for one document. Feed it start, text and end events in
/// document order, then call [`FeedHandler::finish`].
#[derive(Debug)]
pub struct FeedHandler<'r> {
    registry: &'r NamespaceRegistry,
    state: HandlerState,
}

impl<'r> FeedHandler<'r> {
    pub fn new(registry: &'r NamespaceRegistry, options: &ParseOptions) -> Self {
        Self {
            registry,
            state: HandlerState::new(options),
        }
    }

    pub fn state(&self) -> &HandlerState {
        &self.state
    }

    pub fn start_element(
        &mut self,
        namespace: ElementNamespace<'_>,
        local_name: &str,
        attributes: &Attributes,
    ) -> Result<(), FeedError> {
        if self.state.depth() == 0 {
            let feed_type = match local_name {
                "rss" | "RDF" => "rss",
                "feed" => "atom",
                other => return Err(FeedError::UnsupportedFeedType(other.to_string())),
            };
            self.state.feed_mut().feed_type = Some(feed_type.to_string());
        }

        let handler = match namespace {
            ElementNamespace::Default => self.registry.resolve(None),
            ElementNamespace::Uri(uri) => self.registry.resolve(Some(uri)),
            ElementNamespace::UndeclaredPrefix(prefix) => {
                tracing::debug!(prefix, element = local_name, "undeclared namespace prefix");
                self.registry.resolve_prefix(prefix)
            }
        };
        let frame = handler.handle_element_start(local_name, &mut self.state, attributes);
        self.state.push(frame)?;
        self.state.start_text();
        Ok(())
    }

    pub fn characters(&mut self, text: &str) {
        self.state.append_text(text);
    }

    /// Ends the innermost open element. The handler that opened it processes the end.
    pub fn end_element(&mut self, local_name: &str) -> Result<(), FeedError> {
        let Some(frame) = self.state.frames().last() else {
            return Err(FeedError::malformed(format!(
                "end of </{local_name}> with no open element"
            )));
        };
        if frame.name != local_name {
            return Err(FeedError::malformed(format!(
                "end of </{local_name}> while <{}> is open",
                frame.name
            )));
        }
        let handler: Namespace = frame.namespace;
        handler.handle_element_end(local_name, &mut self.state)?;
        self.state.pop();
        self.state.clear_text();
        Ok(())
    }

    /// Assembles the result. Fails if elements are still open.
    pub fn finish(self, redirect_url: Option<String>) -> Result<FeedHandlerResult, FeedError> {
        if self.state.depth() > 0 {
            let open: Vec<&str> = self.state.frames().iter().map(|f| f.name.as_str()).collect();
            return Err(FeedError::malformed(format!(
                "document ended with unclosed elements: {}",
                open.join(" > ")
            )));
        }
        if self.state.feed().feed_type.is_none() {
            return Err(FeedError::malformed("document has no root element"));
        }
        let (feed, alternate_feed_urls) = self.state.into_parts();
        Ok(FeedHandlerResult {
            feed,
            alternate_feed_urls,
            redirect_url,
        })
    }
}
