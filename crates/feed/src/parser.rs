// ABOUTME: quick-xml driven front end for the feed handler.
// ABOUTME: Reads namespace-resolved events and forwards them to a FeedHandler.

use std::io::Read;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::{Namespace as XmlNamespace, ResolveResult};
use quick_xml::reader::NsReader;
use quick_xml::encoding::Decoder;

use crate::charset::to_utf8;
use crate::error::FeedError;
use crate::handler::{ElementNamespace, FeedHandler};
use crate::namespace::{Attributes, NamespaceRegistry};
use crate::options::ParseOptions;
use crate::result::FeedHandlerResult;

/// Namespace of a start event, detached from the reader's borrow.
enum OwnedNamespace {
    Default,
    Uri(String),
    UndeclaredPrefix(String),
}

impl OwnedNamespace {
    fn from_resolved(resolved: ResolveResult<'_>) -> Self {
        match resolved {
            ResolveResult::Unbound => OwnedNamespace::Default,
            ResolveResult::Bound(XmlNamespace(uri)) => {
                OwnedNamespace::Uri(String::from_utf8_lossy(uri).into_owned())
            }
            ResolveResult::Unknown(prefix) => {
                OwnedNamespace::UndeclaredPrefix(String::from_utf8_lossy(&prefix).into_owned())
            }
        }
    }

    fn as_element_namespace(&self) -> ElementNamespace<'_> {
        match self {
            OwnedNamespace::Default => ElementNamespace::Default,
            OwnedNamespace::Uri(uri) => ElementNamespace::Uri(uri),
            OwnedNamespace::UndeclaredPrefix(prefix) => ElementNamespace::UndeclaredPrefix(prefix),
        }
    }
}

/// Reusable parser. Each call to `parse` gets its own handler state.
#[derive(Debug, Clone, Default)]
pub struct FeedParser {
    registry: NamespaceRegistry,
    options: ParseOptions,
}

impl FeedParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            registry: NamespaceRegistry::default(),
            options,
        }
    }

    pub fn with_registry(mut self, registry: NamespaceRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses a complete document held in memory. Documents in other
    /// encodings are converted to UTF-8 first.
    pub fn parse(&self, data: &[u8], redirect_url: Option<&str>) -> Result<FeedHandlerResult, FeedError> {
        let data = to_utf8(data);
        self.parse_utf8(&data, redirect_url)
    }

    /// Reads the whole source, then parses it like [`FeedParser::parse`].
    /// The encoding can only be known once the prologue has been seen.
    pub fn parse_reader<R: Read>(
        &self,
        mut source: R,
        redirect_url: Option<&str>,
    ) -> Result<FeedHandlerResult, FeedError> {
        let mut data = Vec::new();
        source.read_to_end(&mut data).map_err(FeedError::parse)?;
        self.parse(&data, redirect_url)
    }

    fn parse_utf8(&self, data: &[u8], redirect_url: Option<&str>) -> Result<FeedHandlerResult, FeedError> {
        let mut reader = NsReader::from_reader(data);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = true;
        config.trim_text(false);
        let decoder = reader.decoder();

        let mut handler = FeedHandler::new(&self.registry, &self.options);
        let mut buf = Vec::new();

        loop {
            let (resolved, event) = reader.read_resolved_event_into(&mut buf).map_err(FeedError::parse)?;
            let namespace = OwnedNamespace::from_resolved(resolved);
            match event {
                Event::Start(ref e) => {
                    let local_name = decode_name(e.local_name().as_ref());
                    let attributes = collect_attributes(e, decoder);
                    handler.start_element(namespace.as_element_namespace(), &local_name, &attributes)?;
                }
                Event::End(ref e) => {
                    handler.end_element(&decode_name(e.local_name().as_ref()))?;
                }
                Event::Text(ref e) => handler.characters(&e.decode().map_err(FeedError::parse)?),
                Event::CData(ref e) => handler.characters(&e.decode().map_err(FeedError::parse)?),
                Event::GeneralRef(ref r) => handler.characters(&resolve_reference(r)?),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let result = handler.finish(redirect_url.map(str::to_string))?;
        tracing::debug!(
            items = result.feed.items.len(),
            alternates = result.alternate_feed_urls.len(),
            "parsed feed"
        );
        Ok(result)
    }
}

fn decode_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

/// Unescaped attributes; namespace declarations are skipped.
fn collect_attributes(e: &BytesStart<'_>, decoder: Decoder) -> Attributes {
    let mut attributes = Attributes::new();
    for attr in e.attributes().flatten() {
        let key = attr.key;
        if key.as_namespace_binding().is_some() {
            continue;
        }
        let value = match attr.decode_and_unescape_value(decoder) {
            Ok(value) => value.into_owned(),
            Err(err) => {
                tracing::debug!(error = %err, "keeping attribute value unescaped");
                String::from_utf8_lossy(&attr.value).into_owned()
            }
        };
        let prefix = key.prefix().map(|p| decode_name(p.as_ref()));
        attributes.push(prefix, decode_name(key.local_name().as_ref()), value);
    }
    attributes
}

/// Text for a character or entity reference. Unknown entities are kept literally.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, FeedError> {
    if let Some(ch) = reference.resolve_char_ref().map_err(FeedError::parse)? {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(FeedError::parse)?;
    Ok(match resolve_predefined_entity(&name) {
        Some(text) => text.to_string(),
        None => {
            tracing::debug!(entity = %name, "unknown entity kept as text");
            format!("&{name};")
        }
    })
}

/// Parses feed bytes with default options.
///
/// # Arguments
/// * `data` - Raw RSS or Atom document
/// * `redirect_url` - Final URL when the download was redirected, passed through to the result
///
/// # Returns
/// * `Ok(FeedHandlerResult)` - The feed, alternate feed URLs and redirect URL
/// * `Err(FeedError)` - Malformed XML, unsupported root element, or broken structure
pub fn parse_feed_bytes(data: &[u8], redirect_url: Option<&str>) -> Result<FeedHandlerResult, FeedError> {
    FeedParser::new().parse(data, redirect_url)
}
