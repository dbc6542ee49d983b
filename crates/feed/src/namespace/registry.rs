// ABOUTME: Maps namespace URIs (and conventional prefixes) to the handler that owns them.
// ABOUTME: The table is fixed after construction; unknown namespaces resolve to Unsupported.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::Namespace;

/// Registered namespaces: URI, conventional prefix, handler.
const REGISTRATIONS: &[(&str, &str, Namespace)] = &[
    ("http://purl.org/rss/1.0/", "rss", Namespace::Rss),
    ("http://backend.userland.com/rss2", "rss", Namespace::Rss),
    ("http://www.w3.org/2005/Atom", "atom", Namespace::Atom),
    ("http://purl.org/rss/1.0/modules/content/", "content", Namespace::Content),
    ("http://www.itunes.com/dtds/podcast-1.0.dtd", "itunes", Namespace::Itunes),
    ("https://podcastindex.org/namespace/1.0", "podcast", Namespace::PodcastIndex),
    (
        "https://github.com/Podcastindex-org/podcast-namespace/blob/main/docs/1.0.md",
        "podcast",
        Namespace::PodcastIndex,
    ),
    ("http://search.yahoo.com/mrss/", "media", Namespace::Media),
    ("http://purl.org/dc/elements/1.1/", "dc", Namespace::DublinCore),
    ("http://podlove.org/simple-chapters", "psc", Namespace::SimpleChapters),
];

static DEFAULT_REGISTRY: Lazy<NamespaceRegistry> = Lazy::new(|| {
    let mut registry = NamespaceRegistry::empty();
    for (uri, prefix, namespace) in REGISTRATIONS {
        registry.register(uri, prefix, *namespace);
    }
    registry
});

/// Lookup table from namespace URI to handler.
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    by_uri: HashMap<String, Namespace>,
    by_prefix: HashMap<String, Namespace>,
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        DEFAULT_REGISTRY.clone()
    }
}

impl NamespaceRegistry {
    /// The shared registry with every built-in namespace.
    pub fn shared() -> &'static NamespaceRegistry {
        &DEFAULT_REGISTRY
    }

    /// A registry that only knows the default (unqualified) namespace.
    pub fn empty() -> Self {
        Self {
            by_uri: HashMap::new(),
            by_prefix: HashMap::new(),
        }
    }

    /// Adds or replaces a registration. URIs are matched case-insensitively
    /// and without a trailing slash.
    pub fn register(&mut self, uri: &str, prefix: &str, namespace: Namespace) -> &mut Self {
        self.by_uri.insert(normalize(uri), namespace);
        self.by_prefix.insert(prefix.to_string(), namespace);
        self
    }

    /// Handler for an element's namespace URI. Absent or empty means the core RSS handler.
    pub fn resolve(&self, uri: Option<&str>) -> Namespace {
        match uri.map(str::trim) {
            None | Some("") => Namespace::Rss,
            Some(uri) => self
                .by_uri
                .get(&normalize(uri))
                .copied()
                .unwrap_or(Namespace::Unsupported),
        }
    }

    /// Handler for an undeclared prefix, by convention.
    pub fn resolve_prefix(&self, prefix: &str) -> Namespace {
        self.by_prefix
            .get(prefix)
            .copied()
            .unwrap_or(Namespace::Unsupported)
    }
}

fn normalize(uri: &str) -> String {
    uri.trim().trim_end_matches('/').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_uris() {
        let registry = NamespaceRegistry::shared();
        assert_eq!(registry.resolve(None), Namespace::Rss);
        assert_eq!(registry.resolve(Some("")), Namespace::Rss);
        assert_eq!(registry.resolve(Some("http://www.w3.org/2005/Atom")), Namespace::Atom);
        assert_eq!(
            registry.resolve(Some("http://purl.org/rss/1.0/modules/content/")),
            Namespace::Content
        );
        assert_eq!(
            registry.resolve(Some("http://www.itunes.com/DTDs/Podcast-1.0.dtd")),
            Namespace::Itunes
        );
        assert_eq!(
            registry.resolve(Some("http://podlove.org/simple-chapters/")),
            Namespace::SimpleChapters
        );
    }

    #[test]
    fn unknown_uri_is_unsupported() {
        let registry = NamespaceRegistry::default();
        assert_eq!(
            registry.resolve(Some("http://example.com/unknown-ns")),
            Namespace::Unsupported
        );
        assert_eq!(registry.resolve_prefix("googleplay"), Namespace::Unsupported);
        assert_eq!(registry.resolve_prefix("itunes"), Namespace::Itunes);
    }

    #[test]
    fn custom_registrations() {
        let mut registry = NamespaceRegistry::empty();
        assert_eq!(registry.resolve(Some("urn:x-test")), Namespace::Unsupported);
        registry.register("urn:x-test", "t", Namespace::Content);
        assert_eq!(registry.resolve(Some("URN:X-TEST")), Namespace::Content);
        assert_eq!(registry.resolve(None), Namespace::Rss);
    }
}
