// ABOUTME: Configuration options for the feed parser and a fluent builder for them.
// ABOUTME: Limits guard against adversarial documents; download_url seeds the Feed.

/// Configuration for one parser instance.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum element nesting before the document is rejected.
    pub max_depth: usize,
    /// Maximum UTF-8 bytes buffered for one element; excess text is dropped
    /// at the last character boundary that fits.
    pub max_text_len: usize,
    /// URL the document was fetched from. Copied to `Feed::download_url` and
    /// used as base for relative links.
    pub download_url: Option<String>,
    /// Resolve relative links against `download_url`.
    pub resolve_relative_urls: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_text_len: 4 * 1024 * 1024,
            download_url: None,
            resolve_relative_urls: true,
        }
    }
}

impl ParseOptions {
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for constructing ParseOptions with custom settings.
#[derive(Debug, Clone, Default)]
pub struct ParseOptionsBuilder {
    opts: ParseOptions,
}

impl ParseOptionsBuilder {
    pub fn new() -> Self {
        Self {
            opts: ParseOptions::default(),
        }
    }

    /// Set the maximum element nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.opts.max_depth = depth;
        self
    }

    /// Set the per-element text limit in bytes.
    pub fn max_text_len(mut self, len: usize) -> Self {
        self.opts.max_text_len = len;
        self
    }

    /// Set the URL the document was downloaded from.
    pub fn download_url(mut self, url: impl Into<String>) -> Self {
        self.opts.download_url = Some(url.into());
        self
    }

    /// Enable or disable resolving relative links.
    pub fn resolve_relative_urls(mut self, resolve: bool) -> Self {
        self.opts.resolve_relative_urls = resolve;
        self
    }

    pub fn build(self) -> ParseOptions {
        self.opts
    }
}
