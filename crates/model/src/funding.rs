// ABOUTME: Funding/payment links of a feed and their single-string storage codec.
// ABOUTME: Entries are joined with U+001E, url and title within an entry with U+001F.

use serde::{Deserialize, Serialize};

/// Separates distinct funding entries in the stored string.
pub const FUNDING_ENTRIES_SEPARATOR: char = '\u{1e}';

/// Separates the url of a funding entry from its title.
pub const FUNDING_TITLE_SEPARATOR: char = '\u{1f}';

/// A way to financially support a feed or its creator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedFunding {
    pub url: Option<String>,
    pub content: Option<String>,
}

impl FeedFunding {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            content: Some(content.into()),
        }
    }
}

/// Two entries are equal when both have neither url nor content, or when both
/// url and content are present and equal. An entry with only one of the two
/// set is not even equal to itself, so there is no `Eq` impl.
impl PartialEq for FeedFunding {
    fn eq(&self, other: &Self) -> bool {
        match (&self.url, &self.content, &other.url, &other.content) {
            (None, None, None, None) => true,
            (Some(url), Some(content), Some(other_url), Some(other_content)) => {
                url == other_url && content == other_content
            }
            _ => false,
        }
    }
}

/// Decodes a stored funding string.
///
/// Blank input yields no entries. Input containing neither separator is the
/// legacy single-URL format and yields one entry with empty content. Entries
/// with a blank url are dropped; a missing or blank title decodes to "".
pub fn extract_payment_links(pay_links: &str) -> Vec<FeedFunding> {
    if pay_links.trim().is_empty() {
        return Vec::new();
    }

    if !pay_links.contains(FUNDING_ENTRIES_SEPARATOR) && !pay_links.contains(FUNDING_TITLE_SEPARATOR)
    {
        return vec![FeedFunding::new(pay_links, "")];
    }

    pay_links
        .split(FUNDING_ENTRIES_SEPARATOR)
        .filter_map(|entry| {
            let mut parts = entry.split(FUNDING_TITLE_SEPARATOR);
            let url = parts.next().unwrap_or_default();
            if url.trim().is_empty() {
                return None;
            }
            let title = parts
                .next()
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_default();
            Some(FeedFunding::new(url, title))
        })
        .collect()
}

/// Encodes funding entries into the stored string form.
pub fn get_payment_links_as_string(funding: &[FeedFunding]) -> String {
    let mut result = String::new();
    for (idx, fund) in funding.iter().enumerate() {
        if idx > 0 {
            result.push(FUNDING_ENTRIES_SEPARATOR);
        }
        result.push_str(fund.url.as_deref().unwrap_or_default());
        result.push(FUNDING_TITLE_SEPARATOR);
        result.push_str(fund.content.as_deref().unwrap_or_default());
    }
    result
}
