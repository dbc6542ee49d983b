// ABOUTME: Heuristic that recognises downloads blocked by a DNS-level ad blocker.
// ABOUTME: Such blockers resolve hosts to 127.x or 0.x, which shows up in connect errors.

use std::error::Error;

use once_cell::sync::Lazy;
use regex::Regex;

static IPV4_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,3}\.){3}[0-9]{1,3}").expect("valid IPv4 regex"));

/// Walks the error and its `source()` chain. The first message that contains
/// an IPv4 literal decides: loopback (`127.`) or unspecified (`0.`) means blocked.
///
/// This is a heuristic. An error that mentions some unrelated address first
/// can produce either answer.
pub fn was_download_blocked(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(ip) = IPV4_RE.find(&e.to_string()) {
            let ip = ip.as_str();
            return ip.starts_with("127.") || ip.starts_with("0.");
        }
        current = e.source();
    }
    false
}
