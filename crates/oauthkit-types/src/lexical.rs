//! Lexical host classification
//!
//! Pure string predicates shared by the URI and identifier validators. Nothing in
//! this module parses a URL; the helpers look at raw bytes so that loopback
//! membership stays byte-exact (no case folding, no bracket normalization).

use once_cell::sync::Lazy;
use regex::Regex;

/// Hosts accepted as loopback, compared byte-for-byte
pub const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

/// Loopback hosts that are IP literals (RFC 8252 §7.3 recommends these over `localhost`)
pub const LOOPBACK_IP_HOSTS: [&str; 2] = ["127.0.0.1", "[::1]"];

const IPV4_PATTERN: &str =
    r"(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3}";

static IPV4_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{IPV4_PATTERN}$")).expect("Invalid IPv4 regex pattern")
});

// Full, compressed and IPv4-mixed notations.
static IPV6_REGEX: Lazy<Regex> = Lazy::new(|| {
    let h = "[0-9A-Fa-f]{1,4}";
    let pattern = format!(
        "^(?:\
         (?:{h}:){{7}}(?:{h}|:)\
         |(?:{h}:){{1,7}}:\
         |(?:{h}:){{1,6}}:{h}\
         |(?:{h}:){{1,5}}(?::{h}){{1,2}}\
         |(?:{h}:){{1,4}}(?::{h}){{1,3}}\
         |(?:{h}:){{1,3}}(?::{h}){{1,4}}\
         |(?:{h}:){{1,2}}(?::{h}){{1,5}}\
         |{h}:(?::{h}){{1,6}}\
         |:(?:(?::{h}){{1,7}}|:)\
         |::(?:[Ff]{{4}}(?::0{{1,4}})?:)?{IPV4_PATTERN}\
         |(?:{h}:){{1,4}}:{IPV4_PATTERN}\
         )$"
    );
    Regex::new(&pattern).expect("Invalid IPv6 regex pattern")
});

/// Whether `host` is exactly one of [`LOOPBACK_HOSTS`]
pub fn is_loopback_host(host: &str) -> bool {
    LOOPBACK_HOSTS.contains(&host)
}

/// Whether `host` is a dotted-quad IPv4 address or an IPv6 address
///
/// IPv6 hosts may be given with or without the surrounding brackets used in URLs.
pub fn is_ip_literal(host: &str) -> bool {
    if IPV4_REGEX.is_match(host) {
        return true;
    }

    let unbracketed = host
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(host);
    IPV6_REGEX.is_match(unbracketed)
}

/// Extract the host of `scheme://[userinfo@]host[:port][/path][?query][#fragment]`
/// exactly as written
///
/// Bracketed IPv6 hosts keep their brackets. Returns `None` when there is no
/// `://` separator or the host is empty.
pub fn authority_host(raw: &str) -> Option<&str> {
    let (_, rest) = raw.split_once("://")?;
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];

    let host_and_port = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };

    let host = if host_and_port.starts_with('[') {
        match host_and_port.find(']') {
            Some(close) => &host_and_port[..=close],
            None => host_and_port,
        }
    } else {
        match host_and_port.find(':') {
            Some(colon) => &host_and_port[..colon],
            None => host_and_port,
        }
    };

    if host.is_empty() { None } else { Some(host) }
}
