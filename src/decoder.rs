//! Mount-token decoding.
//!
//! Routing libraries keep prefix mounts as compiled patterns rather than the
//! literal path they were registered with. The string form of such a pattern
//! looks like `/^\/api\/?(?=\/|$)/i`; [`decode`] recovers `api` from it by
//! stripping the anchors, the optional-trailing-slash lookahead and the
//! escaping.
//!
//! Decoding is a best-effort heuristic. Patterns with capture groups or
//! alternations are returned partially decoded and never rejected.

use crate::registry::MountToken;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lookahead a prefix pattern ends with: optional slash, then a slash or the end.
const PREFIX_LOOKAHEAD: &str = r"\/?(?=\/|$)";

static ESCAPED_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\([^A-Za-z0-9])").expect("escape regex should be valid"));

/// Decode a mount token into the literal path segment it represents.
///
/// Literal paths are returned verbatim. The match-everything root pattern
/// decodes to an empty string.
pub fn decode(token: &MountToken) -> String {
    match token {
        MountToken::Path(path) => path.clone(),
        MountToken::Pattern(pattern) => decode_pattern(pattern),
    }
}

fn decode_pattern(pattern: &str) -> String {
    let mut body = strip_delimiters(pattern);

    body = body.strip_prefix('^').unwrap_or(body);
    for suffix in [PREFIX_LOOKAHEAD, r"(?=\/|$)", r"\/?$", "$"] {
        if let Some(stripped) = body.strip_suffix(suffix) {
            body = stripped;
            break;
        }
    }
    body = body.strip_prefix(r"\/").unwrap_or(body);

    let decoded = ESCAPED_CHAR.replace_all(body, "$1");
    let decoded = decoded.trim_end_matches('/').to_string();

    debug!("Decoded mount pattern {} -> '{}'", pattern, decoded);
    decoded
}

/// Strip the `/.../flags` delimiters of a pattern literal, if present.
fn strip_delimiters(pattern: &str) -> &str {
    if let Some(inner) = pattern.strip_prefix('/') {
        if let Some(end) = inner.rfind('/') {
            let flags = &inner[end + 1..];
            if flags.chars().all(|c| c.is_ascii_alphabetic()) {
                return &inner[..end];
            }
        }
    }
    pattern
}

/// Build the pattern form a routing library stores for a prefix mount at `path`.
///
/// Only the slashes are escaped, so this is meant for literal prefixes.
pub fn encode_prefix(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    let mut pattern = String::from("/^");
    if !trimmed.is_empty() {
        pattern.push_str(r"\/");
        pattern.push_str(&trimmed.replace('/', r"\/"));
    }
    pattern.push_str(PREFIX_LOOKAHEAD);
    pattern.push_str("/i");
    pattern
}

/// Append a decoded segment to a path prefix.
///
/// An empty segment (or a bare `/`) contributes nothing; otherwise exactly one
/// separator ends up between the prefix and the segment.
pub fn join(prefix: &str, segment: &str) -> String {
    let segment = segment.trim_end_matches('/');
    if segment.is_empty() {
        prefix.to_string()
    } else if segment.starts_with('/') {
        format!("{}{}", prefix, segment)
    } else {
        format!("{}/{}", prefix, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> MountToken {
        MountToken::Pattern(s.to_string())
    }

    #[test]
    fn test_decode_literal_path_verbatim() {
        assert_eq!(decode(&MountToken::Path("/api".to_string())), "/api");
    }

    #[test]
    fn test_decode_prefix_pattern() {
        assert_eq!(decode(&pattern(r"/^\/api\/?(?=\/|$)/i")), "api");
    }

    #[test]
    fn test_decode_nested_prefix_pattern() {
        assert_eq!(decode(&pattern(r"/^\/api\/v1\/?(?=\/|$)/i")), "api/v1");
    }

    #[test]
    fn test_decode_root_pattern_is_empty() {
        assert_eq!(decode(&pattern(r"/^\/?(?=\/|$)/i")), "");
    }

    #[test]
    fn test_decode_end_anchored_pattern() {
        assert_eq!(decode(&pattern(r"/^\/health\/?$/i")), "health");
    }

    #[test]
    fn test_decode_unescapes_punctuation() {
        assert_eq!(decode(&pattern(r"/^\/files\.v2\/?(?=\/|$)/i")), "files.v2");
    }

    #[test]
    fn test_decode_malformed_pattern_degrades() {
        // No delimiters, no anchors: returned as-is minus escapes
        assert_eq!(decode(&pattern(r"weird\/thing")), "weird/thing");
        // Capture groups survive untouched
        assert_eq!(
            decode(&pattern(r"/^\/users\/(?:([^\/]+?))\/?(?=\/|$)/i")),
            "users/(?:([^/]+?))"
        );
    }

    #[test]
    fn test_encode_prefix() {
        assert_eq!(encode_prefix("/api"), r"/^\/api\/?(?=\/|$)/i");
        assert_eq!(encode_prefix("/api/v1/"), r"/^\/api\/v1\/?(?=\/|$)/i");
        assert_eq!(encode_prefix("/"), r"/^\/?(?=\/|$)/i");
    }

    #[test]
    fn test_encode_then_decode_recovers_segment() {
        for path in ["/api", "/api/v1", "/zaz"] {
            let token = pattern(&encode_prefix(path));
            assert_eq!(format!("/{}", decode(&token)), path);
        }
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "api"), "/api");
        assert_eq!(join("/api", "v1"), "/api/v1");
        assert_eq!(join("/api", "/v1"), "/api/v1");
        assert_eq!(join("/api", ""), "/api");
        assert_eq!(join("", "/"), "");
    }
}
