//! JSON Pointer (RFC 6901) utilities.
//!
//! A pointer is the empty string (the whole document) or a sequence of
//! `/`-prefixed reference tokens, where a literal `~` inside a token is
//! written `~0` and a literal `/` is written `~1`.
//!
//! # Example
//!
//! ```
//! use json_delta_json_pointer::{append_component, format_json_pointer, parse_json_pointer};
//!
//! let pointer = append_component("/config", "log/level");
//! assert_eq!(pointer, "/config/log~1level");
//! assert_eq!(parse_json_pointer(&pointer), vec!["config", "log/level"]);
//! assert_eq!(format_json_pointer(&parse_json_pointer(&pointer)), pointer);
//! ```

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("INVALID_ESCAPE")]
    InvalidEscape,
}

/// Escapes one reference token.
///
/// `~` becomes `~0` and `/` becomes `~1`. `~` must be rewritten first so
/// the `~` introduced for `/` is not escaped again.
pub fn escape_component(component: &str) -> String {
    if !component.contains('~') && !component.contains('/') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Unescapes one reference token. The inverse of [`escape_component`]:
/// `~1` becomes `/` first, then `~0` becomes `~`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Extends a pointer by one token, escaping the token as needed.
///
/// The parent pointer is used verbatim: `""` (the root) grows to
/// `/token`, `/a` grows to `/a/token`.
pub fn append_component(pointer: &str, component: &str) -> String {
    let mut out = String::with_capacity(pointer.len() + component.len() + 1);
    out.push_str(pointer);
    out.push('/');
    out.push_str(&escape_component(component));
    out
}

/// Splits a pointer string into unescaped reference tokens.
///
/// The empty pointer yields no tokens; `"/"` yields one empty token.
pub fn parse_json_pointer(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer[1..].split('/').map(unescape_component).collect()
}

/// Joins unescaped tokens back into a pointer string.
pub fn format_json_pointer(components: &[String]) -> String {
    let mut out = String::new();
    for component in components {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Checks that a pointer string is well formed: either empty or starting
/// with `/`, with every `~` followed by `0` or `1`.
///
/// # Example
///
/// ```
/// use json_delta_json_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();
/// validate_json_pointer("/a~0b/c").unwrap();
/// validate_json_pointer("a/b").unwrap_err();
/// validate_json_pointer("/a~2").unwrap_err();
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), JsonPointerError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(JsonPointerError::PointerInvalid);
    }
    let bytes = pointer.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'~' {
            match bytes.get(i + 1) {
                Some(b'0') | Some(b'1') => i += 2,
                _ => return Err(JsonPointerError::InvalidEscape),
            }
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Checks that a token is a canonical non-negative array index: digits
/// only, no leading zero except `"0"` itself.
pub fn is_valid_index(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let bytes = token.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_plain_token_unchanged() {
        assert_eq!(escape_component("foo"), "foo");
        assert_eq!(escape_component(""), "");
    }

    #[test]
    fn escape_rewrites_tilde_then_slash() {
        assert_eq!(escape_component("a~b"), "a~0b");
        assert_eq!(escape_component("c/d"), "c~1d");
        assert_eq!(escape_component("~/"), "~0~1");
        assert_eq!(escape_component("~1"), "~01");
    }

    #[test]
    fn unescape_inverts_escape() {
        for token in ["", "plain", "a~b", "c/d", "~/", "~1", "~0", "//~~", "a~0b"] {
            assert_eq!(unescape_component(&escape_component(token)), token);
        }
    }

    #[test]
    fn append_grows_from_root() {
        assert_eq!(append_component("", "a"), "/a");
        assert_eq!(append_component("/a", "b"), "/a/b");
        assert_eq!(append_component("/a", "x/y~z"), "/a/x~1y~0z");
    }

    #[test]
    fn parse_empty_and_slash() {
        assert_eq!(parse_json_pointer(""), Vec::<String>::new());
        assert_eq!(parse_json_pointer("/"), vec![""]);
    }

    #[test]
    fn parse_unescapes_tokens() {
        assert_eq!(parse_json_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
        assert_eq!(parse_json_pointer("/foo/0/bar"), vec!["foo", "0", "bar"]);
    }

    #[test]
    fn format_parse_roundtrip() {
        for pointer in ["", "/", "/foo", "/foo/bar", "/a~0b/c~1d", "/x//y"] {
            assert_eq!(format_json_pointer(&parse_json_pointer(pointer)), pointer);
        }
    }

    #[test]
    fn validate_accepts_root_and_absolute() {
        validate_json_pointer("").unwrap();
        validate_json_pointer("/").unwrap();
        validate_json_pointer("/a/b~0c/d~1e").unwrap();
    }

    #[test]
    fn validate_rejects_relative_and_bad_escape() {
        assert_eq!(
            validate_json_pointer("a/b"),
            Err(JsonPointerError::PointerInvalid)
        );
        assert_eq!(
            validate_json_pointer("/a~2b"),
            Err(JsonPointerError::InvalidEscape)
        );
        assert_eq!(
            validate_json_pointer("/a~"),
            Err(JsonPointerError::InvalidEscape)
        );
    }

    #[test]
    fn index_tokens() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("42"));
        assert!(!is_valid_index(""));
        assert!(!is_valid_index("01"));
        assert!(!is_valid_index("-1"));
        assert!(!is_valid_index("1.5"));
    }
}
