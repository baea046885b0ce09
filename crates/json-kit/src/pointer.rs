//! JSON Pointer (RFC 6901) lookups over the model.
//!
//! ```
//! use json_kit::{pointer, Value};
//!
//! let doc = Value::from_json_str(r#"{"fonts":[{"name":"a/b"}]}"#).unwrap();
//! assert_eq!(doc.pointer("/fonts/0/name"), Some("a/b".into()));
//! assert_eq!(pointer::parse_pointer("/a~1b/~0"), Some(vec!["a/b".to_string(), "~".to_string()]));
//! ```

use crate::value::Value;

/// Reverses [`escape_component`]: `~1` becomes `/`, `~0` becomes `~`.
///
/// RFC 6901 section 4 requires `~1` to be replaced before `~0`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, so "~01" decodes to "~1" and not "/".
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes `~` as `~0` and `/` as `~1` (RFC 6901 section 3).
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Splits a pointer into unescaped reference tokens.
///
/// `""` is the root and yields no tokens. Any other pointer must start
/// with `/`; `None` otherwise.
pub fn parse_pointer(pointer: &str) -> Option<Vec<String>> {
    if pointer.is_empty() {
        return Some(Vec::new());
    }
    let rest = pointer.strip_prefix('/')?;
    Some(rest.split('/').map(unescape_component).collect())
}

/// Joins reference tokens into a pointer. No tokens gives the root `""`.
pub fn format_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Array tokens are decimal with no sign and no leading zero. The `-`
/// token (RFC 6901 section 4) names no existing element, so it never matches.
fn parse_index(token: &str) -> Option<usize> {
    let bytes = token.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return None;
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    token.parse().ok()
}

impl Value {
    /// The value `pointer` refers to, or `None` when the pointer is
    /// malformed or names something that does not exist.
    pub fn pointer(&self, pointer: &str) -> Option<Value> {
        let path = parse_pointer(pointer)?;
        let mut current = self.clone();
        for token in &path {
            current = match &current {
                Value::Object(o) => o.get(token)?,
                Value::Array(a) => a.get(parse_index(token)?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}
