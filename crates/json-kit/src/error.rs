//! Error type shared by every fallible json-kit operation.
//!
//! Typed accessors never produce these: a missing key or a mismatched type
//! reads as `None` (or the supplied default). Errors are reserved for
//! mutations that cannot be applied and for the parse/serialize boundary.

use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBound { index: usize, len: usize },
    #[error("input is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidCharacterEncoding { valid_up_to: usize },
    #[error("expected top-level {expected}, found {found}")]
    InvalidRoot {
        expected: &'static str,
        found: ValueKind,
    },
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("cannot encode value at '{pointer}': {reason}")]
    Encoding { pointer: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = JsonError> = std::result::Result<T, E>;

impl From<std::str::Utf8Error> for JsonError {
    fn from(e: std::str::Utf8Error) -> Self {
        JsonError::InvalidCharacterEncoding {
            valid_up_to: e.valid_up_to(),
        }
    }
}

impl From<std::string::FromUtf8Error> for JsonError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        e.utf8_error().into()
    }
}

impl JsonError {
    /// Maps a `serde_json` failure from the decode side.
    ///
    /// I/O failures keep their `io::Error`; everything else is a grammar
    /// problem reported with its position.
    pub(crate) fn from_decode(e: serde_json::Error) -> Self {
        if e.is_io() {
            return JsonError::Io(e.into());
        }
        JsonError::Parse {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }

    /// Maps a `serde_json` failure from the encode side, keeping the
    /// serializer's message as the reason.
    pub(crate) fn from_encode(e: serde_json::Error) -> Self {
        if e.is_io() {
            return JsonError::Io(e.into());
        }
        JsonError::Encoding {
            pointer: String::new(),
            reason: e.to_string(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, JsonError::Parse { .. })
    }

    pub fn is_invalid_root(&self) -> bool {
        matches!(self, JsonError::InvalidRoot { .. })
    }

    pub fn is_index_out_of_bound(&self) -> bool {
        matches!(self, JsonError::IndexOutOfBound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_error_maps_to_encoding_variant() {
        let bytes = vec![b'{', 0xff, b'}'];
        let err: JsonError = std::str::from_utf8(&bytes).unwrap_err().into();
        match err {
            JsonError::InvalidCharacterEncoding { valid_up_to } => assert_eq!(valid_up_to, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_keeps_position() {
        let e = serde_json::from_str::<serde_json::Value>("{\n  x }").unwrap_err();
        let err = JsonError::from_decode(e);
        assert!(err.is_parse());
        if let JsonError::Parse { line, .. } = err {
            assert_eq!(line, 2);
        }
    }

    #[test]
    fn test_encode_error_keeps_serializer_message() {
        let e = <serde_json::Error as serde::ser::Error>::custom("map key must be a string");
        match JsonError::from_encode(e) {
            JsonError::Encoding { pointer, reason } => {
                assert_eq!(pointer, "");
                assert_eq!(reason, "map key must be a string");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_messages() {
        let err = JsonError::IndexOutOfBound { index: 6, len: 6 };
        assert_eq!(err.to_string(), "index 6 out of bounds for array of length 6");
        let err = JsonError::InvalidRoot {
            expected: "object",
            found: ValueKind::Array,
        };
        assert_eq!(err.to_string(), "expected top-level object, found array");
    }
}
