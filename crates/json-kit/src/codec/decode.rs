use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use tracing::debug;

use super::DecodeOptions;
use crate::array::JsonArray;
use crate::error::{JsonError, Result};
use crate::number::Number;
use crate::object::{JsonObject, Map};
use crate::value::Value;

const UTF8_BOM: char = '\u{feff}';

/// Parses JSON text into the mutable model.
///
/// Every input form (bytes, text, reader, file) ends up in the same
/// pipeline: read fully, check UTF-8, skip a leading BOM, then decode
/// strictly. Nothing is returned unless the whole input is valid.
///
/// ```
/// use json_kit::{DecodeOptions, JsonDecoder};
///
/// let value = JsonDecoder::new().decode_str(r#"{"a":[1,2]}"#).unwrap();
/// assert_eq!(value.get("a").and_then(|a| a.at(1)), Some(2.into()));
///
/// let strict = JsonDecoder::with_options(DecodeOptions { allow_fragments: false });
/// assert!(strict.decode_str("42").unwrap_err().is_invalid_root());
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    options: DecodeOptions,
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Value> {
        debug!(
            len = bytes.len(),
            allow_fragments = self.options.allow_fragments,
            "decoding json"
        );
        let text = std::str::from_utf8(bytes)?;
        self.decode_text(text)
    }

    pub fn decode_str(&self, text: &str) -> Result<Value> {
        debug!(
            len = text.len(),
            allow_fragments = self.options.allow_fragments,
            "decoding json text"
        );
        self.decode_text(text)
    }

    /// Reads `reader` to EOF, then decodes.
    pub fn decode_reader<R: Read>(&self, mut reader: R) -> Result<Value> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.decode(&bytes)
    }

    pub fn decode_path(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading json file");
        let bytes = std::fs::read(path)?;
        self.decode(&bytes)
    }

    /// Decodes a document whose root must be an object.
    pub fn decode_object(&self, bytes: &[u8]) -> Result<JsonObject> {
        expect_object(self.decode(bytes)?)
    }

    /// Decodes a document whose root must be an array.
    pub fn decode_array(&self, bytes: &[u8]) -> Result<JsonArray> {
        expect_array(self.decode(bytes)?)
    }

    fn decode_text(&self, text: &str) -> Result<Value> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        let value: Value = serde_json::from_str(text).map_err(JsonError::from_decode)?;
        if !self.options.allow_fragments && !value.kind().is_container() {
            return Err(JsonError::InvalidRoot {
                expected: "object or array",
                found: value.kind(),
            });
        }
        Ok(value)
    }
}

fn expect_object(value: Value) -> Result<JsonObject> {
    match value {
        Value::Object(o) => Ok(o),
        other => Err(JsonError::InvalidRoot {
            expected: "object",
            found: other.kind(),
        }),
    }
}

fn expect_array(value: Value) -> Result<JsonArray> {
    match value {
        Value::Array(a) => Ok(a),
        other => Err(JsonError::InvalidRoot {
            expected: "array",
            found: other.kind(),
        }),
    }
}

// ── Convenience constructors ─────────────────────────────────────────────

impl Value {
    pub fn from_json_str(text: &str) -> Result<Value> {
        JsonDecoder::new().decode_str(text)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Value> {
        JsonDecoder::new().decode(bytes)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Value> {
        JsonDecoder::new().decode_reader(reader)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Value> {
        JsonDecoder::new().decode_path(path)
    }
}

impl JsonObject {
    /// Parses `text`; fails with [`JsonError::InvalidRoot`] unless the
    /// document is an object.
    pub fn from_json_str(text: &str) -> Result<JsonObject> {
        expect_object(Value::from_json_str(text)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<JsonObject> {
        expect_object(Value::from_slice(bytes)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<JsonObject> {
        expect_object(Value::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<JsonObject> {
        expect_object(Value::from_path(path)?)
    }
}

impl JsonArray {
    /// Parses `text`; fails with [`JsonError::InvalidRoot`] unless the
    /// document is an array.
    pub fn from_json_str(text: &str) -> Result<JsonArray> {
        expect_array(Value::from_json_str(text)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<JsonArray> {
        expect_array(Value::from_slice(bytes)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<JsonArray> {
        expect_array(Value::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<JsonArray> {
        expect_array(Value::from_path(path)?)
    }
}

impl FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self> {
        Value::from_json_str(s)
    }
}

impl FromStr for JsonObject {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self> {
        JsonObject::from_json_str(s)
    }
}

impl FromStr for JsonArray {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self> {
        JsonArray::from_json_str(s)
    }
}

// ── serde ────────────────────────────────────────────────────────────────

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for JsonObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(o) => Ok(o),
            other => Err(de::Error::custom(format_args!(
                "expected object, found {}",
                other.kind()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for JsonArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(a) => Ok(a),
            other => Err(de::Error::custom(format_args!(
                "expected array, found {}",
                other.kind()
            ))),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Value, D::Error> {
        Value::deserialize(d)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(JsonArray::from_vec(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Value, A::Error> {
        let mut entries = Map::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((k, v)) = map.next_entry::<String, Value>()? {
            entries.insert(k, v);
        }
        Ok(Value::Object(JsonObject::from_map(entries)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_fragment_allowed_by_default() {
        assert_eq!(Value::from_json_str("42").unwrap(), Value::from(42));
        assert_eq!(Value::from_json_str("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_fragments_rejected_when_disabled() {
        let decoder = JsonDecoder::with_options(DecodeOptions {
            allow_fragments: false,
        });
        let err = decoder.decode_str("\"s\"").unwrap_err();
        assert!(matches!(
            err,
            JsonError::InvalidRoot {
                expected: "object or array",
                ..
            }
        ));
        assert!(decoder.decode_str("[]").is_ok());
    }

    #[test]
    fn test_bom_is_skipped() {
        let bytes = b"\xef\xbb\xbf{\"a\":1}";
        let o = JsonObject::from_slice(bytes).unwrap();
        assert_eq!(o.i64("a"), Some(1));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = Value::from_slice(b"[\"\xff\"]").unwrap_err();
        assert!(matches!(
            err,
            JsonError::InvalidCharacterEncoding { valid_up_to: 2 }
        ));
    }

    #[test]
    fn test_trailing_garbage_is_parse_error() {
        let err = Value::from_json_str("{} x").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_wrong_root_kind() {
        let err = JsonArray::from_json_str("{}").unwrap_err();
        assert!(matches!(
            err,
            JsonError::InvalidRoot {
                expected: "array",
                found: crate::ValueKind::Object,
            }
        ));
    }

    #[test]
    fn test_integers_stay_exact() {
        let a = JsonArray::from_json_str("[9223372036854775807,-9223372036854775808,1.5]").unwrap();
        assert_eq!(a.i64(0), Some(i64::MAX));
        assert_eq!(a.i64(1), Some(i64::MIN));
        assert_eq!(a.f64(2), Some(1.5));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let o = JsonObject::from_json_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        assert_eq!(o.keys(), vec!["a", "b"]);
        assert_eq!(o.i64("a"), Some(3));
    }
}
