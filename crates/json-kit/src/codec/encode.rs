use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use tracing::debug;

use super::EncodeOptions;
use crate::array::JsonArray;
use crate::error::{JsonError, Result};
use crate::object::JsonObject;
use crate::value::Value;

/// Writes the model out as JSON text.
///
/// The tree is checked before any output is produced, so a rejected value
/// never leaves a half-written document behind in the target.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    options: EncodeOptions,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(128);
        self.encode_to_writer(value, &mut out)?;
        Ok(out)
    }

    pub fn encode_to_string(&self, value: &Value) -> Result<String> {
        let bytes = self.encode(value)?;
        Ok(String::from_utf8(bytes)?)
    }

    pub fn encode_to_writer<W: Write>(&self, value: &Value, writer: W) -> Result<()> {
        debug!(
            kind = %value.kind(),
            pretty = self.options.pretty,
            sort_keys = self.options.sort_keys,
            "encoding json"
        );
        value.validate()?;
        let tree = Ordered {
            value,
            sort_keys: self.options.sort_keys,
        };
        let written = if self.options.pretty {
            serde_json::to_writer_pretty(writer, &tree)
        } else {
            serde_json::to_writer(writer, &tree)
        };
        written.map_err(JsonError::from_encode)
    }

    /// Creates or truncates the file at `path` and writes the document.
    pub fn encode_to_path(&self, value: &Value, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        // Check before touching the file.
        value.validate()?;
        let mut writer = BufWriter::new(File::create(path)?);
        self.encode_to_writer(value, &mut writer)?;
        writer.flush()?;
        debug!(path = %path.display(), "wrote json file");
        Ok(())
    }
}

fn encoder(pretty: bool) -> JsonEncoder {
    JsonEncoder::with_options(EncodeOptions {
        pretty,
        ..EncodeOptions::default()
    })
}

impl Value {
    /// Compact (`pretty == false`) or two-space indented JSON text.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        encoder(pretty).encode_to_string(self)
    }

    pub fn to_json_bytes(&self, pretty: bool) -> Result<Vec<u8>> {
        encoder(pretty).encode(self)
    }
}

impl JsonObject {
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        Value::from(self).to_json_string(pretty)
    }

    pub fn to_json_bytes(&self, pretty: bool) -> Result<Vec<u8>> {
        Value::from(self).to_json_bytes(pretty)
    }
}

impl JsonArray {
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        Value::from(self).to_json_string(pretty)
    }

    pub fn to_json_bytes(&self, pretty: bool) -> Result<Vec<u8>> {
        Value::from(self).to_json_bytes(pretty)
    }
}

// ── serde ────────────────────────────────────────────────────────────────

/// Serializes a subtree, optionally with object keys sorted.
///
/// Assumes the tree has already been validated: a cycle here would recurse
/// without bound.
struct Ordered<'a> {
    value: &'a Value,
    sort_keys: bool,
}

impl Ordered<'_> {
    fn child<'b>(&self, value: &'b Value) -> Ordered<'b> {
        Ordered {
            value,
            sort_keys: self.sort_keys,
        }
    }
}

impl Serialize for Ordered<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(a) => {
                let items = a.borrow();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            Value::Object(o) => {
                let entries = o.borrow();
                let mut pairs: Vec<(&String, &Value)> = entries.iter().collect();
                if self.sort_keys {
                    pairs.sort_by(|a, b| a.0.cmp(b.0));
                }
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, value) in pairs {
                    map.serialize_entry(key, &self.child(value))?;
                }
                map.end()
            }
        }
    }
}

/// Serializes in insertion order. The tree is validated first, so a cyclic
/// graph fails with an error instead of overflowing the stack.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.validate().map_err(serde::ser::Error::custom)?;
        Ordered {
            value: self,
            sort_keys: false,
        }
        .serialize(serializer)
    }
}

impl Serialize for JsonObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Value::from(self).serialize(serializer)
    }
}

impl Serialize for JsonArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Value::from(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_has_no_whitespace() {
        let o: JsonObject = [("a", 1), ("b", 2)].into_iter().collect();
        o.put("c", vec!["x", "y"]);
        assert_eq!(o.to_json_string(false).unwrap(), r#"{"a":1,"b":2,"c":["x","y"]}"#);
    }

    #[test]
    fn test_pretty_indents_two_spaces() {
        let o = JsonObject::new();
        o.put("a", vec![1]);
        assert_eq!(o.to_json_string(true).unwrap(), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_sort_keys() {
        let o: JsonObject = [("b", 1), ("a", 2)].into_iter().collect();
        let encoder = JsonEncoder::with_options(EncodeOptions {
            sort_keys: true,
            ..EncodeOptions::default()
        });
        assert_eq!(encoder.encode_to_string(&o.into()).unwrap(), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn test_non_finite_is_rejected_with_pointer() {
        let o = JsonObject::new();
        JsonArray::new_in_object(&o, "xs").put(1).put(f64::NAN);
        let err = o.to_json_string(false).unwrap_err();
        match err {
            JsonError::Encoding { pointer, .. } => assert_eq!(pointer, "/xs/1"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cycle_is_rejected() {
        let a = JsonArray::new();
        a.put(&a);
        assert!(matches!(
            a.to_json_string(false),
            Err(JsonError::Encoding { .. })
        ));
        a.clear();
    }

    #[test]
    fn test_shared_subtree_is_not_a_cycle() {
        let shared = JsonArray::from(vec![1]);
        let root = JsonArray::new();
        root.put(&shared).put(&shared);
        assert_eq!(root.to_json_string(false).unwrap(), "[[1],[1]]");
    }

    #[test]
    fn test_serde_path_reports_validation_message() {
        let a = JsonArray::new();
        a.put(&a);
        let err = serde_json::to_vec(&a).unwrap_err();
        match JsonError::from_encode(err) {
            JsonError::Encoding { reason, .. } => {
                assert!(reason.contains("cyclic reference"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        a.clear();
    }

    #[test]
    fn test_serde_json_sees_insertion_order() {
        let o: JsonObject = [("z", 1), ("a", 2)].into_iter().collect();
        assert_eq!(serde_json::to_string(&o).unwrap(), r#"{"z":1,"a":2}"#);
    }
}
