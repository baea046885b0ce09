//! Mutable, reference-shared JSON documents.
//!
//! `json-kit` models a JSON document as a tree of [`Value`]s whose
//! containers, [`JsonObject`] and [`JsonArray`], are shared handles:
//! cloning one aliases the same storage, so a sub-tree read out of a
//! document can be mutated and the change is visible from the root.
//! Typed accessors never fail; they answer `None` or a caller default.
//!
//! ```
//! use json_kit::{JsonArray, JsonObject};
//!
//! let doc = JsonObject::from_json_str(
//!     r#"{"key1":[1,2,3],"key2":{"a":true},"key3":null,"key4":1.23}"#,
//! )
//! .unwrap();
//! assert_eq!(doc.f64("key4"), Some(1.23));
//! assert_eq!(doc.string_or("key3", "x"), "x");
//! assert_eq!(doc.string_or("key9", "x"), "x");
//!
//! let nums = doc.array("key1").unwrap();
//! nums.put_at(1, 9).unwrap();
//! assert_eq!(doc.to_json_string(false).unwrap(),
//!     r#"{"key1":[1,9,3],"key2":{"a":true},"key3":null,"key4":1.23}"#);
//!
//! let list = JsonArray::new();
//! list.put("a").put_opt(None::<&str>);
//! assert_eq!(list.to_string(), r#"["a",null]"#);
//! ```

pub mod array;
pub mod cli;
pub mod codec;
pub mod convert;
mod cycle;
pub mod error;
mod interop;
pub mod iter;
pub mod number;
pub mod object;
pub mod pointer;
mod validate;
pub mod value;

pub use array::JsonArray;
pub use codec::{DecodeOptions, EncodeOptions, JsonDecoder, JsonEncoder};
pub use convert::FromValue;
pub use error::{JsonError, Result};
pub use iter::{KeyValues, Values};
pub use number::Number;
pub use object::JsonObject;
pub use value::{Value, ValueKind};

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
