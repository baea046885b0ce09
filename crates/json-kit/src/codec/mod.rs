//! Text boundary: JSON bytes in, mutable model out, and back.
//!
//! Both directions go through `serde_json`. The decoder feeds its tokens
//! into the model's `Deserialize` visitor, and the encoder drives
//! `serde_json`'s compact or pretty formatter from the model's `Serialize`
//! impl.

mod decode;
mod encode;

pub use decode::JsonDecoder;
pub use encode::JsonEncoder;

/// Options for [`JsonDecoder`].
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// If true, a bare scalar (`42`, `"s"`, `null`) is accepted as a
    /// document. If false, the root must be an object or an array.
    pub allow_fragments: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            allow_fragments: true,
        }
    }
}

/// Options for [`JsonEncoder`].
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Indent nested structures by two spaces, one entry per line.
    pub pretty: bool,
    /// Emit object keys in byte order instead of insertion order.
    pub sort_keys: bool,
}

impl EncodeOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}
