//! Text-mode scalar serialization over byte streams.
//!
//! textwire turns primitive values into compact, self-delimiting ASCII
//! tokens and back. A field-by-field serializer drives it one scalar at a
//! time; the wire carries no type tags, so both sides must agree on the
//! field order.
//!
//! # Crate Structure
//!
//! - [`stream`]: Exact-count byte stream traits and adapters
//! - [`codec`]: Token framing, numeric conversion, reader and writer

/// Re-export stream types.
pub mod stream {
    pub use textwire_stream::*;
}

/// Re-export codec types.
pub mod codec {
    pub use textwire_codec::*;
}

pub use textwire_codec::{CodecError, Scalar, ScalarKind, TextReader, TextScalar, TextWriter};
