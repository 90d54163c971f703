//! Text-mode framing for primitive scalar values.
//!
//! Every scalar becomes one self-delimiting ASCII token:
//! - A leading space as a framing sentinel
//! - For numeric kinds, a two-digit decimal length code
//! - The payload (a raw byte, `'0'`/`'1'`, or decimal text)
//!
//! The wire carries no type tags. Reader and writer agree on the kind of each
//! field out of band, either statically through [`TextScalar`] or at runtime
//! through [`ScalarKind`].

pub mod conv;
pub mod error;
pub mod kind;
pub mod reader;
pub mod scalar;
pub mod wire;
pub mod writer;

pub use conv::{ConvError, Float, Integer, NumericConv, PlainConv, StdConv};
pub use error::{CodecError, ErrorClass, Result};
pub use kind::{ParseKindError, Scalar, ScalarKind};
pub use reader::TextReader;
pub use scalar::TextScalar;
pub use wire::{HEADER_SIZE, MAX_PAYLOAD_LEN, SENTINEL, SHORT_TOKEN_SIZE};
pub use writer::TextWriter;
