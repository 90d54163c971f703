//! Static dispatch from Rust types to token shapes.
//!
//! | Rust type | Token |
//! |---|---|
//! | `u8`, `i8` | sentinel + raw byte |
//! | `bool` | sentinel + `'0'` / `'1'` |
//! | `i16` .. `u64` | sentinel + length code + decimal text |
//! | `f32`, `f64` | sentinel + length code + float text |
//!
//! Numeric tokens are staged in a stack array sized from the type (see
//! [`Integer::TEXT_CAPACITY`] and [`Float::TEXT_CAPACITY`]).

use textwire_stream::{InputStream, OutputStream};

use crate::conv::{Float, Integer, NumericConv};
use crate::error::{CodecError, Result};
use crate::kind::ScalarKind;
use crate::reader::TextReader;
use crate::wire::HEADER_SIZE;
use crate::writer::TextWriter;

/// A value that can be carried as exactly one text token.
pub trait TextScalar: Sized {
    const KIND: ScalarKind;

    fn read_text<S: InputStream, C: NumericConv>(reader: &mut TextReader<S, C>) -> Result<Self>;

    fn write_text<S: OutputStream, C: NumericConv>(
        &self,
        writer: &mut TextWriter<S, C>,
    ) -> Result<()>;
}

impl TextScalar for u8 {
    const KIND: ScalarKind = ScalarKind::Char;

    fn read_text<S: InputStream, C: NumericConv>(reader: &mut TextReader<S, C>) -> Result<Self> {
        reader.read_short_token(Self::KIND)
    }

    fn write_text<S: OutputStream, C: NumericConv>(
        &self,
        writer: &mut TextWriter<S, C>,
    ) -> Result<()> {
        writer.write_short_token(Self::KIND, *self)
    }
}

impl TextScalar for i8 {
    const KIND: ScalarKind = ScalarKind::Char;

    fn read_text<S: InputStream, C: NumericConv>(reader: &mut TextReader<S, C>) -> Result<Self> {
        reader
            .read_short_token(Self::KIND)
            .map(|byte| i8::from_ne_bytes([byte]))
    }

    fn write_text<S: OutputStream, C: NumericConv>(
        &self,
        writer: &mut TextWriter<S, C>,
    ) -> Result<()> {
        writer.write_short_token(Self::KIND, self.to_ne_bytes()[0])
    }
}

impl TextScalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn read_text<S: InputStream, C: NumericConv>(reader: &mut TextReader<S, C>) -> Result<Self> {
        match reader.read_short_token(Self::KIND)? {
            b'0' => Ok(false),
            b'1' => Ok(true),
            found => Err(CodecError::InvalidBool { found }),
        }
    }

    fn write_text<S: OutputStream, C: NumericConv>(
        &self,
        writer: &mut TextWriter<S, C>,
    ) -> Result<()> {
        writer.write_short_token(Self::KIND, b'0' + u8::from(*self))
    }
}

macro_rules! impl_numeric_scalar {
    ($trait:ident, $parse:ident, $format:ident; $($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl TextScalar for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn read_text<S: InputStream, C: NumericConv>(
                    reader: &mut TextReader<S, C>,
                ) -> Result<Self> {
                    let mut buf = [0u8; <$ty as $trait>::TEXT_CAPACITY];
                    let text = reader.read_numeric_payload(Self::KIND, &mut buf)?;
                    C::$parse::<$ty>(text).map_err(|source| CodecError::Conversion {
                        kind: Self::KIND,
                        source,
                    })
                }

                fn write_text<S: OutputStream, C: NumericConv>(
                    &self,
                    writer: &mut TextWriter<S, C>,
                ) -> Result<()> {
                    let mut buf = [0u8; HEADER_SIZE + <$ty as $trait>::TEXT_CAPACITY];
                    let len = C::$format(*self, &mut buf[HEADER_SIZE..]).map_err(|source| {
                        CodecError::Conversion {
                            kind: Self::KIND,
                            source,
                        }
                    })?;
                    writer.write_numeric_token(Self::KIND, &mut buf, len)
                }
            }
        )*
    };
}

impl_numeric_scalar!(
    Integer, parse_int, format_int;
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u16 => U16,
    u32 => U32,
    u64 => U64,
);
impl_numeric_scalar!(Float, parse_float, format_float; f32 => F32, f64 => F64);
