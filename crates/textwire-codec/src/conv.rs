//! Numeric text conversion.
//!
//! The codec frames text, it does not decide what the text looks like. That
//! choice belongs to a [`NumericConv`] strategy, picked as a type parameter
//! of the reader and writer. Two strategies ship with the crate:
//!
//! - [`StdConv`] writes floats in shortest round-trip exponential notation
//!   (`1.5e2`), which keeps every finite `f64` far below the 99-byte cap.
//! - [`PlainConv`] writes floats positionally (`150`). Values with large or
//!   tiny exponents produce long text that the writer will refuse.
//!
//! Both write integers as plain decimal and parse with the standard
//! library's `FromStr`.

use std::fmt;
use std::str::FromStr;

/// Conversion failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvError {
    /// The text is not a valid literal for the target type.
    #[error("invalid numeric text {text:?}")]
    Invalid { text: String },

    /// The formatted text does not fit the staging buffer.
    #[error("formatted text exceeds staging capacity of {capacity} bytes")]
    BufferTooSmall { capacity: usize },
}

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width integers carried as numeric tokens.
pub trait Integer: sealed::Sealed + Copy + fmt::Display + fmt::Debug + FromStr {
    /// Staging capacity for the decimal text: four bytes per byte of width.
    const TEXT_CAPACITY: usize;
}

/// Floating-point types carried as numeric tokens.
pub trait Float:
    sealed::Sealed + Copy + fmt::Display + fmt::LowerExp + fmt::Debug + FromStr
{
    /// Staging capacity for the text: the largest decimal exponent plus
    /// room for sign, digits, point and exponent marker.
    const TEXT_CAPACITY: usize;
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Integer for $ty {
                const TEXT_CAPACITY: usize = std::mem::size_of::<$ty>() * 4;
            }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Float for $ty {
                const TEXT_CAPACITY: usize = $ty::MAX_10_EXP as usize + 20;
            }
        )*
    };
}

impl_integer!(i16, i32, i64, u16, u32, u64);
impl_float!(f32, f64);

/// A text⇄value conversion strategy.
///
/// `format_*` writes the canonical text of `value` into `out` and returns
/// its length; it must fail rather than truncate when `out` is too small.
/// `parse_*` receives exactly the payload bytes of a token, with no
/// surrounding whitespace.
pub trait NumericConv {
    fn parse_int<T: Integer>(text: &[u8]) -> Result<T, ConvError>;
    fn format_int<T: Integer>(value: T, out: &mut [u8]) -> Result<usize, ConvError>;
    fn parse_float<T: Float>(text: &[u8]) -> Result<T, ConvError>;
    fn format_float<T: Float>(value: T, out: &mut [u8]) -> Result<usize, ConvError>;
}

/// Decimal integers, exponential floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConv;

impl NumericConv for StdConv {
    fn parse_int<T: Integer>(text: &[u8]) -> Result<T, ConvError> {
        parse_text(text)
    }

    fn format_int<T: Integer>(value: T, out: &mut [u8]) -> Result<usize, ConvError> {
        format_into(out, format_args!("{value}"))
    }

    fn parse_float<T: Float>(text: &[u8]) -> Result<T, ConvError> {
        parse_text(text)
    }

    fn format_float<T: Float>(value: T, out: &mut [u8]) -> Result<usize, ConvError> {
        format_into(out, format_args!("{value:e}"))
    }
}

/// Decimal integers, positional floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainConv;

impl NumericConv for PlainConv {
    fn parse_int<T: Integer>(text: &[u8]) -> Result<T, ConvError> {
        parse_text(text)
    }

    fn format_int<T: Integer>(value: T, out: &mut [u8]) -> Result<usize, ConvError> {
        format_into(out, format_args!("{value}"))
    }

    fn parse_float<T: Float>(text: &[u8]) -> Result<T, ConvError> {
        parse_text(text)
    }

    fn format_float<T: Float>(value: T, out: &mut [u8]) -> Result<usize, ConvError> {
        format_into(out, format_args!("{value}"))
    }
}

fn parse_text<T: FromStr>(text: &[u8]) -> Result<T, ConvError> {
    let invalid = || ConvError::Invalid {
        text: String::from_utf8_lossy(text).into_owned(),
    };
    std::str::from_utf8(text)
        .map_err(|_| invalid())?
        .parse()
        .map_err(|_| invalid())
}

/// Formats into a fixed slice, failing on overflow.
struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

fn format_into(out: &mut [u8], args: fmt::Arguments<'_>) -> Result<usize, ConvError> {
    let capacity = out.len();
    let mut writer = SliceWriter { buf: out, len: 0 };
    fmt::write(&mut writer, args).map_err(|_| ConvError::BufferTooSmall { capacity })?;
    Ok(writer.len)
}
