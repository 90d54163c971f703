use std::marker::PhantomData;

use textwire_stream::OutputStream;
use tracing::{debug, trace};

use crate::conv::{NumericConv, StdConv};
use crate::error::{CodecError, Result};
use crate::kind::{Scalar, ScalarKind};
use crate::scalar::TextScalar;
use crate::wire::{encode_length_code, HEADER_SIZE, SENTINEL};

/// Encodes values as text tokens onto an [`OutputStream`].
///
/// Each token goes out in a single `write` call. The writer never flushes on
/// its own; call [`TextWriter::flush`] when the stream needs it.
#[derive(Debug)]
pub struct TextWriter<S, C = StdConv> {
    inner: S,
    position: u64,
    _conv: PhantomData<fn() -> C>,
}

impl<S: OutputStream> TextWriter<S> {
    /// Create a writer using the default [`StdConv`] conversion.
    pub fn new(inner: S) -> Self {
        Self::with_conv(inner)
    }
}

impl<S: OutputStream, C: NumericConv> TextWriter<S, C> {
    /// Create a writer with an explicit conversion strategy.
    pub fn with_conv(inner: S) -> Self {
        Self {
            inner,
            position: 0,
            _conv: PhantomData,
        }
    }

    /// Encode `value` as one token.
    pub fn write<T: TextScalar>(&mut self, value: &T) -> Result<()> {
        value.write_text(self)
    }

    /// Write unframed bytes. The reader must know `buf.len()` out of band.
    pub fn write_raw(&mut self, buf: &[u8]) -> Result<()> {
        self.write_exact(buf)?;
        trace!(len = buf.len(), position = self.position, "encoded raw bytes");
        Ok(())
    }

    /// Encode a runtime-tagged value.
    pub fn write_scalar(&mut self, value: &Scalar) -> Result<()> {
        match value {
            Scalar::Raw(bytes) => self.write_raw(bytes),
            Scalar::Char(v) => self.write(v),
            Scalar::Bool(v) => self.write(v),
            Scalar::I16(v) => self.write(v),
            Scalar::I32(v) => self.write(v),
            Scalar::I64(v) => self.write(v),
            Scalar::U16(v) => self.write(v),
            Scalar::U32(v) => self.write(v),
            Scalar::U64(v) => self.write(v),
            Scalar::F32(v) => self.write(v),
            Scalar::F64(v) => self.write(v),
        }
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(Into::into)
    }

    /// Bytes written to the stream through this writer.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Write a two-byte token: sentinel, then `payload`.
    pub(crate) fn write_short_token(&mut self, kind: ScalarKind, payload: u8) -> Result<()> {
        self.write_exact(&[SENTINEL, payload])?;
        trace!(%kind, position = self.position, "encoded token");
        Ok(())
    }

    /// Complete and write a length-coded token.
    ///
    /// `buf` holds `len` bytes of text starting at [`HEADER_SIZE`]; the
    /// header is filled in front of it and the whole token goes out in one
    /// write. Nothing is written when `len` does not fit the length code.
    pub(crate) fn write_numeric_token(
        &mut self,
        kind: ScalarKind,
        buf: &mut [u8],
        len: usize,
    ) -> Result<()> {
        let code = encode_length_code(len).inspect_err(|_| {
            debug!(%kind, len, "encoded text overflows length code");
        })?;
        buf[0] = SENTINEL;
        buf[1..HEADER_SIZE].copy_from_slice(&code);

        self.write_exact(&buf[..HEADER_SIZE + len])?;
        trace!(%kind, len, position = self.position, "encoded token");
        Ok(())
    }

    fn write_exact(&mut self, buf: &[u8]) -> Result<()> {
        let actual = self.inner.write(buf)?;
        self.position += actual as u64;
        if actual != buf.len() {
            debug!(
                expected = buf.len(),
                actual,
                position = self.position,
                "short write"
            );
            return Err(CodecError::WriteMismatch {
                expected: buf.len(),
                actual,
            });
        }
        Ok(())
    }
}
