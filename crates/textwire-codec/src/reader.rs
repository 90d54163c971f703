use std::marker::PhantomData;

use bytes::BytesMut;
use textwire_stream::InputStream;
use tracing::{debug, trace};

use crate::conv::{NumericConv, StdConv};
use crate::error::{CodecError, Result};
use crate::kind::{Scalar, ScalarKind};
use crate::scalar::TextScalar;
use crate::wire::{decode_length_code, expect_sentinel, HEADER_SIZE, SHORT_TOKEN_SIZE};

/// Decodes text tokens from an [`InputStream`].
///
/// Every call consumes exactly one token. Nothing is buffered between
/// calls, so the reader can be dropped and recreated at any token boundary.
#[derive(Debug)]
pub struct TextReader<S, C = StdConv> {
    inner: S,
    position: u64,
    _conv: PhantomData<fn() -> C>,
}

impl<S: InputStream> TextReader<S> {
    /// Create a reader using the default [`StdConv`] conversion.
    pub fn new(inner: S) -> Self {
        Self::with_conv(inner)
    }
}

impl<S: InputStream, C: NumericConv> TextReader<S, C> {
    /// Create a reader with an explicit conversion strategy.
    pub fn with_conv(inner: S) -> Self {
        Self {
            inner,
            position: 0,
            _conv: PhantomData,
        }
    }

    /// Decode the next token as `T`.
    pub fn read<T: TextScalar>(&mut self) -> Result<T> {
        T::read_text(self)
    }

    /// Decode the next token into an existing value.
    ///
    /// `value` is left untouched on error.
    pub fn read_into<T: TextScalar>(&mut self, value: &mut T) -> Result<()> {
        *value = self.read()?;
        Ok(())
    }

    /// Fill `buf` with unframed bytes whose length is known out of band.
    pub fn read_raw(&mut self, buf: &mut [u8]) -> Result<()> {
        self.read_exact(buf)?;
        trace!(len = buf.len(), position = self.position, "decoded raw bytes");
        Ok(())
    }

    /// Decode the next token as the given kind.
    pub fn read_scalar(&mut self, kind: ScalarKind) -> Result<Scalar> {
        let value = match kind {
            ScalarKind::Raw(len) => {
                let mut buf = BytesMut::zeroed(len);
                self.read_raw(&mut buf)?;
                Scalar::Raw(buf.freeze())
            }
            ScalarKind::Char => Scalar::Char(self.read()?),
            ScalarKind::Bool => Scalar::Bool(self.read()?),
            ScalarKind::I16 => Scalar::I16(self.read()?),
            ScalarKind::I32 => Scalar::I32(self.read()?),
            ScalarKind::I64 => Scalar::I64(self.read()?),
            ScalarKind::U16 => Scalar::U16(self.read()?),
            ScalarKind::U32 => Scalar::U32(self.read()?),
            ScalarKind::U64 => Scalar::U64(self.read()?),
            ScalarKind::F32 => Scalar::F32(self.read()?),
            ScalarKind::F64 => Scalar::F64(self.read()?),
        };
        Ok(value)
    }

    /// Bytes consumed from the stream through this reader.
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

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Read a two-byte token and return its payload byte.
    pub(crate) fn read_short_token(&mut self, kind: ScalarKind) -> Result<u8> {
        let mut buf = [0u8; SHORT_TOKEN_SIZE];
        self.read_exact(&mut buf)?;
        self.check_sentinel(buf[0])?;
        trace!(%kind, position = self.position, "decoded token");
        Ok(buf[1])
    }

    /// Read a length-coded token into `buf` and return the payload text.
    ///
    /// `buf` is the staging buffer for `kind`; a declared length beyond its
    /// capacity is rejected before any payload byte is read.
    pub(crate) fn read_numeric_payload<'b>(
        &mut self,
        kind: ScalarKind,
        buf: &'b mut [u8],
    ) -> Result<&'b [u8]> {
        let mut header = [0u8; HEADER_SIZE];
        self.read_exact(&mut header)?;
        self.check_sentinel(header[0])?;

        let len = decode_length_code([header[1], header[2]])?;
        if len > buf.len() {
            debug!(%kind, len, max = buf.len(), "declared payload exceeds staging buffer");
            return Err(CodecError::PayloadTooLarge {
                kind,
                len,
                max: buf.len(),
            });
        }

        self.read_exact(&mut buf[..len])?;
        trace!(%kind, len, position = self.position, "decoded token");
        Ok(&buf[..len])
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let actual = self.inner.read(buf)?;
        self.position += actual as u64;
        if actual != buf.len() {
            debug!(
                expected = buf.len(),
                actual,
                position = self.position,
                "short read"
            );
            return Err(CodecError::ReadMismatch {
                expected: buf.len(),
                actual,
            });
        }
        Ok(())
    }

    fn check_sentinel(&self, byte: u8) -> Result<()> {
        expect_sentinel(byte).inspect_err(|_| {
            debug!(found = byte, position = self.position, "missing token sentinel");
        })
    }
}
