use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::Result;
use crate::traits::{InputStream, OutputStream};

/// Reads from an in-memory byte buffer.
#[derive(Debug, Clone, Default)]
pub struct MemIStream {
    data: Bytes,
    position: usize,
}

impl MemIStream {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.remaining()
    }

    pub fn is_empty(&self) -> bool {
        !self.data.has_remaining()
    }

    /// The unread part of the buffer.
    pub fn as_slice(&self) -> &[u8] {
        self.data.chunk()
    }
}

impl InputStream for MemIStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = buf.len().min(self.data.remaining());
        self.data.copy_to_slice(&mut buf[..n]);
        self.position += n;
        Ok(n)
    }
}

/// Writes into a growable in-memory buffer, optionally capped.
#[derive(Debug, Clone, Default)]
pub struct MemOStream {
    buf: BytesMut,
    limit: Option<usize>,
}

impl MemOStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            limit: None,
        }
    }

    /// A sink that accepts at most `limit` bytes in total. Writes past the
    /// limit are cut short and report the truncated count.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(limit),
            limit: Some(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Take the written bytes, leaving the stream empty.
    pub fn take(&mut self) -> Bytes {
        self.buf.split().freeze()
    }

    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl OutputStream for MemOStream {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let n = match self.limit {
            Some(limit) => buf.len().min(limit.saturating_sub(self.buf.len())),
            None => buf.len(),
        };
        self.buf.put_slice(&buf[..n]);
        Ok(n)
    }
}
