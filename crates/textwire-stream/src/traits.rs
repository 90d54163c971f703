use crate::error::Result;

/// A sequential byte source.
///
/// `read` fills as much of `buf` as the source can provide and returns the
/// count. Returning fewer than `buf.len()` bytes means the source is
/// exhausted; implementations must not return early for any other reason.
pub trait InputStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// A sequential byte sink.
///
/// `write` consumes as much of `buf` as the sink can take and returns the
/// count. Returning fewer than `buf.len()` bytes means the sink is full or
/// broken.
pub trait OutputStream {
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Flush buffered bytes to the underlying sink, if any.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: InputStream + ?Sized> InputStream for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }
}

impl<S: OutputStream + ?Sized> OutputStream for &mut S {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).write(buf)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
