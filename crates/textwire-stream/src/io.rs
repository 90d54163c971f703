use std::io::{ErrorKind, Read, Write};

use tracing::debug;

use crate::error::{Result, StreamError};
use crate::traits::{InputStream, OutputStream};

/// Adapts any [`Read`] into an [`InputStream`].
///
/// Partial reads are absorbed internally: `read` keeps pulling from the
/// inner reader until the buffer is full or the reader reports EOF.
#[derive(Debug)]
pub struct IoIStream<R> {
    inner: R,
}

impl<R: Read> IoIStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Borrow the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrow the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consume the adapter and return the inner reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> InputStream for IoIStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0usize;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    debug!(requested = buf.len(), filled, "reader reached EOF");
                    break;
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(StreamError::Io(err)),
            }
        }
        Ok(filled)
    }
}

/// Adapts any [`Write`] into an [`OutputStream`].
///
/// Like [`IoIStream`], only `Interrupted` is retried. A non-blocking sink
/// that reports `WouldBlock` surfaces it as [`StreamError::Io`].
#[derive(Debug)]
pub struct IoOStream<W> {
    inner: W,
}

impl<W: Write> IoOStream<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the adapter and return the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> OutputStream for IoOStream<W> {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let mut offset = 0usize;
        while offset < buf.len() {
            match self.inner.write(&buf[offset..]) {
                Ok(0) => {
                    debug!(requested = buf.len(), offset, "writer accepted no more bytes");
                    break;
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(StreamError::Io(err)),
            }
        }
        Ok(offset)
    }

    fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(StreamError::Io(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn read_fills_buffer_from_cursor() {
        let mut stream = IoIStream::new(Cursor::new(b"abcdef".to_vec()));
        let mut buf = [0u8; 4];

        assert_eq!(stream.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(stream.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
    }

    #[test]
    fn read_assembles_byte_by_byte_input() {
        let mut stream = IoIStream::new(ByteByByteReader {
            bytes: b"slow".to_vec(),
            pos: 0,
        });
        let mut buf = [0u8; 4];

        assert_eq!(stream.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"slow");
    }

    #[test]
    fn interrupted_read_retries() {
        let mut stream = IoIStream::new(InterruptedThenData {
            interrupted: false,
            inner: Cursor::new(b"ok".to_vec()),
        });
        let mut buf = [0u8; 2];

        assert_eq!(stream.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"ok");
    }

    #[test]
    fn read_would_block_propagates_io_error() {
        let mut stream = IoIStream::new(WouldBlockReader);
        let mut buf = [0u8; 1];

        let err = stream.read(&mut buf).unwrap_err();
        assert!(matches!(err, StreamError::Io(e) if e.kind() == ErrorKind::WouldBlock));
    }

    #[test]
    fn write_reports_short_count_when_sink_stops() {
        let mut stream = IoOStream::new(CappedWriter {
            data: Vec::new(),
            cap: 3,
        });

        assert_eq!(stream.write(b"hello").unwrap(), 3);
        assert_eq!(stream.get_ref().data, b"hel");
    }

    #[test]
    fn write_into_vec_and_flush() {
        let mut stream = IoOStream::new(Vec::new());
        assert_eq!(stream.write(b"abc").unwrap(), 3);
        stream.flush().unwrap();
        assert_eq!(stream.into_inner(), b"abc");
    }

    #[test]
    fn write_would_block_propagates_io_error() {
        let mut stream = IoOStream::new(WouldBlockWriter);

        let err = stream.write(b"x").unwrap_err();
        assert!(matches!(err, StreamError::Io(e) if e.kind() == ErrorKind::WouldBlock));

        let err = stream.flush().unwrap_err();
        assert!(matches!(err, StreamError::Io(e) if e.kind() == ErrorKind::WouldBlock));
    }

    #[test]
    fn broken_pipe_is_an_error() {
        let mut stream = IoOStream::new(BrokenWriter);
        let err = stream.write(b"x").unwrap_err();
        assert!(matches!(err, StreamError::Io(e) if e.kind() == ErrorKind::BrokenPipe));
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    struct WouldBlockReader;

    impl Read for WouldBlockReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::WouldBlock))
        }
    }

    struct CappedWriter {
        data: Vec<u8>,
        cap: usize,
    }

    impl Write for CappedWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.cap - self.data.len());
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct WouldBlockWriter;

    impl Write for WouldBlockWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::WouldBlock))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(ErrorKind::WouldBlock))
        }
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
