/// Errors raised by a stream implementation itself.
///
/// A short transfer is not an error at this layer: streams report the count
/// they managed to move and the codec decides what a mismatch means.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// An I/O error occurred on the underlying reader or writer.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream has been closed and accepts no further transfers.
    #[error("stream closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, StreamError>;
