use textwire_stream::StreamError;

use crate::conv::ConvError;
use crate::kind::ScalarKind;

/// Broad classification of a [`CodecError`].
///
/// A serializer uses this to tell a transport problem (truncated input,
/// closed or full sink) from a format problem (corrupt or misaligned data).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transport,
    Format,
}

/// Errors that can occur while encoding or decoding a token.
///
/// Every error is terminal for the token in flight. The stream position is
/// left wherever the failing transfer left it.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The stream returned fewer bytes than the token requires.
    #[error("read error: expected {expected} bytes, got {actual}")]
    ReadMismatch { expected: usize, actual: usize },

    /// The stream accepted fewer bytes than the token occupies.
    #[error("write error: expected {expected} bytes, wrote {actual}")]
    WriteMismatch { expected: usize, actual: usize },

    /// The stream itself failed.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// The leading sentinel byte is missing.
    #[error("space expected, found 0x{found:02x}")]
    SpaceExpected { found: u8 },

    /// The two length-code bytes are not ASCII digits.
    #[error("invalid length code {:?}", String::from_utf8_lossy(.code))]
    InvalidLengthCode { code: [u8; 2] },

    /// The declared payload does not fit the staging buffer for its kind.
    #[error("payload too large for {kind} ({len} bytes, max {max})")]
    PayloadTooLarge {
        kind: ScalarKind,
        len: usize,
        max: usize,
    },

    /// A boolean payload byte other than `'0'` or `'1'`.
    #[error("invalid boolean payload 0x{found:02x}")]
    InvalidBool { found: u8 },

    /// Encoded text is longer than a two-digit length code can declare.
    #[error("encoded text of {len} bytes exceeds the two-digit length code")]
    LengthOverflow { len: usize },

    /// Text to value (or value to text) conversion failed.
    #[error("{kind} conversion failed: {source}")]
    Conversion {
        kind: ScalarKind,
        #[source]
        source: ConvError,
    },
}

impl CodecError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CodecError::ReadMismatch { .. }
            | CodecError::WriteMismatch { .. }
            | CodecError::Stream(_) => ErrorClass::Transport,
            CodecError::SpaceExpected { .. }
            | CodecError::InvalidLengthCode { .. }
            | CodecError::PayloadTooLarge { .. }
            | CodecError::InvalidBool { .. }
            | CodecError::LengthOverflow { .. }
            | CodecError::Conversion { .. } => ErrorClass::Format,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.class() == ErrorClass::Transport
    }

    pub fn is_format(&self) -> bool {
        self.class() == ErrorClass::Format
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
