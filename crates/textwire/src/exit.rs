use std::fmt;
use std::io;

use textwire_codec::CodecError;
use textwire_stream::StreamError;

pub const SUCCESS: i32 = 0;
/// Truncated input, closed or full output.
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
/// Corrupt or misaligned token data.
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof
        | io::ErrorKind::WriteZero
        | io::ErrorKind::StorageFull => TRANSPORT_ERROR,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn stream_error(context: &str, err: StreamError) -> CliError {
    match err {
        StreamError::Io(source) => io_error(context, source),
        StreamError::Closed => CliError::new(TRANSPORT_ERROR, format!("{context}: {err}")),
    }
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    match err {
        CodecError::Stream(source) => stream_error(context, source),
        err if err.is_transport() => CliError::new(TRANSPORT_ERROR, format!("{context}: {err}")),
        err => CliError::new(DATA_INVALID, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_read_maps_to_transport_code() {
        let err = codec_error(
            "decode failed",
            CodecError::ReadMismatch {
                expected: 3,
                actual: 0,
            },
        );
        assert_eq!(err.code, TRANSPORT_ERROR);
        assert!(err.message.starts_with("decode failed: read error"));
    }

    #[test]
    fn framing_violation_maps_to_data_invalid() {
        let err = codec_error("decode failed", CodecError::SpaceExpected { found: b'x' });
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn full_sink_maps_to_transport_code() {
        let err = io_error("failed writing stdout", io::Error::from(io::ErrorKind::StorageFull));
        assert_eq!(err.code, TRANSPORT_ERROR);
        assert!(err.message.starts_with("failed writing stdout: "));
    }

    #[test]
    fn stream_io_error_uses_io_kind() {
        let err = codec_error(
            "encode failed",
            CodecError::Stream(StreamError::Io(io::Error::from(
                io::ErrorKind::PermissionDenied,
            ))),
        );
        assert_eq!(err.code, PERMISSION_DENIED);
    }
}
