//! Token layout constants and the two-digit length code.
//!
//! ```text
//! char / bool      ┌─────┬──────┐
//!                  │ ' ' │ byte │
//!                  └─────┴──────┘
//! numeric          ┌─────┬────────────────┬──────────────────┐
//!                  │ ' ' │ length (2 dec) │ text (length B)  │
//!                  └─────┴────────────────┴──────────────────┘
//! ```

use crate::error::{CodecError, Result};

/// First byte of every framed token.
pub const SENTINEL: u8 = b' ';

/// Size of a character or boolean token.
pub const SHORT_TOKEN_SIZE: usize = 2;

/// Sentinel plus two length digits.
pub const HEADER_SIZE: usize = 3;

/// Largest payload a two-digit length code can declare.
pub const MAX_PAYLOAD_LEN: usize = 99;

/// Encode `len` as two ASCII decimal digits.
pub fn encode_length_code(len: usize) -> Result<[u8; 2]> {
    if len > MAX_PAYLOAD_LEN {
        return Err(CodecError::LengthOverflow { len });
    }
    Ok([b'0' + (len / 10) as u8, b'0' + (len % 10) as u8])
}

/// Decode two ASCII decimal digits into a payload length.
pub fn decode_length_code(code: [u8; 2]) -> Result<usize> {
    if !code.iter().all(u8::is_ascii_digit) {
        return Err(CodecError::InvalidLengthCode { code });
    }
    Ok(usize::from(code[0] - b'0') * 10 + usize::from(code[1] - b'0'))
}

/// Check the sentinel byte of a token.
pub fn expect_sentinel(byte: u8) -> Result<()> {
    if byte != SENTINEL {
        return Err(CodecError::SpaceExpected { found: byte });
    }
    Ok(())
}
