use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use crate::wire::SHORT_TOKEN_SIZE;

/// The closed set of scalar kinds the codec can carry.
///
/// There is no type tag on the wire, so both sides must agree on the kind
/// of every field out of band. `Raw` carries its byte length for the same
/// reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Raw(usize),
    Char,
    Bool,
    I16,
    I32,
    I64,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ScalarKind {
    /// Exact token size for kinds whose size does not depend on the value.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            ScalarKind::Raw(len) => Some(*len),
            ScalarKind::Char | ScalarKind::Bool => Some(SHORT_TOKEN_SIZE),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Raw(len) => write!(f, "raw:{len}"),
            ScalarKind::Char => f.write_str("char"),
            ScalarKind::Bool => f.write_str("bool"),
            ScalarKind::I16 => f.write_str("i16"),
            ScalarKind::I32 => f.write_str("i32"),
            ScalarKind::I64 => f.write_str("i64"),
            ScalarKind::U16 => f.write_str("u16"),
            ScalarKind::U32 => f.write_str("u32"),
            ScalarKind::U64 => f.write_str("u64"),
            ScalarKind::F32 => f.write_str("f32"),
            ScalarKind::F64 => f.write_str("f64"),
        }
    }
}

/// Error returned when a kind name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scalar kind {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for ScalarKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "char" => ScalarKind::Char,
            "bool" => ScalarKind::Bool,
            "i16" => ScalarKind::I16,
            "i32" => ScalarKind::I32,
            "i64" => ScalarKind::I64,
            "u16" => ScalarKind::U16,
            "u32" => ScalarKind::U32,
            "u64" => ScalarKind::U64,
            "f32" => ScalarKind::F32,
            "f64" => ScalarKind::F64,
            other => {
                let len = other
                    .strip_prefix("raw:")
                    .and_then(|len| len.parse().ok())
                    .ok_or_else(|| ParseKindError(other.to_string()))?;
                ScalarKind::Raw(len)
            }
        };
        Ok(kind)
    }
}

/// A single scalar value, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Raw(Bytes),
    Char(u8),
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Raw(bytes) => ScalarKind::Raw(bytes.len()),
            Scalar::Char(_) => ScalarKind::Char,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::I16(_) => ScalarKind::I16,
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::I64(_) => ScalarKind::I64,
            Scalar::U16(_) => ScalarKind::U16,
            Scalar::U32(_) => ScalarKind::U32,
            Scalar::U64(_) => ScalarKind::U64,
            Scalar::F32(_) => ScalarKind::F32,
            Scalar::F64(_) => ScalarKind::F64,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Raw(bytes) => write!(f, "{}", bytes.escape_ascii()),
            Scalar::Char(c) => write!(f, "{}", c.escape_ascii()),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::I16(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::I64(v) => write!(f, "{v}"),
            Scalar::U16(v) => write!(f, "{v}"),
            Scalar::U32(v) => write!(f, "{v}"),
            Scalar::U64(v) => write!(f, "{v}"),
            Scalar::F32(v) => write!(f, "{v}"),
            Scalar::F64(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for name in [
            "char", "bool", "i16", "i32", "i64", "u16", "u32", "u64", "f32", "f64", "raw:12",
        ] {
            let kind: ScalarKind = name.parse().unwrap();
            assert_eq!(kind.to_string(), name);
        }
    }

    #[test]
    fn unknown_kind_rejected() {
        assert!("i8".parse::<ScalarKind>().is_err());
        assert!("raw:".parse::<ScalarKind>().is_err());
        assert!("raw:-1".parse::<ScalarKind>().is_err());
    }

    #[test]
    fn fixed_sizes() {
        assert_eq!(ScalarKind::Char.fixed_size(), Some(2));
        assert_eq!(ScalarKind::Bool.fixed_size(), Some(2));
        assert_eq!(ScalarKind::Raw(5).fixed_size(), Some(5));
        assert_eq!(ScalarKind::I64.fixed_size(), None);
    }

    #[test]
    fn scalar_kind_and_display() {
        let raw = Scalar::Raw(Bytes::from_static(b"a\n"));
        assert_eq!(raw.kind(), ScalarKind::Raw(2));
        assert_eq!(raw.to_string(), "a\\n");
        assert_eq!(Scalar::Char(b'z').to_string(), "z");
        assert_eq!(Scalar::I32(-7).to_string(), "-7");
        assert_eq!(Scalar::Bool(true).kind(), ScalarKind::Bool);
    }
}
