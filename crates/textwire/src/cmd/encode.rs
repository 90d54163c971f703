use bytes::Bytes;
use textwire_codec::{NumericConv, PlainConv, Scalar, ScalarKind, StdConv, TextWriter};
use textwire_stream::MemOStream;

use crate::cmd::{EncodeArgs, FloatStyle};
use crate::exit::{codec_error, io_error, CliResult, SUCCESS};
use crate::output::{print_raw, print_records, OutputFormat, TokenRecord};

pub fn run(args: EncodeArgs, format: Option<OutputFormat>, floats: FloatStyle) -> CliResult<i32> {
    let (wire, records) = match floats {
        FloatStyle::Exp => encode_all::<StdConv>(&args.values)?,
        FloatStyle::Plain => encode_all::<PlainConv>(&args.values)?,
    };
    tracing::debug!(tokens = records.len(), bytes = wire.len(), "encoded values");

    if let Some(path) = &args.out {
        std::fs::write(path, &wire)
            .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?;
        if let Some(format) = format {
            print_records(&records, format);
        }
        return Ok(SUCCESS);
    }

    match format.unwrap_or(OutputFormat::Raw) {
        OutputFormat::Raw => print_raw(&wire).map_err(|e| io_error("failed writing stdout", e))?,
        other => print_records(&records, other),
    }
    Ok(SUCCESS)
}

fn encode_all<C: NumericConv>(values: &[Scalar]) -> CliResult<(Bytes, Vec<TokenRecord>)> {
    let mut writer: TextWriter<_, C> = TextWriter::with_conv(MemOStream::new());
    let mut offsets = Vec::with_capacity(values.len());

    for value in values {
        offsets.push(writer.position());
        if let Err(err) = writer.write_scalar(value) {
            let context = format!("failed encoding {} {value}", value.kind());
            return Err(codec_error(&context, err));
        }
    }

    let wire = writer.into_inner().into_bytes();
    let records = values
        .iter()
        .zip(&offsets)
        .enumerate()
        .map(|(i, (value, &offset))| {
            let end = offsets.get(i + 1).map_or(wire.len(), |&next| next as usize);
            TokenRecord::new(value, offset, &wire[offset as usize..end])
        })
        .collect();
    Ok((wire, records))
}

/// Parse a `KIND:VALUE` command-line argument.
pub fn parse_value(arg: &str) -> Result<Scalar, String> {
    let (kind, text) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected KIND:VALUE, got {arg:?}"))?;

    if kind == "raw" {
        return Ok(Scalar::Raw(Bytes::copy_from_slice(text.as_bytes())));
    }

    let invalid = |err: &dyn std::fmt::Display| format!("invalid {kind} value {text:?}: {err}");
    let kind: ScalarKind = kind.parse().map_err(|err| format!("{err}"))?;
    let value = match kind {
        ScalarKind::Raw(_) => return Err(format!("expected raw:TEXT, got {arg:?}")),
        ScalarKind::Char => match text.as_bytes() {
            [byte] => Scalar::Char(*byte),
            _ => return Err(format!("char value must be one byte, got {text:?}")),
        },
        ScalarKind::Bool => match text {
            "true" | "1" => Scalar::Bool(true),
            "false" | "0" => Scalar::Bool(false),
            _ => return Err(format!("invalid bool value {text:?}")),
        },
        ScalarKind::I16 => Scalar::I16(text.parse().map_err(|e| invalid(&e))?),
        ScalarKind::I32 => Scalar::I32(text.parse().map_err(|e| invalid(&e))?),
        ScalarKind::I64 => Scalar::I64(text.parse().map_err(|e| invalid(&e))?),
        ScalarKind::U16 => Scalar::U16(text.parse().map_err(|e| invalid(&e))?),
        ScalarKind::U32 => Scalar::U32(text.parse().map_err(|e| invalid(&e))?),
        ScalarKind::U64 => Scalar::U64(text.parse().map_err(|e| invalid(&e))?),
        ScalarKind::F32 => Scalar::F32(text.parse().map_err(|e| invalid(&e))?),
        ScalarKind::F64 => Scalar::F64(text.parse().map_err(|e| invalid(&e))?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_values() {
        assert_eq!(parse_value("i32:-7").unwrap(), Scalar::I32(-7));
        assert_eq!(parse_value("u64:18446744073709551615").unwrap(), Scalar::U64(u64::MAX));
        assert_eq!(parse_value("bool:true").unwrap(), Scalar::Bool(true));
        assert_eq!(parse_value("bool:0").unwrap(), Scalar::Bool(false));
        assert_eq!(parse_value("char:a").unwrap(), Scalar::Char(b'a'));
        assert_eq!(parse_value("f64:1.5").unwrap(), Scalar::F64(1.5));
        assert_eq!(
            parse_value("raw:a:b").unwrap(),
            Scalar::Raw(Bytes::from_static(b"a:b"))
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(parse_value("i32").is_err());
        assert!(parse_value("i8:1").is_err());
        assert!(parse_value("u16:70000").is_err());
        assert!(parse_value("char:ab").is_err());
        assert!(parse_value("bool:yes").is_err());
        assert!(parse_value("raw:3:x").is_ok());
    }

    #[test]
    fn records_slice_the_wire_per_token() {
        let values = [Scalar::I32(-7), Scalar::Bool(true), Scalar::U16(0)];
        let (wire, records) = encode_all::<StdConv>(&values).unwrap();

        assert_eq!(wire.as_ref(), b" 02-7 1 010");
        assert_eq!(records.len(), 3);
        assert_eq!((records[1].offset, records[1].size), (5, 2));
        assert_eq!(records[2].token, " 010");
    }

    #[test]
    fn plain_style_overflow_is_data_error() {
        let err = encode_all::<PlainConv>(&[Scalar::F64(1e120)]).unwrap_err();
        assert_eq!(err.code, crate::exit::DATA_INVALID);
    }
}
