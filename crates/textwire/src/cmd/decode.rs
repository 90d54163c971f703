use std::fs::File;
use std::io::Read;

use bytes::BytesMut;
use textwire_codec::{NumericConv, PlainConv, ScalarKind, StdConv, TextReader};
use textwire_stream::{InputStream, IoIStream};

use crate::cmd::{DecodeArgs, FloatStyle};
use crate::exit::{
    codec_error, io_error, stream_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE,
};
use crate::output::{print_records, OutputFormat, TokenRecord};

pub fn run(args: DecodeArgs, format: Option<OutputFormat>, floats: FloatStyle) -> CliResult<i32> {
    let input: Box<dyn Read> = match &args.file {
        Some(path) => Box::new(
            File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?,
        ),
        None => Box::new(std::io::stdin().lock()),
    };
    let stream = IoIStream::new(input);

    let records = match floats {
        FloatStyle::Exp => decode_all::<_, StdConv>(stream, &args.kinds, args.repeat)?,
        FloatStyle::Plain => decode_all::<_, PlainConv>(stream, &args.kinds, args.repeat)?,
    };

    let format = format.unwrap_or_else(OutputFormat::default_for_stdout);
    print_records(&records, format);
    Ok(SUCCESS)
}

/// Copies every byte read through it so each token can be shown as it
/// appeared on the wire. Holds at most one byte of lookahead.
struct Recording<S> {
    inner: S,
    seen: BytesMut,
    peeked: Option<u8>,
}

impl<S: InputStream> Recording<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            seen: BytesMut::new(),
            peeked: None,
        }
    }

    fn at_end(&mut self) -> textwire_stream::Result<bool> {
        if self.peeked.is_some() {
            return Ok(false);
        }
        let mut byte = [0u8; 1];
        if self.inner.read(&mut byte)? == 0 {
            return Ok(true);
        }
        self.peeked = Some(byte[0]);
        Ok(false)
    }
}

impl<S: InputStream> InputStream for Recording<S> {
    fn read(&mut self, buf: &mut [u8]) -> textwire_stream::Result<usize> {
        let mut n = 0;
        if let (Some(byte), Some(first)) = (self.peeked, buf.first_mut()) {
            *first = byte;
            self.peeked = None;
            n = 1;
        }
        if n < buf.len() {
            n += self.inner.read(&mut buf[n..])?;
        }
        self.seen.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

fn decode_all<S: InputStream, C: NumericConv>(
    stream: S,
    kinds: &[ScalarKind],
    repeat: bool,
) -> CliResult<Vec<TokenRecord>> {
    if kinds.is_empty() {
        return Err(CliError::new(USAGE, "at least one kind is required"));
    }

    let mut reader: TextReader<_, C> = TextReader::with_conv(Recording::new(stream));
    let mut records = Vec::new();

    loop {
        if repeat && at_end(&mut reader)? {
            tracing::debug!(tokens = records.len(), "input ended on a cycle boundary");
            return Ok(records);
        }

        let cycle_start = reader.position();
        for kind in kinds {
            let offset = reader.position();
            let value = reader.read_scalar(*kind).map_err(|err| {
                codec_error(&format!("decode failed at offset {offset} ({kind})"), err)
            })?;
            let wire = reader.get_mut().seen.split().freeze();
            records.push(TokenRecord::new(&value, offset, &wire));
        }

        if !repeat {
            break;
        }
        if reader.position() == cycle_start {
            return Err(CliError::new(
                DATA_INVALID,
                format!("decode failed at offset {cycle_start}: kinds consume no input"),
            ));
        }
    }

    if !at_end(&mut reader)? {
        let offset = reader.position();
        return Err(CliError::new(
            DATA_INVALID,
            format!("decode failed at offset {offset}: unread bytes after the last kind"),
        ));
    }

    tracing::debug!(tokens = records.len(), "decoded tokens");
    Ok(records)
}

fn at_end<S: InputStream, C: NumericConv>(
    reader: &mut TextReader<Recording<S>, C>,
) -> CliResult<bool> {
    let offset = reader.position();
    reader
        .get_mut()
        .at_end()
        .map_err(|err| stream_error(&format!("decode failed at offset {offset}"), err))
}
