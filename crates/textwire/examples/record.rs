//! A hand-written field-by-field serializer on top of textwire.
//!
//! Run with:
//!   cargo run -p textwire --example record

use textwire::stream::{MemIStream, MemOStream};
use textwire::{CodecError, TextReader, TextWriter};

#[derive(Debug, PartialEq)]
struct Reading {
    sensor: u8,
    sequence: u64,
    online: bool,
    celsius: f32,
    label: Vec<u8>,
}

impl Reading {
    fn encode(&self, w: &mut TextWriter<&mut MemOStream>) -> Result<(), CodecError> {
        w.write(&self.sensor)?;
        w.write(&self.sequence)?;
        w.write(&self.online)?;
        w.write(&self.celsius)?;
        // Length first so the reader knows how many raw bytes follow.
        w.write(&(self.label.len() as u16))?;
        w.write_raw(&self.label)
    }

    fn decode(r: &mut TextReader<&mut MemIStream>) -> Result<Self, CodecError> {
        let sensor = r.read()?;
        let sequence = r.read()?;
        let online = r.read()?;
        let celsius = r.read()?;
        let mut label = vec![0u8; usize::from(r.read::<u16>()?)];
        r.read_raw(&mut label)?;
        Ok(Self {
            sensor,
            sequence,
            online,
            celsius,
            label,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let reading = Reading {
        sensor: b'A',
        sequence: 90_210,
        online: true,
        celsius: -3.75,
        label: b"north-wall".to_vec(),
    };

    let mut sink = MemOStream::new();
    reading.encode(&mut TextWriter::new(&mut sink))?;
    println!("wire: {:?}", String::from_utf8_lossy(sink.as_slice()));

    let mut source = MemIStream::new(sink.into_bytes());
    let decoded = Reading::decode(&mut TextReader::new(&mut source))?;
    assert_eq!(decoded, reading);
    println!("decoded: {decoded:?}");

    Ok(())
}
