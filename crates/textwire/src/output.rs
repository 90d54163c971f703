use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use textwire_codec::Scalar;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One token as it sits on the wire.
#[derive(Debug, Serialize)]
pub struct TokenRecord {
    pub kind: String,
    pub offset: u64,
    pub size: u64,
    pub value: String,
    pub token: String,
}

impl TokenRecord {
    pub fn new(value: &Scalar, offset: u64, wire: &[u8]) -> Self {
        Self {
            kind: value.kind().to_string(),
            offset,
            size: wire.len() as u64,
            value: value.to_string(),
            token: wire.escape_ascii().to_string(),
        }
    }
}

/// Print token records. `Raw` prints bare values, one per line.
pub fn print_records(records: &[TokenRecord], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for record in records {
                println!(
                    "{}",
                    serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["KIND", "OFFSET", "SIZE", "VALUE", "TOKEN"]);
            for record in records {
                table.add_row(vec![
                    record.kind.clone(),
                    record.offset.to_string(),
                    record.size.to_string(),
                    record.value.clone(),
                    format!("{:?}", record.token),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for record in records {
                println!(
                    "@{:<6} {:<7} size={:<3} value={} token={:?}",
                    record.offset, record.kind, record.size, record.value, record.token
                );
            }
        }
        OutputFormat::Raw => {
            for record in records {
                println!("{}", record.value);
            }
        }
    }
}

pub fn print_raw(data: &[u8]) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(data)?;
    out.flush()
}
