use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use textwire_codec::{Scalar, ScalarKind};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode values as text tokens.
    Encode(EncodeArgs),
    /// Decode a sequence of tokens of known kinds.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

/// How floating-point values are written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FloatStyle {
    /// Shortest round-trip exponential notation (1.5e2).
    #[default]
    Exp,
    /// Shortest round-trip positional notation (150). Large exponents are rejected.
    Plain,
}

pub fn run(command: Command, format: Option<OutputFormat>, floats: FloatStyle) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format, floats),
        Command::Decode(args) => decode::run(args, format, floats),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Values as KIND:VALUE (e.g. i32:-7, bool:true, char:a, f64:1.5, raw:text).
    #[arg(required = true, value_parser = encode::parse_value)]
    pub values: Vec<Scalar>,
    /// Write the encoded bytes to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Kinds to decode, in wire order (comma-separated; raw:N for N raw bytes).
    #[arg(long, short = 'k', required = true, value_delimiter = ',')]
    pub kinds: Vec<ScalarKind>,
    /// Read tokens from a file instead of stdin.
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: Option<PathBuf>,
    /// Repeat the kind list until the input ends on a token boundary.
    #[arg(long)]
    pub repeat: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
