mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::{Command, FloatStyle};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "textwire", version, about = "Text-mode scalar codec CLI")]
struct Cli {
    /// Output format. Encode defaults to raw token bytes; decode defaults to
    /// a table on a terminal and JSON lines otherwise.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Float notation used for encoding and decoding.
    #[arg(
        long,
        value_name = "STYLE",
        default_value = "exp",
        env = "TEXTWIRE_FLOAT_STYLE",
        global = true
    )]
    float_style: FloatStyle,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        env = "TEXTWIRE_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let result = cmd::run(cli.command, cli.format, cli.float_style);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
