//! Command-line front end for the `json-kit` binary.
//!
//! The binary only parses arguments and does I/O; every command is a plain
//! function over input bytes so it can be driven from tests.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueHint};
use thiserror::Error;
use tracing::debug;

use crate::codec::{DecodeOptions, EncodeOptions, JsonDecoder, JsonEncoder};
use crate::error::JsonError;

#[derive(Debug, Parser)]
#[command(
    name = "json-kit",
    version,
    about = "Parse, reformat and query JSON documents",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a document and write it back out.
    Fmt {
        #[arg(help = "Input file (default: stdin)", value_hint = ValueHint::FilePath)]
        path: Option<PathBuf>,
        #[arg(long, help = "Indent nested structures by two spaces")]
        pretty: bool,
        #[arg(long, help = "Emit object keys in sorted order")]
        sort_keys: bool,
        #[arg(long, help = "Reject documents whose root is not an object or array")]
        no_fragments: bool,
    },
    /// Print the value a JSON pointer refers to.
    Get {
        #[arg(help = "JSON pointer, e.g. /fonts/0/name")]
        pointer: String,
        #[arg(help = "Input file (default: stdin)", value_hint = ValueHint::FilePath)]
        path: Option<PathBuf>,
        #[arg(long, help = "Indent nested structures by two spaces")]
        pretty: bool,
    },
    /// Report whether a document parses, and its root kind.
    Check {
        #[arg(help = "Input file (default: stdin)", value_hint = ValueHint::FilePath)]
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error("no value at pointer '{0}'")]
    NotFound(String),
}

/// Reads the whole of `path`, or of stdin when `path` is `None`.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "reading input file");
            Ok(std::fs::read(path).map_err(JsonError::from)?)
        }
        None => {
            debug!("reading stdin");
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(JsonError::from)?;
            Ok(bytes)
        }
    }
}

pub fn format_document(
    input: &[u8],
    decode: DecodeOptions,
    encode: EncodeOptions,
) -> Result<String, CliError> {
    let value = JsonDecoder::with_options(decode).decode(input)?;
    Ok(JsonEncoder::with_options(encode).encode_to_string(&value)?)
}

pub fn lookup(input: &[u8], pointer: &str, pretty: bool) -> Result<String, CliError> {
    let value = JsonDecoder::new().decode(input)?;
    let found = value
        .pointer(pointer)
        .ok_or_else(|| CliError::NotFound(pointer.to_string()))?;
    Ok(found.to_json_string(pretty)?)
}

pub fn check(input: &[u8]) -> Result<String, CliError> {
    let value = JsonDecoder::new().decode(input)?;
    Ok(format!("ok: {}", value.kind()))
}

/// Runs one parsed command line and returns what should go to stdout.
pub fn run(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Command::Fmt {
            path,
            pretty,
            sort_keys,
            no_fragments,
        } => {
            let input = read_input(path.as_deref())?;
            format_document(
                &input,
                DecodeOptions {
                    allow_fragments: !no_fragments,
                },
                EncodeOptions { pretty, sort_keys },
            )
        }
        Command::Get {
            pointer,
            path,
            pretty,
        } => {
            let input = read_input(path.as_deref())?;
            lookup(&input, &pointer, pretty)
        }
        Command::Check { path } => {
            let input = read_input(path.as_deref())?;
            check(&input)
        }
    }
}
