use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a dictionary and optionally frame it for the wire.
    Encode(EncodeArgs),
    /// Unframe a SLIP stream and print the dictionaries it carries.
    Decode(DecodeArgs),
    /// Hex dump a raw dictionary buffer.
    Inspect(InspectArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::Inspect(args) => inspect::run(args),
        Command::Version(args) => version::run(args),
    }
}

/// Trailer algorithm selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CrcAlgo {
    Crc8,
    Crc16,
    Crc32,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Entries as KEY=TYPE:VALUE; list values are comma-separated
    /// (e.g. `integers=i32:10,20,30` or `message=str:hello`).
    #[arg(required = true, value_name = "KEY=TYPE:VALUE")]
    pub entries: Vec<String>,
    /// Write to this file instead of stdout.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
    /// Wrap the dictionary in a SLIP packet.
    #[arg(long)]
    pub frame: bool,
    /// Append a CRC trailer (implies --frame).
    #[arg(long, value_enum)]
    pub crc: Option<CrcAlgo>,
    /// Dictionary buffer capacity in bytes.
    #[arg(long, default_value_t = 4096)]
    pub capacity: usize,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file, or `-` for stdin.
    pub input: PathBuf,
    /// Input is a raw dictionary buffer, not a SLIP stream.
    #[arg(long)]
    pub raw: bool,
    /// Verify and strip a CRC trailer.
    #[arg(long, value_enum, conflicts_with = "raw")]
    pub crc: Option<CrcAlgo>,
    /// Reassembly buffer capacity in bytes.
    #[arg(long, default_value_t = 4096)]
    pub capacity: usize,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input file, or `-` for stdin.
    pub input: PathBuf,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}

pub fn read_input(path: &PathBuf) -> std::io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::Read::read_to_end(&mut std::io::stdin().lock(), &mut bytes)?;
        Ok(bytes)
    } else {
        std::fs::read(path)
    }
}
