use std::str::FromStr;

use kvwire_dict::DictBuilder;
use kvwire_slip::{Crc16CcittFalse, Crc32Mpeg2, Crc8Smbus, SlipCrcWriter, SlipWriter};

use crate::cmd::{CrcAlgo, EncodeArgs};
use crate::exit::{io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::print_raw;

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let mut buf = vec![0u8; args.capacity];
    let mut dict = DictBuilder::new(&mut buf);

    for spec in &args.entries {
        let entry = EntrySpec::parse(spec)?;
        if !entry.add_to(&mut dict) {
            return Err(CliError::new(
                DATA_INVALID,
                format!("entry rejected (capacity or key/value limits): {spec}"),
            ));
        }
    }
    tracing::debug!(
        entries = args.entries.len(),
        bytes = dict.len(),
        "dictionary built"
    );

    let body = dict.as_bytes();
    let wire = if let Some(algo) = args.crc {
        let mut out = Vec::with_capacity(body.len() + 4);
        match algo {
            CrcAlgo::Crc8 => {
                SlipCrcWriter::new(&mut out, Crc8Smbus::new()).write_packet(body)
            }
            CrcAlgo::Crc16 => {
                SlipCrcWriter::new(&mut out, Crc16CcittFalse::new()).write_packet(body)
            }
            CrcAlgo::Crc32 => {
                SlipCrcWriter::new(&mut out, Crc32Mpeg2::new()).write_packet(body)
            }
        }
        .map_err(|err| io_error("framing failed", err))?;
        out
    } else if args.frame {
        let mut out = Vec::with_capacity(body.len() + 2);
        SlipWriter::new(&mut out)
            .write_packet(body)
            .map_err(|err| io_error("framing failed", err))?;
        out
    } else {
        body.to_vec()
    };

    match &args.out {
        Some(path) => std::fs::write(path, &wire)
            .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?,
        None => print_raw(&wire),
    }
    Ok(SUCCESS)
}

/// One `KEY=TYPE:VALUE` argument, parsed.
struct EntrySpec<'a> {
    key: &'a str,
    ty: &'a str,
    value: &'a str,
}

impl<'a> EntrySpec<'a> {
    fn parse(spec: &'a str) -> CliResult<Self> {
        let (key, rest) = spec
            .split_once('=')
            .ok_or_else(|| CliError::new(USAGE, format!("expected KEY=TYPE:VALUE, got: {spec}")))?;
        let (ty, value) = rest
            .split_once(':')
            .ok_or_else(|| CliError::new(USAGE, format!("expected KEY=TYPE:VALUE, got: {spec}")))?;
        Ok(Self { key, ty, value })
    }

    fn add_to(&self, dict: &mut DictBuilder<'_>) -> bool {
        match self.ty {
            "i8" => self.add_list::<i8>(dict),
            "u8" => self.add_list::<u8>(dict),
            "i16" => self.add_list::<i16>(dict),
            "u16" => self.add_list::<u16>(dict),
            "i32" => self.add_list::<i32>(dict),
            "u32" => self.add_list::<u32>(dict),
            "i64" => self.add_list::<i64>(dict),
            "u64" => self.add_list::<u64>(dict),
            "f32" => self.add_list::<f32>(dict),
            "f64" => self.add_list::<f64>(dict),
            "bool" => self.add_list::<bool>(dict),
            "str" => dict.add_str(self.key, self.value),
            _ => false,
        }
    }

    fn add_list<T>(&self, dict: &mut DictBuilder<'_>) -> bool
    where
        T: kvwire_types::KvValue + FromStr,
    {
        let mut values = Vec::new();
        for token in self.value.split(',') {
            match token.trim().parse::<T>() {
                Ok(value) => values.push(value),
                Err(_) => return false,
            }
        }
        dict.add(self.key, &values)
    }
}
