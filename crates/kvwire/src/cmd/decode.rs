use kvwire_dict::DictParser;
use kvwire_slip::{
    Checksum, Crc16CcittFalse, Crc32Mpeg2, Crc8Smbus, SlipCrcParser, SlipParser,
};
use kvwire_types::TypeRegistry;

use crate::cmd::{read_input, CrcAlgo, DecodeArgs};
use crate::exit::{io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_dict, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let wire = read_input(&args.input)
        .map_err(|err| io_error(&format!("failed reading {}", args.input.display()), err))?;
    let registry = TypeRegistry::builtin();

    if args.raw {
        let dict = DictParser::new(&wire);
        print_dict(&dict, &registry, format);
        return Ok(SUCCESS);
    }

    let packets = match args.crc {
        None => unframe(&wire, args.capacity)?,
        Some(CrcAlgo::Crc8) => unframe_crc(&wire, args.capacity, Crc8Smbus::new())?,
        Some(CrcAlgo::Crc16) => unframe_crc(&wire, args.capacity, Crc16CcittFalse::new())?,
        Some(CrcAlgo::Crc32) => unframe_crc(&wire, args.capacity, Crc32Mpeg2::new())?,
    };

    if packets.is_empty() {
        return Err(CliError::new(DATA_INVALID, "no complete packet in input"));
    }
    for packet in &packets {
        let dict = DictParser::new(packet);
        print_dict(&dict, &registry, format);
    }
    Ok(SUCCESS)
}

fn unframe(wire: &[u8], capacity: usize) -> CliResult<Vec<Vec<u8>>> {
    let mut buf = vec![0u8; capacity];
    let mut parser = SlipParser::new(&mut buf);
    let mut packets = Vec::new();
    for &byte in wire {
        if parser.parse(byte) > 0 {
            if parser.was_truncated() {
                return Err(truncated_error(parser.num_truncated()));
            }
            if parser.protocol_violation() {
                tracing::warn!("packet carried an invalid escape sequence");
            }
            packets.push(parser.payload().to_vec());
        }
    }
    Ok(packets)
}

fn unframe_crc<C: Checksum>(wire: &[u8], capacity: usize, crc: C) -> CliResult<Vec<Vec<u8>>> {
    let mut buf = vec![0u8; capacity];
    let mut parser = SlipCrcParser::new(&mut buf, crc);
    let mut packets = Vec::new();
    for &byte in wire {
        if parser.parse(byte) > 0 {
            if parser.was_truncated() {
                return Err(truncated_error(parser.num_truncated()));
            }
            if parser.checksum() != 0 {
                return Err(CliError::new(
                    DATA_INVALID,
                    format!("checksum mismatch (residue {:#x})", parser.checksum()),
                ));
            }
            packets.push(parser.payload().to_vec());
        }
    }
    Ok(packets)
}

fn truncated_error(dropped: usize) -> CliError {
    CliError::new(
        DATA_INVALID,
        format!("packet truncated, {dropped} bytes dropped; raise --capacity"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvwire_dict::DictBuilder;
    use kvwire_slip::{SlipCrcWriter, SlipWriter};

    fn sample_dict() -> Vec<u8> {
        let mut buf = [0u8; 256];
        let mut dict = DictBuilder::new(&mut buf);
        assert!(dict.add_value("x", 7u32));
        assert!(dict.add_str("msg", "hi"));
        dict.as_bytes().to_vec()
    }

    #[test]
    fn unframes_plain_packets() {
        let body = sample_dict();
        let mut wire = Vec::new();
        SlipWriter::new(&mut wire).write_packet(&body).unwrap();

        let packets = unframe(&wire, 4096).unwrap();
        assert_eq!(packets, [body]);
    }

    #[test]
    fn unframes_and_verifies_crc_packets() {
        let body = sample_dict();
        let mut wire = Vec::new();
        SlipCrcWriter::new(&mut wire, Crc16CcittFalse::new())
            .write_packet(&body)
            .unwrap();

        let packets = unframe_crc(&wire, 4096, Crc16CcittFalse::new()).unwrap();
        assert_eq!(packets, [body]);
    }

    #[test]
    fn corrupt_crc_packet_is_rejected() {
        let body = sample_dict();
        let mut wire = Vec::new();
        SlipCrcWriter::new(&mut wire, Crc16CcittFalse::new())
            .write_packet(&body)
            .unwrap();
        wire[2] ^= 0x40;

        let err = unframe_crc(&wire, 4096, Crc16CcittFalse::new()).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn undersized_capacity_is_reported() {
        let body = sample_dict();
        let mut wire = Vec::new();
        SlipWriter::new(&mut wire).write_packet(&body).unwrap();

        let err = unframe(&wire, 8).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("truncated"));
    }
}
