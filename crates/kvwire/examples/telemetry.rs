//! End-to-end walkthrough: build a dictionary on the "device", ship it
//! through SLIP framing with a CRC trailer, and read it back on the "host".
//!
//! ```sh
//! cargo run --example telemetry
//! ```

use kvwire::dict::{dump::hex_dump, DictBuilder, DictParser};
use kvwire::slip::{Crc16CcittFalse, SlipCrcParser, SlipCrcWriter};
use kvwire::types::{type_id, KvValue};

/// An application-defined value type: a 2D position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

impl KvValue for Position {
    const TYPE_ID: u8 = type_id::USER_START;
    const SIZE: usize = 8;

    fn write_to(&self, buf: &mut [u8]) {
        buf[..4].copy_from_slice(&self.x.to_le_bytes());
        buf[4..8].copy_from_slice(&self.y.to_le_bytes());
    }

    fn read_from(buf: &[u8]) -> Self {
        Self {
            x: f32::from_le_bytes(buf[..4].try_into().unwrap()),
            y: f32::from_le_bytes(buf[4..8].try_into().unwrap()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Device side: a fixed buffer, no allocation.
    let mut buf = [0u8; 512];
    let mut dict = DictBuilder::new(&mut buf);

    dict.add_value("π", core::f64::consts::PI);
    dict.add_str("message", "The EAGLE has landed");
    dict.add_value("success", true);
    dict.add("coordinates", &[0.1f32, 5.2, 3.4]);
    dict.add("integers", &[1i32, 2, 3, 4]);
    dict.add_value("position", Position { x: 1.1, y: 2.2 });

    // Overwriting keeps the buffer length: same key, type, and size.
    dict.add("integers", &[10i32, 20, 30, 40]);

    println!("dictionary ({} bytes):", dict.len());
    hex_dump(&mut std::io::stdout().lock(), dict.as_bytes())?;

    // Frame it for the wire.
    let mut wire = Vec::new();
    let sent = SlipCrcWriter::new(&mut wire, Crc16CcittFalse::new())
        .write_packet(dict.as_bytes())?;
    println!("\nsent {sent} bytes on the wire ({} of payload)", dict.len());

    // Host side: reassemble, verify, index.
    let mut rx = [0u8; 512];
    let mut parser = SlipCrcParser::new(&mut rx, Crc16CcittFalse::new());
    let mut size = 0;
    for &byte in &wire {
        size = parser.parse(byte);
    }
    assert!(size > 0, "packet should finalize");
    assert_eq!(parser.checksum(), 0, "packet should arrive intact");

    let parsed = DictParser::new(parser.payload());
    println!("\nkeys in order:");
    for key in parsed.keys() {
        println!(" + {key}");
    }

    println!("\nπ = {}", parsed.get("π")?.get_value::<f64>()?);
    println!("message = {}", parsed.get("message")?.get_str()?);
    println!("success = {}", parsed.get("success")?.get_value::<bool>()?);
    println!("integers[3] = {}", parsed.get("integers")?.get::<i32>(3)?);
    println!("coordinates = {:?}", parsed.get("coordinates")?.get_vec::<f32>()?);
    println!("position = {:?}", parsed.get("position")?.get_value::<Position>()?);

    // Typed access is checked: wrong type, wrong index, missing key.
    assert!(parsed.get("π")?.get_value::<i32>().is_err());
    assert!(parsed.get("integers")?.get::<i32>(4).is_err());
    assert!(parsed.get("ω").is_err());

    Ok(())
}
