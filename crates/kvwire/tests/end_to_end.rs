//! End-to-end scenarios across the dictionary and framing layers.

use kvwire::dict::{AccessError, DictBuilder, DictParser};
use kvwire::slip::{
    Crc16CcittFalse, SlipCrcParser, SlipCrcWriter, SlipParser, SlipWriter, END, ESC, ESC_END,
    ESC_ESC,
};

#[test]
fn mixed_value_dictionary_roundtrips() {
    let mut buf = [0u8; 512];
    let mut dict = DictBuilder::new(&mut buf);
    assert!(dict.add_value("π", 3.14159265358979323846f64));
    assert!(dict.add_str("message", "The EAGLE has landed"));
    assert!(dict.add_value("success", true));
    assert!(dict.add("integers", &[10i32, 20, 30, 40]));

    let bytes = dict.as_bytes();
    assert_eq!(bytes.len() % 4, 0);

    let parsed = DictParser::new(bytes);
    let keys: Vec<&str> = parsed.keys().collect();
    assert_eq!(keys, ["integers", "message", "success", "π"]);

    assert_eq!(
        parsed.get("π").unwrap().get_value::<f64>().unwrap(),
        3.14159265358979323846f64
    );
    assert_eq!(
        parsed.get("message").unwrap().get_str().unwrap(),
        "The EAGLE has landed"
    );
    assert_eq!(parsed.get("success").unwrap().get_value::<bool>(), Ok(true));
    assert_eq!(parsed.get("integers").unwrap().get::<i32>(3), Ok(40));
    assert_eq!(
        parsed.get("integers").unwrap().get::<i32>(4),
        Err(AccessError::IndexOutOfRange { index: 4, count: 4 })
    );
}

#[test]
fn overwrite_preserves_length_and_rejects_type_changes() {
    let mut buf = [0u8; 512];
    let mut dict = DictBuilder::new(&mut buf);
    assert!(dict.add("integers", &[1i32, 2, 3, 4]));
    let len = dict.len();

    assert!(dict.add("integers", &[10i32, 20, 30, 40]));
    assert_eq!(dict.len(), len);
    assert_eq!(dict.find("integers").unwrap().get::<i32>(0), Ok(10));

    // same element count, different type and payload size
    assert!(!dict.add("integers", &[1i8, 2, 3, 4]));
    assert_eq!(dict.len(), len);
    assert_eq!(dict.find("integers").unwrap().get::<i32>(0), Ok(10));
}

#[test]
fn slip_roundtrip_with_special_characters() {
    let body: Vec<u8> = vec![
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, //
        0xC0, 0xC1, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, //
        0xD8, 0xD9, 0xDA, 0xDB, 0xDC, 0xDD, 0xDE, 0xDF, //
        END, END, //
        ESC, ESC, //
        END, //
        ESC_ESC, ESC_END, //
    ];

    let mut wire = Vec::new();
    SlipWriter::new(&mut wire).write_packet(&body).unwrap();
    assert_eq!(wire[0], END);
    assert_eq!(&wire[1..11], &[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, ESC, ESC_END]);

    let mut rx = [0u8; 300];
    let mut parser = SlipParser::new(&mut rx);
    let mut size = 0;
    for &byte in &wire {
        let got = parser.parse(byte);
        if got > 0 {
            size = got;
        }
    }
    assert_eq!(size, body.len());
    assert_eq!(parser.payload(), body);
}

#[test]
fn truncation_keeps_the_prefix_and_the_guard() {
    let body: Vec<u8> = (0u8..24).collect();
    let mut wire = Vec::new();
    SlipWriter::new(&mut wire).write_packet(&body).unwrap();

    let mut rx = [0x11u8; 24];
    let (head, guard) = rx.split_at_mut(23);
    let mut parser = SlipParser::new(head);
    let mut size = 0;
    for &byte in &wire {
        let got = parser.parse(byte);
        if got > 0 {
            size = got;
        }
    }
    assert_eq!(size, 23);
    assert!(parser.was_truncated());
    assert_eq!(parser.num_truncated(), 1);
    assert_eq!(parser.payload(), &body[..23]);
    assert_eq!(guard, [0x11]);
}

#[test]
fn crc16_packet_matches_the_reference_bytes() {
    let mut wire = Vec::new();
    SlipCrcWriter::new(&mut wire, Crc16CcittFalse::new())
        .write_packet(b"123456789")
        .unwrap();
    assert_eq!(
        wire,
        vec![
            0xC0, //
            0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, //
            0x29, 0xB1, //
            0xC0,
        ]
    );

    let mut rx = [0u8; 64];
    let mut parser = SlipCrcParser::new(&mut rx, Crc16CcittFalse::new());
    let mut size = 0;
    for &byte in &wire {
        size = parser.parse(byte);
    }
    assert_eq!(size, 9);
    assert_eq!(parser.checksum(), 0);
    assert_eq!(parser.payload(), b"123456789");
}

#[test]
fn every_flipped_body_byte_is_detected() {
    let mut reference = Vec::new();
    SlipCrcWriter::new(&mut reference, Crc16CcittFalse::new())
        .write_packet(b"123456789")
        .unwrap();

    for i in 1..=9 {
        let mut wire = reference.clone();
        wire[i] ^= 0x20;

        let mut rx = [0u8; 64];
        let mut parser = SlipCrcParser::new(&mut rx, Crc16CcittFalse::new());
        let mut size = 0;
        for &byte in &wire {
            size = parser.parse(byte);
        }
        // the payload is still delivered, the checksum exposes the damage
        assert_eq!(size, 9, "flipped byte {i}");
        assert_ne!(parser.checksum(), 0, "flipped byte {i}");
    }
}

#[test]
fn partial_delivery_completes_on_the_final_delimiter() {
    let body = b"partial delivery".to_vec();
    let mut wire = Vec::new();
    SlipWriter::new(&mut wire).write_packet(&body).unwrap();

    let mut rx = [0u8; 64];
    let mut parser = SlipParser::new(&mut rx);
    for &byte in &wire[..wire.len() - 1] {
        assert_eq!(parser.parse(byte), 0);
    }
    assert_eq!(parser.parse(wire[wire.len() - 1]), body.len());
    assert_eq!(parser.payload(), body);
}

#[test]
fn dictionary_survives_the_full_wire_path() {
    // device: build and frame
    let mut tx = [0u8; 512];
    let mut dict = DictBuilder::new(&mut tx);
    assert!(dict.add_value("seq", 4242u32));
    assert!(dict.add("samples", &[1.5f32, -2.5, 3.25]));
    assert!(dict.add_str("unit", "m/s²"));
    assert!(dict.add_value("flag", false));

    let mut wire = Vec::new();
    SlipCrcWriter::new(&mut wire, Crc16CcittFalse::new())
        .write_packet(dict.as_bytes())
        .unwrap();

    // host: unframe, verify, index
    let mut rx = [0u8; 512];
    let mut parser = SlipCrcParser::new(&mut rx, Crc16CcittFalse::new());
    let mut size = 0;
    for &byte in &wire {
        let got = parser.parse(byte);
        if got > 0 {
            size = got;
        }
    }
    assert_eq!(size, dict.as_bytes().len());
    assert_eq!(parser.checksum(), 0);
    assert_eq!(parser.payload(), dict.as_bytes());

    let parsed = DictParser::new(parser.payload());
    assert_eq!(parsed.get("seq").unwrap().get_value::<u32>(), Ok(4242));
    assert_eq!(
        parsed.get("samples").unwrap().get_vec::<f32>().unwrap(),
        [1.5, -2.5, 3.25]
    );
    assert_eq!(parsed.get("unit").unwrap().get_str(), Ok("m/s²"));
    assert_eq!(parsed.get("flag").unwrap().get_value::<bool>(), Ok(false));
}

#[test]
fn rejected_adds_never_disturb_shipped_bytes() {
    let mut buf = [0u8; 64];
    let mut dict = DictBuilder::new(&mut buf);
    assert!(dict.add_value("a", 1u32));
    assert!(dict.add_value("b", 2u32));
    let snapshot = dict.as_bytes().to_vec();

    assert!(!dict.add_value("b", 2u8)); // type mismatch
    assert!(!dict.add("c", &[0u8; 64])); // does not fit
    assert!(!dict.add_value("", 0u8)); // empty key

    assert_eq!(dict.as_bytes(), snapshot);
}
