//! RFC 1055 SLIP framing with optional CRC trailers.
//!
//! Packets are delimited by [`END`] bytes; [`END`] and [`ESC`] inside the
//! body are stuffed as two-byte escape sequences, so arbitrary binary data
//! travels unambiguously over a byte-oriented serial link.
//!
//! [`SlipWriter`] encodes onto any [`std::io::Write`] sink. [`SlipParser`] is
//! a resumable push decoder advanced one byte at a time into a caller-owned
//! buffer; it never fails on bad input, it resynchronizes at the next
//! delimiter. The CRC variants ([`SlipCrcWriter`], [`SlipCrcParser`]) append
//! and strip a big-endian checksum trailer computed over the unescaped body.

pub mod checksum;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod reader;

pub use checksum::{Checksum, Crc8Smbus, Crc16CcittFalse, Crc32Mpeg2};
pub use decoder::{SlipCrcParser, SlipParser};
pub use encoder::{SlipCrcWriter, SlipWriter};
pub use error::{Result, SlipError};
pub use reader::SlipReader;

/// End-of-packet delimiter.
pub const END: u8 = 0xC0;

/// Escape introducer for stuffed bytes.
pub const ESC: u8 = 0xDB;

/// `ESC ESC_END` stands for a literal [`END`] data byte.
pub const ESC_END: u8 = 0xDC;

/// `ESC ESC_ESC` stands for a literal [`ESC`] data byte.
pub const ESC_ESC: u8 = 0xDD;
