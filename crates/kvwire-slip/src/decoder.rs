use crate::checksum::Checksum;
use crate::{END, ESC, ESC_END, ESC_ESC};

/// Resumable SLIP packet decoder over a caller-owned buffer.
///
/// Advance the decoder one byte at a time with [`parse`](Self::parse); it
/// returns 0 until a packet is finalized by an END delimiter, then the packet
/// size. Bytes past the buffer capacity are counted, not stored, so a
/// too-small buffer degrades to a truncated packet instead of a failure, and
/// any corrupted stream resynchronizes at the next delimiter.
///
/// Decoder faults are observable state rather than errors:
/// [`was_truncated`](Self::was_truncated) and
/// [`num_truncated`](Self::num_truncated) report capacity overflow, and
/// [`protocol_violation`](Self::protocol_violation) reports an ESC followed
/// by a byte that is neither ESC_END nor ESC_ESC (the byte is passed through
/// unchanged). All three describe the packet most recently worked on and
/// reset when the next packet starts.
#[derive(Debug)]
pub struct SlipParser<'b> {
    buf: &'b mut [u8],
    used: usize,
    finished: usize,
    escape: bool,
    truncated: usize,
    violation: bool,
    fresh: bool,
}

impl<'b> SlipParser<'b> {
    /// Reassemble packets into `buf`.
    pub fn new(buf: &'b mut [u8]) -> Self {
        Self {
            buf,
            used: 0,
            finished: 0,
            escape: false,
            truncated: 0,
            violation: false,
            fresh: true,
        }
    }

    /// Feed one byte.
    ///
    /// Returns 0 while the packet is incomplete (empty packets are
    /// suppressed), or the number of payload bytes stored in the buffer when
    /// an END delimiter finalizes a packet. For a truncated packet that is
    /// the buffer capacity, and [`was_truncated`](Self::was_truncated)
    /// reports the loss.
    pub fn parse(&mut self, byte: u8) -> usize {
        self.parse_with(byte, |_, _| {})
    }

    /// Feed one byte, observing every decoded payload byte.
    ///
    /// The observer is called with `(byte, index_in_packet)` for each
    /// unescaped payload byte, including bytes dropped by truncation, so
    /// side-state such as a running checksum stays aligned with the logical
    /// packet. The index restarts at 0 for each packet.
    pub fn parse_with(&mut self, byte: u8, mut observer: impl FnMut(u8, usize)) -> usize {
        if byte == END {
            if self.escape {
                self.escape = false;
                self.violation = true;
            }
            if self.used == 0 {
                self.fresh = true;
                return 0;
            }
            self.finished = self.used;
            self.used = 0;
            self.fresh = true;
            return self.finished;
        }
        if self.fresh {
            self.fresh = false;
            self.truncated = 0;
            self.violation = false;
        }
        if self.escape {
            self.escape = false;
            let decoded = match byte {
                ESC_END => END,
                ESC_ESC => ESC,
                other => {
                    self.violation = true;
                    other
                }
            };
            self.push(decoded, &mut observer);
            return 0;
        }
        if byte == ESC {
            self.escape = true;
            return 0;
        }
        self.push(byte, &mut observer);
        0
    }

    fn push(&mut self, byte: u8, observer: &mut impl FnMut(u8, usize)) {
        let index = self.used + self.truncated;
        if self.used < self.buf.len() {
            self.buf[self.used] = byte;
            self.used += 1;
        } else {
            self.truncated += 1;
        }
        observer(byte, index);
    }

    /// The most recently finalized packet. Valid until the next packet
    /// starts overwriting the buffer.
    pub fn payload(&self) -> &[u8] {
        &self.buf[..self.finished]
    }

    /// Returns true if the current packet did not fit the buffer.
    pub fn was_truncated(&self) -> bool {
        self.truncated > 0
    }

    /// Number of payload bytes dropped because the buffer was full.
    pub fn num_truncated(&self) -> usize {
        self.truncated
    }

    /// Returns true if the current packet carried an invalid escape
    /// sequence. Decoding continues regardless.
    pub fn protocol_violation(&self) -> bool {
        self.violation
    }

    /// Returns true between the first byte of a packet and its delimiter.
    pub fn in_packet(&self) -> bool {
        !self.fresh || self.escape
    }
}

/// SLIP decoder that verifies a CRC trailer.
///
/// Wraps a [`SlipParser`], feeding every decoded byte through the checksum
/// (restarting it at packet index 0) and stripping the trailer from the
/// reported packet size. After [`parse`](Self::parse) returns a size, the
/// packet arrived intact exactly when [`checksum`](Self::checksum) is zero.
#[derive(Debug)]
pub struct SlipCrcParser<'b, C> {
    parser: SlipParser<'b>,
    crc: C,
    body_len: usize,
}

impl<'b, C: Checksum> SlipCrcParser<'b, C> {
    /// Reassemble packets into `buf`, verifying with `crc`.
    pub fn new(buf: &'b mut [u8], crc: C) -> Self {
        Self {
            parser: SlipParser::new(buf),
            crc,
            body_len: 0,
        }
    }

    /// Feed one byte.
    ///
    /// Returns 0 while the packet is incomplete or too short to carry a
    /// trailer, otherwise the body size with the trailer stripped. When the
    /// trailer itself was truncated, the surviving body bytes are still
    /// reported.
    pub fn parse(&mut self, byte: u8) -> usize {
        let Self { parser, crc, .. } = self;
        let size = parser.parse_with(byte, |decoded, index| {
            if index == 0 {
                crc.reset();
            }
            crc.update(decoded);
        });
        if size <= C::WIDTH {
            return 0;
        }
        self.body_len = if self.parser.num_truncated() < C::WIDTH {
            size + self.parser.num_truncated() - C::WIDTH
        } else {
            size
        };
        self.body_len
    }

    /// Digest over the packet including its trailer; zero means intact.
    pub fn checksum(&self) -> u64 {
        self.crc.value()
    }

    /// The body of the most recently finalized packet, trailer stripped.
    pub fn payload(&self) -> &[u8] {
        &self.parser.payload()[..self.body_len.min(self.parser.payload().len())]
    }

    /// Returns true if body bytes (not just trailer bytes) were dropped.
    pub fn was_truncated(&self) -> bool {
        self.num_truncated() > 0
    }

    /// Number of body bytes dropped, excluding the trailer.
    pub fn num_truncated(&self) -> usize {
        self.parser.num_truncated().saturating_sub(C::WIDTH)
    }

    /// Returns true if the current packet carried an invalid escape
    /// sequence.
    pub fn protocol_violation(&self) -> bool {
        self.parser.protocol_violation()
    }
}
