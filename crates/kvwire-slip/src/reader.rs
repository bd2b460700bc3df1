use std::io::{ErrorKind, Read};

use bytes::{Buf, BytesMut};

use crate::decoder::SlipParser;
use crate::error::{Result, SlipError};

const READ_CHUNK_SIZE: usize = 1024;

/// Reads complete SLIP packets from any `Read` stream.
///
/// Pulls chunks from the stream and feeds them byte by byte into a
/// [`SlipParser`] over the caller's reassembly buffer. Callers always get
/// complete packets; partial reads are handled internally.
#[derive(Debug)]
pub struct SlipReader<'b, T> {
    inner: T,
    parser: SlipParser<'b>,
    pending: BytesMut,
}

impl<'b, T: Read> SlipReader<'b, T> {
    /// Read packets from `inner`, reassembling into `buf`.
    pub fn new(inner: T, buf: &'b mut [u8]) -> Self {
        Self {
            inner,
            parser: SlipParser::new(buf),
            pending: BytesMut::with_capacity(READ_CHUNK_SIZE),
        }
    }

    /// Read the next packet (blocking).
    ///
    /// Returns the payload size, or 0 on a clean end of stream between
    /// packets. A stream that ends inside a packet is an error.
    pub fn read_packet(&mut self) -> Result<usize> {
        loop {
            while !self.pending.is_empty() {
                let size = self.parser.parse(self.pending.get_u8());
                if size > 0 {
                    return Ok(size);
                }
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(SlipError::Io(err)),
            };

            if read == 0 {
                if self.parser.in_packet() {
                    return Err(SlipError::ConnectionClosed);
                }
                return Ok(0);
            }
            self.pending.extend_from_slice(&chunk[..read]);
        }
    }

    /// The most recently finalized packet.
    pub fn payload(&self) -> &[u8] {
        self.parser.payload()
    }

    /// Returns true if the last packet did not fit the reassembly buffer.
    pub fn was_truncated(&self) -> bool {
        self.parser.was_truncated()
    }

    /// Number of payload bytes dropped from the last packet.
    pub fn num_truncated(&self) -> usize {
        self.parser.num_truncated()
    }

    /// Returns true if the last packet carried an invalid escape sequence.
    pub fn protocol_violation(&self) -> bool {
        self.parser.protocol_violation()
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::encoder::SlipWriter;
    use crate::{END, ESC};

    #[test]
    fn reads_consecutive_packets() {
        let mut wire = Vec::new();
        let mut writer = SlipWriter::new(&mut wire);
        writer.write_packet(&[0x01, END, 0x02]).unwrap();
        writer.write_packet(&[ESC, ESC]).unwrap();

        let mut buf = [0u8; 32];
        let mut reader = SlipReader::new(Cursor::new(wire), &mut buf);

        assert_eq!(reader.read_packet().unwrap(), 3);
        assert_eq!(reader.payload(), [0x01, END, 0x02]);
        assert_eq!(reader.read_packet().unwrap(), 2);
        assert_eq!(reader.payload(), [ESC, ESC]);
        assert_eq!(reader.read_packet().unwrap(), 0);
    }

    #[test]
    fn truncated_packet_leaves_guard_bytes_alone() {
        let body: Vec<u8> = (0u8..24).collect();
        let mut wire = Vec::new();
        SlipWriter::new(&mut wire).write_packet(&body).unwrap();

        let mut buf = [0x49u8; 24];
        let (head, tail) = buf.split_at_mut(23);
        {
            let mut reader = SlipReader::new(Cursor::new(wire), head);
            assert_eq!(reader.read_packet().unwrap(), 23);
            assert!(reader.was_truncated());
            assert_eq!(reader.num_truncated(), 1);
            assert_eq!(reader.payload(), &body[..23]);
        }
        assert_eq!(tail, [0x49]);
    }

    #[test]
    fn eof_between_packets_is_clean() {
        let mut buf = [0u8; 8];
        let mut reader = SlipReader::new(Cursor::new(Vec::<u8>::new()), &mut buf);
        assert_eq!(reader.read_packet().unwrap(), 0);
    }

    #[test]
    fn eof_mid_packet_is_an_error() {
        let wire = vec![END, 0x01, 0x02];
        let mut buf = [0u8; 8];
        let mut reader = SlipReader::new(Cursor::new(wire), &mut buf);
        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, SlipError::ConnectionClosed));
    }

    #[test]
    fn interrupted_read_retries() {
        struct InterruptedThenData {
            interrupted: bool,
            cursor: Cursor<Vec<u8>>,
        }

        impl Read for InterruptedThenData {
            fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(std::io::Error::from(ErrorKind::Interrupted));
                }
                self.cursor.read(out)
            }
        }

        let mut wire = Vec::new();
        SlipWriter::new(&mut wire).write_packet(&[0x07]).unwrap();

        let mut buf = [0u8; 8];
        let mut reader = SlipReader::new(
            InterruptedThenData {
                interrupted: false,
                cursor: Cursor::new(wire),
            },
            &mut buf,
        );
        assert_eq!(reader.read_packet().unwrap(), 1);
        assert_eq!(reader.payload(), [0x07]);
    }

    #[test]
    fn byte_by_byte_stream_reassembles() {
        struct ByteByByte {
            bytes: Vec<u8>,
            pos: usize,
        }

        impl Read for ByteByByte {
            fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
                if self.pos >= self.bytes.len() || out.is_empty() {
                    return Ok(0);
                }
                out[0] = self.bytes[self.pos];
                self.pos += 1;
                Ok(1)
            }
        }

        let mut wire = Vec::new();
        SlipWriter::new(&mut wire)
            .write_packet(&[END, ESC, 0x55])
            .unwrap();

        let mut buf = [0u8; 8];
        let mut reader = SlipReader::new(ByteByByte { bytes: wire, pos: 0 }, &mut buf);
        assert_eq!(reader.read_packet().unwrap(), 3);
        assert_eq!(reader.payload(), [END, ESC, 0x55]);
    }
}
