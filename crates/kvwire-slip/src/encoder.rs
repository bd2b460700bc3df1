use std::io::{self, Write};

use crate::checksum::Checksum;
use crate::{END, ESC, ESC_END, ESC_ESC};

/// Encodes SLIP packets onto any `Write` sink.
///
/// Every operation returns the number of bytes handed to the sink, framing
/// and stuffing overhead included. A packet is `begin` + any number of
/// `write` calls + `end`; [`write_packet`](Self::write_packet) does all three.
#[derive(Debug)]
pub struct SlipWriter<W> {
    inner: W,
}

impl<W: Write> SlipWriter<W> {
    /// Encode onto `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Start a packet.
    ///
    /// Emits an END delimiter, which also flushes any partial packet the
    /// peer's decoder may be sitting on.
    pub fn begin(&mut self) -> io::Result<usize> {
        self.put(END)
    }

    /// Finish the packet with an END delimiter.
    pub fn end(&mut self) -> io::Result<usize> {
        self.put(END)
    }

    /// Stuff and emit body bytes.
    pub fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut sent = 0;
        for &byte in data {
            sent += self.stuff(byte)?;
        }
        Ok(sent)
    }

    /// Emit a complete packet: delimiter, stuffed body, delimiter.
    pub fn write_packet(&mut self, body: &[u8]) -> io::Result<usize> {
        Ok(self.begin()? + self.write(body)? + self.end()?)
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn stuff(&mut self, byte: u8) -> io::Result<usize> {
        match byte {
            END => Ok(self.put(ESC)? + self.put(ESC_END)?),
            ESC => Ok(self.put(ESC)? + self.put(ESC_ESC)?),
            other => self.put(other),
        }
    }

    fn put(&mut self, byte: u8) -> io::Result<usize> {
        self.inner.write_all(&[byte])?;
        Ok(1)
    }
}

/// Encodes SLIP packets with a CRC trailer.
///
/// The checksum runs over the unescaped body bytes in transmission order and
/// is emitted most-significant-byte-first just before the closing delimiter,
/// subject to the same stuffing as the body.
#[derive(Debug)]
pub struct SlipCrcWriter<W, C> {
    inner: SlipWriter<W>,
    crc: C,
}

impl<W: Write, C: Checksum> SlipCrcWriter<W, C> {
    /// Encode onto `inner` with `crc` as the trailer algorithm.
    pub fn new(inner: W, crc: C) -> Self {
        Self {
            inner: SlipWriter::new(inner),
            crc,
        }
    }

    /// Start a packet and restart the checksum.
    pub fn begin(&mut self) -> io::Result<usize> {
        self.crc.reset();
        self.inner.begin()
    }

    /// Stuff and emit body bytes, folding them into the checksum.
    pub fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        for &byte in data {
            self.crc.update(byte);
        }
        self.inner.write(data)
    }

    /// Emit the stuffed checksum trailer and the closing delimiter.
    pub fn end(&mut self) -> io::Result<usize> {
        let digest = self.crc.value();
        let mut sent = 0;
        for shift in (0..C::WIDTH).rev() {
            sent += self.inner.stuff((digest >> (8 * shift)) as u8)?;
        }
        Ok(sent + self.inner.end()?)
    }

    /// Emit a complete packet with its trailer.
    pub fn write_packet(&mut self, body: &[u8]) -> io::Result<usize> {
        Ok(self.begin()? + self.write(body)? + self.end()?)
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}
