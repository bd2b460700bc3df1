//! Human-readable rendering of dictionary buffers.

use std::io::{self, Write};

/// Dump `buf` word by word as offset + hexadecimal + ASCII.
///
/// ```text
///    0   03 0C 06 00   . . . .
///    4   6B 65 79 00   k e y .
///    8   76 61 6C 75   v a l u
/// ```
pub fn hex_dump<W: Write>(out: &mut W, buf: &[u8]) -> io::Result<()> {
    for (i, word) in buf.chunks(4).enumerate() {
        write!(out, "{:4}  ", i * 4)?;
        for byte in word {
            write!(out, " {byte:02X}")?;
        }
        for _ in word.len()..4 {
            write!(out, "   ")?;
        }
        write!(out, "  ")?;
        for &byte in word {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            };
            write!(out, " {c}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
