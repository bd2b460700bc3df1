//! Offset arithmetic for laying out dictionary entries in memory.

/// Entry header: key length (1) + type id (1) + data length (2 LE).
pub const HEADER_SIZE: usize = 4;

/// Keys are 1..=255 bytes; zero is the terminator sentinel.
pub const MAX_KEY_LEN: usize = u8::MAX as usize;

/// Value payloads are limited by the 16-bit data length field.
pub const MAX_DATA_LEN: usize = u16::MAX as usize;

/// Offset of the next 4-byte word strictly after `i`.
///
/// ```text
/// in:   0  1  2  3  4  5  6  7  8  ...
/// out:  4  4  4  4  8  8  8  8  12 ...
/// ```
///
/// `next_word(i) >= i + 1` always, which is what guarantees at least one NUL
/// byte between the key and the value.
pub const fn next_word(i: usize) -> usize {
    i - (i % 4) + 4
}

/// Round a size up to a multiple of 4-byte words.
///
/// ```text
/// in:   0  1  2  3  4  5  6  7  8  9  ...
/// out:  0  4  4  4  4  8  8  8  8  12 ...
/// ```
pub const fn round_word(i: usize) -> usize {
    i + 3 - ((i + 3) % 4)
}

/// Total bytes one entry occupies: header, padded key, padded value.
pub const fn entry_span(key_len: usize, data_len: usize) -> usize {
    HEADER_SIZE + next_word(key_len) + round_word(data_len)
}
