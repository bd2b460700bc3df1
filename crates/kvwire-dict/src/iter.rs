use kvwire_types::{type_id, KvValue};

use crate::error::{AccessError, Result};
use crate::layout::{entry_span, next_word, HEADER_SIZE};

/// Zero-copy view of one dictionary entry.
///
/// Carries the key, the type id, and the value payload as slices into the
/// walked buffer. Typed accessors verify the stored type id and bounds
/// before decoding.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    key: &'a str,
    type_id: u8,
    value: &'a [u8],
    value_offset: usize,
}

impl<'a> Entry<'a> {
    /// The entry key.
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// The wire type id of the value.
    pub fn type_id(&self) -> u8 {
        self.type_id
    }

    /// The raw value payload, exactly `data_len` bytes.
    pub fn raw_value(&self) -> &'a [u8] {
        self.value
    }

    /// Total bytes of the value payload.
    pub fn data_len(&self) -> usize {
        self.value.len()
    }

    /// Number of `T` elements in the payload.
    pub fn count<T: KvValue>(&self) -> usize {
        self.value.len() / T::SIZE
    }

    /// Offset of the value payload from the start of the walked buffer.
    /// The builder uses this for in-place overwrites.
    pub(crate) fn value_offset(&self) -> usize {
        self.value_offset
    }

    /// Decode the element at `index`.
    pub fn get<T: KvValue>(&self, index: usize) -> Result<T> {
        self.check_type::<T>()?;
        if index * T::SIZE >= self.value.len() {
            return Err(AccessError::IndexOutOfRange {
                index,
                count: self.count::<T>(),
            });
        }
        Ok(T::read_from(&self.value[index * T::SIZE..]))
    }

    /// Decode a single-element entry.
    pub fn get_value<T: KvValue>(&self) -> Result<T> {
        self.get(0)
    }

    /// Decode the payload as a fixed-size array.
    ///
    /// The stored element count must be exactly `N`.
    pub fn get_array<T: KvValue, const N: usize>(&self) -> Result<[T; N]> {
        self.check_type::<T>()?;
        if N * T::SIZE != self.value.len() {
            return Err(AccessError::LengthMismatch {
                requested: N,
                count: self.count::<T>(),
            });
        }
        Ok(core::array::from_fn(|i| {
            T::read_from(&self.value[i * T::SIZE..])
        }))
    }

    /// Decode the payload as a vector of all stored elements.
    pub fn get_vec<T: KvValue>(&self) -> Result<Vec<T>> {
        self.check_type::<T>()?;
        Ok((0..self.count::<T>())
            .map(|i| T::read_from(&self.value[i * T::SIZE..]))
            .collect())
    }

    /// Decode a char run as text.
    ///
    /// Strings are stored with their terminating NUL counted in the data
    /// length; the returned slice omits that terminator.
    pub fn get_str(&self) -> Result<&'a str> {
        if self.type_id != type_id::CHAR {
            return Err(AccessError::TypeMismatch {
                requested: type_id::CHAR,
                actual: self.type_id,
            });
        }
        let text = match self.value.split_last() {
            Some((0, head)) => head,
            _ => self.value,
        };
        core::str::from_utf8(text).map_err(|_| AccessError::InvalidUtf8)
    }

    fn check_type<T: KvValue>(&self) -> Result<()> {
        if self.type_id != T::TYPE_ID {
            return Err(AccessError::TypeMismatch {
                requested: T::TYPE_ID,
                actual: self.type_id,
            });
        }
        Ok(())
    }
}

/// Walks a dictionary buffer yielding [`Entry`] views in storage order.
///
/// Iteration ends at the buffer end, at a zero sentinel byte, or at the
/// first malformed entry (a span past the buffer end or a non-UTF-8 key).
#[derive(Debug, Clone)]
pub struct EntryIter<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> EntryIter<'a> {
    /// Walk `buf`, which must start at an entry header (or a sentinel).
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Linear scan for the first entry with this key.
    pub fn find_key(self, key: &str) -> Option<Entry<'a>> {
        let mut iter = self;
        iter.find(|entry| entry.key() == key)
    }
}

impl<'a> Iterator for EntryIter<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Entry<'a>> {
        let remaining = &self.buf[self.pos..];
        if remaining.len() < HEADER_SIZE || remaining[0] == 0 {
            return None;
        }
        let key_len = remaining[0] as usize;
        let type_id = remaining[1];
        let data_len = u16::from_le_bytes([remaining[2], remaining[3]]) as usize;
        let span = entry_span(key_len, data_len);
        if span > remaining.len() {
            return None;
        }
        let key = core::str::from_utf8(&remaining[HEADER_SIZE..HEADER_SIZE + key_len]).ok()?;
        let value_start = HEADER_SIZE + next_word(key_len);
        let entry = Entry {
            key,
            type_id,
            value: &remaining[value_start..value_start + data_len],
            value_offset: self.pos + value_start,
        };
        self.pos += span;
        Some(entry)
    }
}
