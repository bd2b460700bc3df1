use kvwire_types::{type_id, KvValue};

use crate::iter::{Entry, EntryIter};
use crate::layout::{entry_span, next_word, HEADER_SIZE, MAX_DATA_LEN, MAX_KEY_LEN};

/// Serializes key-value entries into a caller-owned byte buffer.
///
/// `add` either appends a new entry or, when the key already exists with the
/// same type and size, overwrites the value in place. A rejected `add`
/// (capacity, key/value limits, or a type/size mismatch on overwrite) leaves
/// the buffer byte-for-byte unchanged. No heap allocation on any path.
///
/// ```
/// use kvwire_dict::DictBuilder;
///
/// let mut buf = [0u8; 64];
/// let mut dict = DictBuilder::new(&mut buf);
/// assert!(dict.add("integers", &[1i32, 2, 3]));
/// assert!(dict.add_str("message", "hi"));
/// let wire = dict.as_bytes();
/// assert_eq!(wire.len() % 4, 0);
/// ```
#[derive(Debug)]
pub struct DictBuilder<'b> {
    buf: &'b mut [u8],
    used: usize,
}

impl<'b> DictBuilder<'b> {
    /// Build into `buf`. The buffer does not need to be zeroed; entries and
    /// the terminator sentinel are written explicitly.
    pub fn new(buf: &'b mut [u8]) -> Self {
        Self { buf, used: 0 }
    }

    /// Add `values` under `key`, or overwrite the existing same-keyed entry.
    ///
    /// Returns false, leaving the buffer untouched, when:
    /// - the key is empty or longer than 255 bytes,
    /// - the payload exceeds 65535 bytes,
    /// - the key is new and the entry does not fit the remaining capacity,
    /// - the key exists with a different type id or payload size.
    pub fn add<T: KvValue>(&mut self, key: &str, values: &[T]) -> bool {
        let data_len = values.len() * T::SIZE;
        self.upsert(key, T::TYPE_ID, data_len, |dst| {
            for (i, value) in values.iter().enumerate() {
                value.write_to(&mut dst[i * T::SIZE..]);
            }
        })
    }

    /// Add a single value under `key`.
    pub fn add_value<T: KvValue>(&mut self, key: &str, value: T) -> bool {
        self.add(key, core::slice::from_ref(&value))
    }

    /// Add `text` under `key` as a char run.
    ///
    /// The terminating NUL is stored and counted in the data length, so the
    /// maximum text length is 65534 bytes.
    pub fn add_str(&mut self, key: &str, text: &str) -> bool {
        self.upsert(key, type_id::CHAR, text.len() + 1, |dst| {
            dst[..text.len()].copy_from_slice(text.as_bytes());
            dst[text.len()] = 0;
        })
    }

    fn upsert(&mut self, key: &str, tid: u8, data_len: usize, write: impl FnOnce(&mut [u8])) -> bool {
        if key.is_empty() || key.len() > MAX_KEY_LEN || data_len > MAX_DATA_LEN {
            return false;
        }
        let existing = self
            .find(key)
            .map(|entry| (entry.type_id(), entry.data_len(), entry.value_offset()));
        match existing {
            Some((found_tid, found_len, offset)) => {
                if found_tid != tid || found_len != data_len {
                    return false;
                }
                write(&mut self.buf[offset..offset + data_len]);
                true
            }
            None => self.append(key, tid, data_len, write),
        }
    }

    fn append(&mut self, key: &str, tid: u8, data_len: usize, write: impl FnOnce(&mut [u8])) -> bool {
        let span = entry_span(key.len(), data_len);
        if span > self.buf.len() - self.used {
            return false;
        }
        let entry = &mut self.buf[self.used..self.used + span];
        entry[0] = key.len() as u8;
        entry[1] = tid;
        entry[2..HEADER_SIZE].copy_from_slice(&(data_len as u16).to_le_bytes());
        entry[HEADER_SIZE..HEADER_SIZE + key.len()].copy_from_slice(key.as_bytes());
        let value_start = HEADER_SIZE + next_word(key.len());
        entry[HEADER_SIZE + key.len()..value_start].fill(0);
        write(&mut entry[value_start..value_start + data_len]);
        entry[value_start + data_len..].fill(0);
        self.used += span;
        // terminator sentinel, if there is room for one
        if self.used < self.buf.len() {
            self.buf[self.used] = 0;
        }
        true
    }

    /// Drop all entries and zero the buffer.
    pub fn clear(&mut self) {
        self.used = 0;
        self.buf.fill(0);
    }

    /// Look up an entry by key.
    pub fn find(&self, key: &str) -> Option<Entry<'_>> {
        self.iter().find_key(key)
    }

    /// Walk the entries in insertion order.
    pub fn iter(&self) -> EntryIter<'_> {
        EntryIter::new(self.as_bytes())
    }

    /// The used prefix of the buffer. This is the shipped representation;
    /// its length is always a multiple of 4.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.used]
    }

    /// Bytes currently used.
    pub fn len(&self) -> usize {
        self.used
    }

    /// Returns true if no entries have been added.
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Total capacity of the underlying buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}
