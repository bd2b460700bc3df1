use std::collections::BTreeMap;

use crate::error::{AccessError, Result};
use crate::iter::{Entry, EntryIter};

/// Host-side index over a finalized dictionary buffer.
///
/// Walks the buffer once and keeps an ordered key map; the payload itself is
/// borrowed, never copied. Keys iterate in lexicographic byte order, which
/// differs from the on-wire insertion order.
///
/// Duplicate keys cannot be produced by the builder; if a foreign buffer
/// carries them anyway, the first occurrence wins.
#[derive(Debug)]
pub struct DictParser<'a> {
    entries: BTreeMap<&'a str, Entry<'a>>,
}

impl<'a> DictParser<'a> {
    /// Index `buf`, the used prefix of a built dictionary.
    pub fn new(buf: &'a [u8]) -> Self {
        let mut entries = BTreeMap::new();
        for entry in EntryIter::new(buf) {
            entries.entry(entry.key()).or_insert(entry);
        }
        Self { entries }
    }

    /// Returns true if the dictionary holds an entry with this key.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the entry with this key.
    pub fn get(&self, key: &str) -> Result<Entry<'a>> {
        self.entries
            .get(key)
            .copied()
            .ok_or_else(|| AccessError::KeyNotFound(key.to_owned()))
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<'a>> {
        self.entries.values()
    }

    /// Keys in lexicographic byte order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.keys().copied()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the buffer held no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DictBuilder;

    #[test]
    fn indexes_and_sorts_keys() {
        let mut buf = [0u8; 512];
        let mut dict = DictBuilder::new(&mut buf);
        assert!(dict.add_value("π", core::f64::consts::PI));
        assert!(dict.add_str("message", "The EAGLE has landed"));
        assert!(dict.add_value("success", true));
        assert!(dict.add("integers", &[10i32, 20, 30, 40]));

        let parsed = DictParser::new(dict.as_bytes());
        assert_eq!(parsed.len(), 4);
        let keys: Vec<&str> = parsed.keys().collect();
        assert_eq!(keys, ["integers", "message", "success", "π"]);
    }

    #[test]
    fn get_returns_typed_views() {
        let mut buf = [0u8; 256];
        let mut dict = DictBuilder::new(&mut buf);
        assert!(dict.add_value("value1", 0xDEADBEEFu32));
        assert!(dict.add_str("key", "value"));

        let parsed = DictParser::new(dict.as_bytes());
        assert!(parsed.contains("value1"));
        assert!(!parsed.contains("value4"));
        assert_eq!(parsed.get("value1").unwrap().get_value::<u32>(), Ok(0xDEADBEEF));
        assert_eq!(parsed.get("key").unwrap().get_str(), Ok("value"));
    }

    #[test]
    fn missing_key_is_reported() {
        let parsed = DictParser::new(&[]);
        assert!(parsed.is_empty());
        assert_eq!(
            parsed.get("ω").unwrap_err(),
            AccessError::KeyNotFound("ω".to_owned())
        );
    }

    #[test]
    fn duplicate_keys_keep_first_occurrence() {
        // hand-built buffer with "k" twice: u8 1 then u8 2
        let buf = [
            0x01, 0x02, 0x01, 0x00, //
            b'k', 0x00, 0x00, 0x00, //
            0x01, 0x00, 0x00, 0x00, //
            0x01, 0x02, 0x01, 0x00, //
            b'k', 0x00, 0x00, 0x00, //
            0x02, 0x00, 0x00, 0x00, //
        ];
        let parsed = DictParser::new(&buf);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("k").unwrap().get_value::<u8>(), Ok(1));
    }
}
