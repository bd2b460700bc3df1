//! Word-aligned binary key-value dictionary over caller-owned buffers.
//!
//! A dictionary is a flat run of entries inside a byte buffer the caller
//! provides. Every entry starts with a 4-byte header followed by the key and
//! the value payload, each padded to the next 4-byte boundary:
//!
//! ```text
//! ┌─────────┬─────────┬───────────────────┐
//! │ key len │ type id │    data length    │
//! │  (1B)   │  (1B)   │      (2B LE)      │
//! ├─────────┴─────────┴───────────────────┤
//! │ key bytes, 1-4 NUL bytes of padding   │
//! ├───────────────────────────────────────┤
//! │ value bytes, 0-3 NUL bytes of padding │
//! └───────────────────────────────────────┘
//! ```
//!
//! There is always at least one NUL after the key, so the key reads as a
//! C string in place. A zero first byte past the used prefix terminates
//! iteration.
//!
//! [`DictBuilder`] writes entries (device side, zero allocation),
//! [`EntryIter`] walks a buffer yielding zero-copy [`Entry`] views, and
//! [`DictParser`] indexes a finalized buffer for random access by key
//! (host side).

pub mod builder;
pub mod dump;
pub mod error;
pub mod iter;
pub mod layout;
pub mod parser;

pub use builder::DictBuilder;
pub use error::{AccessError, Result};
pub use iter::{Entry, EntryIter};
pub use parser::DictParser;
