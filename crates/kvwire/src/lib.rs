//! Typed key-value records over SLIP-framed serial links.
//!
//! kvwire packs named typed values into a self-describing, word-aligned
//! binary dictionary and moves it across unreliable byte-oriented links with
//! RFC 1055 SLIP framing and optional CRC trailers.
//!
//! # Crate Structure
//!
//! - [`types`] — Type identifiers, codecs, and the runtime type registry
//! - [`dict`] — Dictionary builder, entry views, and the host-side parser
//! - [`slip`] — SLIP encoder/decoder and CRC checksums

/// Re-export type identifier and codec types.
pub mod types {
    pub use kvwire_types::*;
}

/// Re-export dictionary types.
pub mod dict {
    pub use kvwire_dict::*;
}

/// Re-export SLIP framing types.
pub mod slip {
    pub use kvwire_slip::*;
}
