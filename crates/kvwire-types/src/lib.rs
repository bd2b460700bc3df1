//! Type identifiers and codecs for kvwire dictionary values.
//!
//! Every value stored in a dictionary entry carries an 8-bit type id. The
//! built-in scalar set (ids 1-12) is fixed and platform-invariant: all
//! integers are little-endian, floats are IEEE-754. Ids 100 and up are
//! reserved for application-defined types.
//!
//! Two codec paths are provided:
//! - [`KvValue`], a compile-time trait resolved statically, used by the typed
//!   builder and accessor APIs.
//! - [`TypeRegistry`], a runtime id-to-codec table used where the concrete
//!   type is only known from the wire (self-describing dumps, CLI decoding).

pub mod codec;
pub mod error;
pub mod registry;
pub mod type_id;

pub use codec::KvValue;
pub use error::{RegistryError, Result};
pub use registry::{TypeInfo, TypeRegistry, Value};
