use std::collections::BTreeMap;

use crate::codec::KvValue;
use crate::error::{RegistryError, Result};
use crate::type_id;

/// A dynamically-typed decoded element.
///
/// Produced by [`TypeRegistry::decode_value`] when the concrete Rust type is
/// only known from the wire. Serializes as the bare inner value, so decoded
/// dictionaries render as plain JSON.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Char(u8),
    /// Opaque payload of an application-defined type.
    Bytes(Vec<u8>),
}

/// Codec record for one type id.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    /// The wire type id.
    pub id: u8,
    /// Display name.
    pub name: &'static str,
    /// Size of one encoded element in bytes.
    pub size: usize,
    /// Decode one element from the first `size` bytes.
    pub decode: fn(&[u8]) -> Value,
    /// Encode a matching [`Value`] into the first `size` bytes.
    /// Returns false when the variant does not match the type.
    pub encode: fn(&Value, &mut [u8]) -> bool,
}

impl std::fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("size", &self.size)
            .finish()
    }
}

macro_rules! builtin_info {
    ($ty:ty, $id:expr, $name:expr, $variant:ident) => {
        TypeInfo {
            id: $id,
            name: $name,
            size: core::mem::size_of::<$ty>(),
            decode: |src| Value::$variant(<$ty as KvValue>::read_from(src)),
            encode: |value, dst| match value {
                Value::$variant(v) => {
                    v.write_to(dst);
                    true
                }
                _ => false,
            },
        }
    };
}

const BUILTINS: [TypeInfo; 12] = [
    builtin_info!(i8, type_id::I8, "i8", I8),
    builtin_info!(u8, type_id::U8, "u8", U8),
    builtin_info!(i16, type_id::I16, "i16", I16),
    builtin_info!(u16, type_id::U16, "u16", U16),
    builtin_info!(i32, type_id::I32, "i32", I32),
    builtin_info!(u32, type_id::U32, "u32", U32),
    builtin_info!(i64, type_id::I64, "i64", I64),
    builtin_info!(u64, type_id::U64, "u64", U64),
    builtin_info!(f32, type_id::F32, "f32", F32),
    builtin_info!(f64, type_id::F64, "f64", F64),
    builtin_info!(bool, type_id::BOOL, "bool", Bool),
    TypeInfo {
        id: type_id::CHAR,
        name: "char",
        size: 1,
        decode: |src| Value::Char(src[0]),
        encode: |value, dst| match value {
            Value::Char(c) => {
                dst[0] = *c;
                true
            }
            _ => false,
        },
    },
];

/// Runtime table mapping type ids to element sizes and codecs.
///
/// Seeded with the 12 built-in scalars. Application types register at
/// initialization; after that the registry is read-only and may be shared
/// across threads by reference.
pub struct TypeRegistry {
    entries: BTreeMap<u8, TypeInfo>,
}

impl TypeRegistry {
    /// A registry holding exactly the built-in scalar set.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        for info in BUILTINS {
            entries.insert(info.id, info);
        }
        Self { entries }
    }

    /// Register an application type.
    ///
    /// Re-registering an id with the same element size is a no-op;
    /// a different size is a configuration error.
    pub fn register(&mut self, info: TypeInfo) -> Result<()> {
        match self.entries.get(&info.id) {
            Some(existing) if existing.size == info.size => Ok(()),
            Some(existing) => Err(RegistryError::SizeConflict {
                id: info.id,
                registered: existing.size,
                requested: info.size,
            }),
            None => {
                self.entries.insert(info.id, info);
                Ok(())
            }
        }
    }

    /// Look up the full codec record for a type id.
    pub fn info(&self, id: u8) -> Option<&TypeInfo> {
        self.entries.get(&id)
    }

    /// Returns true if a codec is registered for this type id.
    pub fn contains(&self, id: u8) -> bool {
        self.entries.contains_key(&id)
    }

    /// Bytes occupied by one element of this type.
    pub fn element_size(&self, id: u8) -> Result<usize> {
        self.info(id)
            .map(|info| info.size)
            .ok_or(RegistryError::UnknownType(id))
    }

    /// Decode one element from the front of `src`.
    pub fn decode_value(&self, id: u8, src: &[u8]) -> Result<Value> {
        let info = self.info(id).ok_or(RegistryError::UnknownType(id))?;
        if src.len() < info.size {
            return Err(RegistryError::ShortBuffer {
                id,
                needed: info.size,
                got: src.len(),
            });
        }
        Ok((info.decode)(&src[..info.size]))
    }

    /// Encode a [`Value`] into the front of `dst`.
    pub fn encode_value(&self, id: u8, value: &Value, dst: &mut [u8]) -> Result<()> {
        let info = self.info(id).ok_or(RegistryError::UnknownType(id))?;
        if dst.len() < info.size {
            return Err(RegistryError::ShortBuffer {
                id,
                needed: info.size,
                got: dst.len(),
            });
        }
        if (info.encode)(value, &mut dst[..info.size]) {
            Ok(())
        } else {
            Err(RegistryError::ValueMismatch {
                id,
                name: info.name,
            })
        }
    }

    /// Registered type ids in ascending order.
    pub fn type_ids(&self) -> Vec<u8> {
        self.entries.keys().copied().collect()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
