/// Errors raised by the runtime type registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No codec registered for this type id.
    #[error("unknown type id {0}")]
    UnknownType(u8),

    /// A registration conflicts with the element size already on record.
    #[error("type id {id} already registered with element size {registered}, requested {requested}")]
    SizeConflict {
        id: u8,
        registered: usize,
        requested: usize,
    },

    /// The source slice is shorter than one element.
    #[error("type id {id} needs {needed} bytes per element, got {got}")]
    ShortBuffer { id: u8, needed: usize, got: usize },

    /// The value variant does not match the registered type.
    #[error("value does not match type id {id} ({name})")]
    ValueMismatch { id: u8, name: &'static str },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
