/// Errors raised by entry accessors and the host-side parser.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccessError {
    /// The entry holds a different type than requested.
    #[error("entry has type id {actual}, requested {requested}")]
    TypeMismatch { requested: u8, actual: u8 },

    /// Element index past the end of the value payload.
    #[error("index {index} out of range for {count} elements")]
    IndexOutOfRange { index: usize, count: usize },

    /// Fixed-size read does not match the stored element count.
    #[error("requested {requested} elements, entry holds {count}")]
    LengthMismatch { requested: usize, count: usize },

    /// No entry with this key.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),

    /// A char run does not decode as UTF-8 text.
    #[error("string value is not valid UTF-8")]
    InvalidUtf8,
}

pub type Result<T> = std::result::Result<T, AccessError>;
