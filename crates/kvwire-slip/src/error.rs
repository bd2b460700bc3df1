/// Errors from the blocking stream adapters.
///
/// The push decoder itself never fails; malformed input is surfaced through
/// its truncation and violation flags instead.
#[derive(Debug, thiserror::Error)]
pub enum SlipError {
    /// An I/O error occurred on the underlying stream.
    #[error("slip I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended in the middle of a packet.
    #[error("stream closed mid-packet")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, SlipError>;
