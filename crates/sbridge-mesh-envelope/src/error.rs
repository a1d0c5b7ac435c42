//! Envelope error types.

use thiserror::Error;

/// Errors that can occur when encoding or decoding mesh envelopes.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// Serialized JSON payload does not fit the fixed message buffer.
    /// Truncation is a protocol violation; the publish must be skipped.
    #[error("envelope payload too large: capacity {capacity} bytes, encoded {actual}")]
    PayloadTooLarge {
        /// Fixed message buffer capacity.
        capacity: usize,
        /// Encoded payload size.
        actual: usize,
    },

    /// Envelope bytes are shorter than the fixed envelope size.
    #[error("envelope too short: expected {expected} bytes, got {actual}")]
    EnvelopeTooShort {
        /// Expected envelope size.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Unknown device type tag.
    #[error("unknown device type: 0x{0:02X}")]
    UnknownDeviceType(u8),

    /// Unknown packet type tag.
    #[error("unknown packet type: 0x{0:02X}")]
    UnknownPacketType(u8),

    /// Message buffer does not hold valid UTF-8 JSON.
    #[error("invalid payload JSON: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Message buffer is not valid UTF-8.
    #[error("invalid UTF-8 in message buffer")]
    InvalidUtf8,
}
