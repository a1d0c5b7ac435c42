//! Node error types.

use sbridge_host_protocol::ProtocolError;
use sbridge_mesh_envelope::EnvelopeError;
use thiserror::Error;

/// Errors surfaced by the node loop and its collaborators.
///
/// None of these is fatal to the loop: framing errors resynchronize the
/// assembler, envelope overflows skip the publish, and a confirmation
/// timeout only clears the pending publish.
#[derive(Error, Debug)]
pub enum NodeError {
    /// Serial framing or command decoding error.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Envelope encoding error.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// Serial link I/O failure.
    #[error("serial link error: {0}")]
    Serial(String),

    /// Mesh transport failure.
    #[error("mesh transport error: {0}")]
    Transport(String),

    /// Configuration storage failure.
    #[error("config storage error: {0}")]
    ConfigStorage(String),

    /// Local configuration services failed to start.
    #[error("configuration mode error: {0}")]
    ConfigurationMode(String),

    /// No mesh delivery confirmation arrived for a pending publish.
    /// The host receives no acknowledgment for this publish.
    #[error("no delivery confirmation within {timeout_ms} ms")]
    ConfirmationTimeout {
        /// The timeout that expired, in milliseconds.
        timeout_ms: u64,
    },
}
