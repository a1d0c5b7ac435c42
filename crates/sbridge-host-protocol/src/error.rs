//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when working with the host serial protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame is too short for the command it carries.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Declared frame length exceeds the assembly buffer.
    #[error("frame too large: maximum {max} bytes, declared {declared}")]
    FrameTooLarge {
        /// Maximum allowed length.
        max: usize,
        /// Length declared by the frame's length-extension field.
        declared: usize,
    },

    /// Unknown command code.
    #[error("unknown command code: 0x{0:02X}")]
    UnknownCommand(u8),

    /// Unknown sensor-report sub-type.
    #[error("unknown report sub-type: 0x{0:02X}")]
    UnknownReportSubType(u8),

    /// Report value outside the defined set for its sub-type.
    #[error("invalid report value 0x{value:02X} for sub-type 0x{subtype:02X}")]
    InvalidReportValue {
        /// The sub-type the value was reported under.
        subtype: u8,
        /// The out-of-range value.
        value: u8,
    },
}
