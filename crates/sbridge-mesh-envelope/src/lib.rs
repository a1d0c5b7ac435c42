//! Mesh Envelope Codec
//!
//! This crate builds and parses the fixed-size binary envelope exchanged
//! over the broadcast mesh. An envelope carries two leading binary routing
//! fields (device type and packet type) followed by a fixed-capacity
//! buffer holding a UTF-8 JSON payload:
//!
//! ```text
//! +------------+------------+--------------------------------+
//! | deviceType | packetType | message[0..200] (JSON, 0-pad)  |
//! +------------+------------+--------------------------------+
//! ```
//!
//! The routing fields are read by multiple distinct message classes on
//! the receiving side; the JSON body is only parsed once the envelope
//! has been routed.

mod envelope;
mod error;
mod payloads;

pub use envelope::*;
pub use error::*;
pub use payloads::*;
