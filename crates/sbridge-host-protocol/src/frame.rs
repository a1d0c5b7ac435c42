//! Frame assembly for the host serial link.
//!
//! The host protocol uses length-delimited frames with an interleaved
//! length field: byte 5 both belongs to the frame and declares how long
//! the frame is.
//!
//! ```text
//! +------+------+------+------+------+------+----------------+------+
//! | 0x55 | 0xAA | rsvd | cmd  | rsvd |  L   | data[0..L]     | sum  |
//! +------+------+------+------+------+------+----------------+------+
//! ```
//!
//! The declared frame length is `6 + L`; a completed frame occupies
//! `6 + L + 1` bytes including the trailing checksum byte. The checksum
//! is a mod-256 sum of the preceding bytes; the host MCU does not
//! validate it on inbound frames and neither does this assembler.

use bytes::{BufMut, BytesMut};

use crate::constants::*;
use crate::error::ProtocolError;

/// Mod-256 sum checksum over a frame body (all bytes before the trailer).
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblerState {
    /// Waiting for a start marker; all other bytes are discarded.
    Idle,
    /// Collecting bytes into the current frame.
    Assembling,
}

/// Assembles a raw serial byte stream into discrete frames.
///
/// Bytes are pushed one at a time with [`push_byte`](Self::push_byte);
/// the caller must stop pushing while an emitted frame is pending
/// dispatch (only one frame is ever in flight).
///
/// A `0x55` byte is only treated as a start marker while `Idle`; during
/// assembly it is ordinary payload, since the length field is
/// authoritative. Desynchronized input recovers at the next frame
/// boundary because inter-frame garbage is discarded in `Idle`.
#[derive(Debug)]
pub struct FrameAssembler {
    state: AssemblerState,
    buffer: BytesMut,
    /// Declared frame length (`6 + L`), known once byte 5 has arrived.
    frame_len: Option<usize>,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAssembler {
    /// Create a new frame assembler.
    pub fn new() -> Self {
        FrameAssembler {
            state: AssemblerState::Idle,
            buffer: BytesMut::with_capacity(MAX_FRAME_SIZE),
            frame_len: None,
        }
    }

    /// Consume one byte from the serial stream.
    ///
    /// Returns `Ok(Some(frame))` when the byte completes a frame,
    /// `Ok(None)` if more bytes are needed. An oversized declared length
    /// fails with [`ProtocolError::FrameTooLarge`] and resets the
    /// assembler to `Idle`; the error is recoverable.
    pub fn push_byte(&mut self, byte: u8) -> Result<Option<Vec<u8>>, ProtocolError> {
        match self.state {
            AssemblerState::Idle => {
                if byte == FRAME_START {
                    self.buffer.clear();
                    self.buffer.put_u8(byte);
                    self.frame_len = None;
                    self.state = AssemblerState::Assembling;
                }
                // Inter-frame garbage is discarded.
                Ok(None)
            }
            AssemblerState::Assembling => {
                let position = self.buffer.len();
                self.buffer.put_u8(byte);

                if position == OFFSET_LENGTH {
                    let declared = FRAME_HEADER_LEN + byte as usize;
                    if declared + 1 > MAX_FRAME_SIZE {
                        self.reset();
                        return Err(ProtocolError::FrameTooLarge {
                            max: MAX_FRAME_SIZE,
                            declared: declared + 1,
                        });
                    }
                    self.frame_len = Some(declared);
                }

                if self.frame_len == Some(position) {
                    let frame = self.buffer.split().to_vec();
                    self.reset();
                    return Ok(Some(frame));
                }

                Ok(None)
            }
        }
    }

    /// Whether a frame is currently being assembled.
    pub fn is_assembling(&self) -> bool {
        self.state == AssemblerState::Assembling
    }

    /// Discard any partial frame and return to `Idle`.
    pub fn reset(&mut self) {
        self.state = AssemblerState::Idle;
        self.buffer.clear();
        self.frame_len = None;
    }
}
