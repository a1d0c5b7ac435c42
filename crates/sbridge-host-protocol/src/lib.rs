//! Host MCU Serial Protocol
//!
//! This crate provides types and utilities for the fixed-offset binary
//! protocol spoken with the host microcontroller over the serial link.
//! The protocol uses length-delimited frames where each frame starts with
//! a `0x55 0xAA` marker pair and ends with a trailing checksum byte.
//!
//! # Protocol Overview
//!
//! Traffic in both directions uses the same frame shape:
//!
//! - **Commands** (host MCU → module): decoded into [`HostCommand`]
//! - **Replies** (module → host MCU): fixed, pre-defined byte sequences
//!   (see [`constants`])
//!
//! # Example
//!
//! ```rust,ignore
//! use sbridge_host_protocol::{FrameAssembler, HostCommand};
//!
//! let mut assembler = FrameAssembler::new();
//! for byte in received {
//!     if let Some(frame) = assembler.push_byte(byte)? {
//!         let command = HostCommand::decode(&frame)?;
//!     }
//! }
//! ```

mod commands;
mod constants;
mod error;
mod frame;

pub use commands::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
