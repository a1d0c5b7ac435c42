//! # sbridge-node
//!
//! The firmware-internal bridge between three asynchronous actors on a
//! sensor node: a host microcontroller on a serial link, a wireless
//! broadcast mesh publishing sensor/battery state, and local
//! configuration storage.
//!
//! The node runs a single cooperative loop with no preemptive threads:
//! all waiting is state retained across [`Node::poll`] iterations, never
//! a blocking call. The mesh radio stack, config file I/O, and the
//! access-point/web/OTA surface are external collaborators behind the
//! traits in [`traits`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sbridge_node::Node;
//!
//! let mut node = Node::new(serial, mesh, store, local);
//! node.start()?;
//! loop {
//!     if let Err(err) = node.poll() {
//!         log::warn!("{err}");
//!     }
//! }
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod node;
pub mod traits;

pub use config::DeviceConfig;
pub use coordinator::{PublishTracker, DEFAULT_CONFIRMATION_TIMEOUT};
pub use error::NodeError;
pub use node::{Mode, Node};
pub use traits::{ConfigStore, Confirmation, LocalServices, MeshAddress, MeshTransport, SerialLink};

/// Firmware version reported in the attributes broadcast.
pub const FIRMWARE_VERSION: &str = "1.0";
/// Node model string reported in the attributes broadcast.
pub const NODE_MODEL: &str = "Mesh window sensor";
/// Microcontroller identifier reported in the attributes broadcast.
pub const MCU_MODEL: &str = "ESP32";
