//! Interfaces of the external collaborators the node loop drives.
//!
//! The radio stack, config file I/O, and the access-point/web/OTA stack
//! are external to this core; they plug in through these traits. All
//! methods are non-blocking polls, matching the cooperative loop model.

use std::fmt;

use crate::config::DeviceConfig;
use crate::error::NodeError;

/// A node address on the mesh (hardware address of the radio).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeshAddress(pub [u8; 6]);

impl MeshAddress {
    /// Create a new address from bytes.
    pub fn new(bytes: [u8; 6]) -> Self {
        MeshAddress(bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Display for MeshAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// Asynchronous delivery notification from the mesh transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    /// Address the broadcast was confirmed (or reported failed) for.
    pub target: MeshAddress,
    /// Whether delivery actually succeeded at the radio layer.
    pub delivered: bool,
}

/// The serial link to the host MCU.
pub trait SerialLink {
    /// Non-blocking read of a single byte, `None` if nothing is pending.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write a complete frame to the host.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), NodeError>;

    /// Tear down the link. Called exactly once, on the configuration-mode
    /// transition; the link is never reopened in the same run.
    fn shutdown(&mut self);
}

/// The broadcast mesh transport (radio layer).
pub trait MeshTransport {
    /// Join the named mesh network.
    fn begin(&mut self, network_name: &str) -> Result<(), NodeError>;

    /// Queue an encoded envelope for broadcast.
    fn send_broadcast(&mut self, envelope: &[u8]) -> Result<(), NodeError>;

    /// Drive the transport (radio retries, queue draining). Returns a
    /// delivery confirmation when one became available during this tick;
    /// this is the only place asynchronous completion re-enters the core.
    fn maintenance(&mut self) -> Option<Confirmation>;

    /// This node's address on the mesh.
    fn local_address(&self) -> MeshAddress;

    /// Version string of the transport library.
    fn transport_version(&self) -> String;
}

/// Persistent configuration storage.
pub trait ConfigStore {
    /// Load the stored configuration. Implementations are expected to
    /// fall back to (and persist) defaults when no record exists yet.
    fn load(&mut self) -> Result<DeviceConfig, NodeError>;

    /// Persist the configuration.
    fn save(&mut self, config: &DeviceConfig) -> Result<(), NodeError>;
}

/// The local configuration surface: access point, web configuration UI,
/// and the firmware-update listener.
pub trait LocalServices {
    /// One-way transition into configuration mode. The node never returns
    /// to serial operation in the same run.
    fn enter_configuration_mode(&mut self) -> Result<(), NodeError>;

    /// Maintenance tick for the firmware-update listener. No-op until
    /// configuration mode has been entered.
    fn maintenance(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_address_display() {
        let addr = MeshAddress::new([0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x42]);
        assert_eq!(addr.to_string(), "DE:AD:BE:EF:00:42");
    }
}
