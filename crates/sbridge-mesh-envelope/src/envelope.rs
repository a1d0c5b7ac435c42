//! Envelope encoding and decoding.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::EnvelopeError;

/// Capacity of the fixed JSON message buffer.
pub const MESSAGE_CAPACITY: usize = 200;
/// Serialized envelope size: two routing bytes plus the message buffer.
pub const ENVELOPE_SIZE: usize = 2 + MESSAGE_CAPACITY;

/// Device type tag identifying the kind of node that sent an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DeviceType {
    /// Mesh-to-LAN gateway node.
    Gateway = 1,
    /// Switch/relay node.
    Switch = 2,
    /// LED controller node.
    Led = 3,
    /// Sensor node (this firmware).
    Sensor = 4,
}

impl DeviceType {
    /// Decode from the wire tag.
    pub fn from_wire(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(DeviceType::Gateway),
            2 => Some(DeviceType::Switch),
            3 => Some(DeviceType::Led),
            4 => Some(DeviceType::Sensor),
            _ => None,
        }
    }
}

/// Packet type tag used to route an envelope on the receiving side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketType {
    /// Entity discovery/configuration announcement.
    Config = 1,
    /// Sensor state report.
    State = 2,
    /// Static node metadata.
    Attributes = 3,
}

impl PacketType {
    /// Decode from the wire tag.
    pub fn from_wire(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(PacketType::Config),
            2 => Some(PacketType::State),
            3 => Some(PacketType::Attributes),
            _ => None,
        }
    }
}

/// A fixed-size binary record broadcast over the mesh.
///
/// The JSON body is capacity-checked at construction time; an envelope
/// that exists always fits the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Kind of node that produced the envelope.
    pub device_type: DeviceType,
    /// Routing tag for the receiving side.
    pub packet_type: PacketType,
    message: Vec<u8>,
}

impl Envelope {
    /// Build an envelope from a serializable payload.
    ///
    /// Fails with [`EnvelopeError::PayloadTooLarge`] if the encoded JSON
    /// exceeds [`MESSAGE_CAPACITY`]; the payload is never truncated.
    pub fn new<T: Serialize>(
        device_type: DeviceType,
        packet_type: PacketType,
        payload: &T,
    ) -> Result<Self, EnvelopeError> {
        let message = serde_json::to_vec(payload)?;
        if message.len() > MESSAGE_CAPACITY {
            return Err(EnvelopeError::PayloadTooLarge {
                capacity: MESSAGE_CAPACITY,
                actual: message.len(),
            });
        }
        Ok(Envelope {
            device_type,
            packet_type,
            message,
        })
    }

    /// Serialize to the fixed wire format. The JSON body is zero-padded
    /// to [`MESSAGE_CAPACITY`].
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(ENVELOPE_SIZE);
        buf.push(self.device_type as u8);
        buf.push(self.packet_type as u8);
        buf.extend_from_slice(&self.message);
        buf.resize(ENVELOPE_SIZE, 0);
        buf
    }

    /// Parse an envelope received from the mesh.
    pub fn decode(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        if bytes.len() < ENVELOPE_SIZE {
            return Err(EnvelopeError::EnvelopeTooShort {
                expected: ENVELOPE_SIZE,
                actual: bytes.len(),
            });
        }
        let device_type =
            DeviceType::from_wire(bytes[0]).ok_or(EnvelopeError::UnknownDeviceType(bytes[0]))?;
        let packet_type =
            PacketType::from_wire(bytes[1]).ok_or(EnvelopeError::UnknownPacketType(bytes[1]))?;

        // The message buffer is zero-padded; the JSON body ends at the
        // first NUL byte.
        let body = &bytes[2..ENVELOPE_SIZE];
        let end = body.iter().position(|&b| b == 0).unwrap_or(body.len());
        Ok(Envelope {
            device_type,
            packet_type,
            message: body[..end].to_vec(),
        })
    }

    /// The JSON body as text.
    pub fn json(&self) -> Result<&str, EnvelopeError> {
        std::str::from_utf8(&self.message).map_err(|_| EnvelopeError::InvalidUtf8)
    }

    /// Deserialize the JSON body into a payload type.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, EnvelopeError> {
        Ok(serde_json::from_slice(&self.message)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Probe {
        state: String,
    }

    #[test]
    fn test_encode_shape() {
        let payload = Probe {
            state: "OPEN".to_string(),
        };
        let envelope = Envelope::new(DeviceType::Sensor, PacketType::State, &payload).unwrap();
        let bytes = envelope.encode();

        assert_eq!(bytes.len(), ENVELOPE_SIZE);
        assert_eq!(bytes[0], DeviceType::Sensor as u8);
        assert_eq!(bytes[1], PacketType::State as u8);
        // Unused buffer tail is zero-padded.
        assert_eq!(bytes[ENVELOPE_SIZE - 1], 0);
    }

    #[test]
    fn test_decode_routes_and_parses() {
        let payload = Probe {
            state: "CLOSED".to_string(),
        };
        let envelope = Envelope::new(DeviceType::Sensor, PacketType::State, &payload).unwrap();
        let decoded = Envelope::decode(&envelope.encode()).unwrap();

        assert_eq!(decoded.device_type, DeviceType::Sensor);
        assert_eq!(decoded.packet_type, PacketType::State);
        assert_eq!(decoded.payload::<Probe>().unwrap(), payload);
    }

    #[test]
    fn test_payload_too_large_is_rejected() {
        let payload = Probe {
            state: "x".repeat(MESSAGE_CAPACITY),
        };
        let err = Envelope::new(DeviceType::Sensor, PacketType::State, &payload).unwrap_err();
        assert!(matches!(err, EnvelopeError::PayloadTooLarge { .. }));
    }

    #[test]
    fn test_unknown_tags_rejected() {
        let mut bytes = vec![0u8; ENVELOPE_SIZE];
        bytes[0] = 0xEE;
        bytes[1] = PacketType::State as u8;
        assert!(matches!(
            Envelope::decode(&bytes),
            Err(EnvelopeError::UnknownDeviceType(0xEE))
        ));

        bytes[0] = DeviceType::Sensor as u8;
        bytes[1] = 0xEE;
        assert!(matches!(
            Envelope::decode(&bytes),
            Err(EnvelopeError::UnknownPacketType(0xEE))
        ));
    }
}
