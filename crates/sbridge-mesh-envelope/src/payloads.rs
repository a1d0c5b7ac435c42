//! Canonical JSON payload bodies published by a sensor node.
//!
//! The three startup payloads (sensor config, battery config, attributes)
//! are idempotent: re-broadcasting them any number of times produces
//! byte-identical JSON given unchanged configuration.

use serde::{Deserialize, Serialize};

/// Downstream entity component kind (`type` key in config payloads).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Component {
    /// On/off entity with configurable payloads.
    BinarySensor = 1,
    /// Numeric measurement entity.
    Sensor = 2,
}

impl From<Component> for u8 {
    fn from(component: Component) -> Self {
        component as u8
    }
}

impl TryFrom<u8> for Component {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Component::BinarySensor),
            2 => Ok(Component::Sensor),
            _ => Err(format!("unknown component tag: {tag}")),
        }
    }
}

/// Device class advertised for a binary-sensor entity (`class` key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SensorClass {
    /// No specific class.
    None = 0,
    /// Battery level sensor.
    Battery = 1,
    /// Door contact.
    Door = 2,
    /// Garage door contact.
    GarageDoor = 3,
    /// Generic opening contact.
    Opening = 4,
    /// Window contact.
    Window = 5,
}

impl From<SensorClass> for u8 {
    fn from(class: SensorClass) -> Self {
        class as u8
    }
}

impl TryFrom<u8> for SensorClass {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(SensorClass::None),
            1 => Ok(SensorClass::Battery),
            2 => Ok(SensorClass::Door),
            3 => Ok(SensorClass::GarageDoor),
            4 => Ok(SensorClass::Opening),
            5 => Ok(SensorClass::Window),
            _ => Err(format!("unknown sensor class tag: {tag}")),
        }
    }
}

/// Discovery announcement for the window contact entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfigPayload {
    /// Human-readable entity name.
    pub name: String,
    /// Entity unit index on this node (the contact sensor is unit 1).
    pub unit: u8,
    /// Entity component kind.
    #[serde(rename = "type")]
    pub component: Component,
    /// Advertised device class.
    pub class: SensorClass,
    /// Label reported when the contact is open.
    pub payload_on: String,
    /// Label reported when the contact is closed.
    pub payload_off: String,
}

impl SensorConfigPayload {
    /// Build the canonical window-contact announcement.
    pub fn new(name: &str, class: SensorClass) -> Self {
        SensorConfigPayload {
            name: name.to_string(),
            unit: 1,
            component: Component::BinarySensor,
            class,
            payload_on: "OPEN".to_string(),
            payload_off: "CLOSED".to_string(),
        }
    }
}

/// Discovery announcement for the companion battery-level entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryConfigPayload {
    /// Human-readable entity name.
    pub name: String,
    /// Entity unit index on this node (the battery sensor is unit 2).
    pub unit: u8,
    /// Entity component kind.
    #[serde(rename = "type")]
    pub component: Component,
    /// Advertised device class.
    pub class: SensorClass,
    /// Label reported when the battery is no longer full.
    pub payload_on: String,
    /// Label reported when the battery is full.
    pub payload_off: String,
}

impl BatteryConfigPayload {
    /// Build the canonical battery-entity announcement.
    pub fn new(name: &str) -> Self {
        BatteryConfigPayload {
            name: name.to_string(),
            unit: 2,
            component: Component::BinarySensor,
            class: SensorClass::Battery,
            payload_on: "MID".to_string(),
            payload_off: "HIGH".to_string(),
        }
    }
}

/// Static node metadata broadcast at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributesPayload {
    /// Node model description.
    #[serde(rename = "Type")]
    pub device_model: String,
    /// Host microcontroller identifier.
    #[serde(rename = "MCU")]
    pub mcu: String,
    /// Node address on the mesh.
    #[serde(rename = "MAC")]
    pub address: String,
    /// Firmware version of this node.
    #[serde(rename = "Firmware")]
    pub firmware: String,
    /// Version of the underlying mesh transport library.
    #[serde(rename = "Library")]
    pub library: String,
}

/// State report published when the host MCU reports a position change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateReportPayload {
    /// `"OPEN"` or `"CLOSED"`.
    pub state: String,
    /// Most recently reported battery label, if any report has arrived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeviceType, Envelope, PacketType};

    #[test]
    fn test_sensor_config_json_keys() {
        let payload = SensorConfigPayload::new("Mesh window sensor", SensorClass::Window);
        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["name"], "Mesh window sensor");
        assert_eq!(json["unit"], 1);
        assert_eq!(json["type"], u8::from(Component::BinarySensor));
        assert_eq!(json["class"], u8::from(SensorClass::Window));
        assert_eq!(json["payload_on"], "OPEN");
        assert_eq!(json["payload_off"], "CLOSED");
    }

    #[test]
    fn test_battery_config_labels() {
        let payload = BatteryConfigPayload::new("Mesh window sensor battery");
        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["class"], u8::from(SensorClass::Battery));
        assert_eq!(json["payload_on"], "MID");
        assert_eq!(json["payload_off"], "HIGH");
    }

    #[test]
    fn test_state_report_omits_battery_until_reported() {
        let without = StateReportPayload {
            state: "OPEN".to_string(),
            battery: None,
        };
        assert_eq!(serde_json::to_string(&without).unwrap(), r#"{"state":"OPEN"}"#);

        let with = StateReportPayload {
            state: "CLOSED".to_string(),
            battery: Some("LOW".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&with).unwrap(),
            r#"{"state":"CLOSED","battery":"LOW"}"#
        );
    }

    #[test]
    fn test_startup_payloads_idempotent() {
        let payload = SensorConfigPayload::new("Mesh window sensor", SensorClass::Window);
        let first = Envelope::new(DeviceType::Sensor, PacketType::Config, &payload)
            .unwrap()
            .encode();
        let second = Envelope::new(DeviceType::Sensor, PacketType::Config, &payload)
            .unwrap()
            .encode();
        assert_eq!(first, second);
    }
}
