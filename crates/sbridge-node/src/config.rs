//! Persisted device configuration.

use sbridge_mesh_envelope::SensorClass;
use serde::{Deserialize, Serialize};

/// Configuration persisted by the external config store.
///
/// Serialized as JSON; unknown fields are ignored and missing fields fall
/// back to defaults so old config files keep loading after upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceConfig {
    /// Mesh network name joined at startup.
    pub mesh_net_name: String,
    /// Human-readable name of the window contact entity.
    pub sensor_name: String,
    /// Human-readable name of the battery-level entity.
    pub battery_name: String,
    /// Device class advertised for the contact entity.
    pub sensor_class: SensorClass,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            mesh_net_name: "DEFAULT".to_string(),
            sensor_name: "Mesh window sensor".to_string(),
            battery_name: "Mesh window sensor battery".to_string(),
            sensor_class: SensorClass::Window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip() {
        let config = DeviceConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let loaded: DeviceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let loaded: DeviceConfig =
            serde_json::from_str(r#"{"meshNetName":"HOME","sensorClass":2}"#).unwrap();
        assert_eq!(loaded.mesh_net_name, "HOME");
        assert_eq!(loaded.sensor_class, SensorClass::Door);
        assert_eq!(loaded.sensor_name, DeviceConfig::default().sensor_name);
    }
}
