//! Decoded commands received from the host MCU.

use crate::constants::*;
use crate::error::ProtocolError;

/// Battery level as reported by the host MCU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryLevel {
    /// Battery nearly exhausted.
    Low,
    /// Battery partially discharged.
    Mid,
    /// Battery full.
    High,
}

impl BatteryLevel {
    /// Decode from the wire value at [`OFFSET_REPORT_VALUE`].
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            BATTERY_VALUE_LOW => Some(BatteryLevel::Low),
            BATTERY_VALUE_MID => Some(BatteryLevel::Mid),
            BATTERY_VALUE_HIGH => Some(BatteryLevel::High),
            _ => None,
        }
    }

    /// The label published in mesh JSON payloads.
    pub fn label(&self) -> &'static str {
        match self {
            BatteryLevel::Low => "LOW",
            BatteryLevel::Mid => "MID",
            BatteryLevel::High => "HIGH",
        }
    }
}

/// Window position as reported by the host MCU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorState {
    /// The window is open.
    Open,
    /// The window is closed.
    Closed,
}

impl SensorState {
    /// Decode from the wire value at [`OFFSET_REPORT_VALUE`].
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            POSITION_VALUE_OPEN => Some(SensorState::Open),
            POSITION_VALUE_CLOSED => Some(SensorState::Closed),
            _ => None,
        }
    }

    /// The label published in mesh JSON payloads.
    pub fn label(&self) -> &'static str {
        match self {
            SensorState::Open => "OPEN",
            SensorState::Closed => "CLOSED",
        }
    }
}

/// Commands received from the host MCU, decoded from a completed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Host requests connectivity/system info.
    McuInfoRequest,

    /// Host acknowledges a previous reply. Consumed with no reply.
    Ack,

    /// Host requests the one-way switch to configuration mode.
    EnterSettingMode,

    /// Battery level report.
    BatteryReport {
        /// Decoded battery level.
        level: BatteryLevel,
    },

    /// Window position report.
    PositionReport {
        /// Decoded window state.
        state: SensorState,
    },
}

impl HostCommand {
    /// Get the command code for this command.
    pub fn code(&self) -> u8 {
        match self {
            HostCommand::McuInfoRequest => CMD_MCU_INFO,
            HostCommand::Ack => CMD_ACK,
            HostCommand::EnterSettingMode => CMD_ENTER_SETTING,
            HostCommand::BatteryReport { .. } => CMD_SENSOR_REPORT,
            HostCommand::PositionReport { .. } => CMD_SENSOR_REPORT,
        }
    }

    /// Decode a completed frame into a command.
    ///
    /// Commands outside the protocol's closed set decode to
    /// [`ProtocolError::UnknownCommand`]; the dispatcher is expected to
    /// ignore these rather than reply.
    pub fn decode(frame: &[u8]) -> Result<HostCommand, ProtocolError> {
        if frame.len() <= OFFSET_LENGTH {
            return Err(ProtocolError::FrameTooShort {
                expected: FRAME_HEADER_LEN,
                actual: frame.len(),
            });
        }

        match frame[OFFSET_COMMAND] {
            CMD_MCU_INFO => Ok(HostCommand::McuInfoRequest),
            CMD_ACK => Ok(HostCommand::Ack),
            CMD_ENTER_SETTING => Ok(HostCommand::EnterSettingMode),
            CMD_SENSOR_REPORT => Self::decode_report(frame),
            code => Err(ProtocolError::UnknownCommand(code)),
        }
    }

    fn decode_report(frame: &[u8]) -> Result<HostCommand, ProtocolError> {
        if frame.len() <= OFFSET_REPORT_VALUE {
            return Err(ProtocolError::FrameTooShort {
                expected: OFFSET_REPORT_VALUE + 1,
                actual: frame.len(),
            });
        }

        let subtype = frame[OFFSET_REPORT_SUBTYPE];
        let value = frame[OFFSET_REPORT_VALUE];
        match subtype {
            REPORT_SUBTYPE_BATTERY => BatteryLevel::from_wire(value)
                .map(|level| HostCommand::BatteryReport { level })
                .ok_or(ProtocolError::InvalidReportValue { subtype, value }),
            REPORT_SUBTYPE_POSITION => SensorState::from_wire(value)
                .map(|state| HostCommand::PositionReport { state })
                .ok_or(ProtocolError::InvalidReportValue { subtype, value }),
            _ => Err(ProtocolError::UnknownReportSubType(subtype)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a sensor-report frame with the value placed at offset 17,
    /// as the host MCU emits it (`L = 0x0B`, 18 bytes total).
    fn report_frame(subtype: u8, value: u8) -> Vec<u8> {
        let mut frame = vec![0u8; 18];
        frame[0] = FRAME_START;
        frame[1] = FRAME_MARKER;
        frame[OFFSET_COMMAND] = CMD_SENSOR_REPORT;
        frame[OFFSET_LENGTH] = 0x0B;
        frame[OFFSET_REPORT_SUBTYPE] = subtype;
        frame[OFFSET_REPORT_VALUE] = value;
        frame
    }

    #[test]
    fn test_decode_simple_commands() {
        let frame = [FRAME_START, FRAME_MARKER, 0x00, CMD_MCU_INFO, 0x00, 0x00, 0x00];
        assert_eq!(HostCommand::decode(&frame), Ok(HostCommand::McuInfoRequest));

        let frame = [FRAME_START, FRAME_MARKER, 0x00, CMD_ACK, 0x00, 0x00, 0x00];
        assert_eq!(HostCommand::decode(&frame), Ok(HostCommand::Ack));

        let frame = [FRAME_START, FRAME_MARKER, 0x00, CMD_ENTER_SETTING, 0x00, 0x00, 0x02];
        assert_eq!(HostCommand::decode(&frame), Ok(HostCommand::EnterSettingMode));
    }

    #[test]
    fn test_decode_battery_report() {
        let frame = report_frame(REPORT_SUBTYPE_BATTERY, BATTERY_VALUE_MID);
        assert_eq!(
            HostCommand::decode(&frame),
            Ok(HostCommand::BatteryReport {
                level: BatteryLevel::Mid
            })
        );
    }

    #[test]
    fn test_decode_position_report() {
        let open = report_frame(REPORT_SUBTYPE_POSITION, POSITION_VALUE_OPEN);
        assert_eq!(
            HostCommand::decode(&open),
            Ok(HostCommand::PositionReport {
                state: SensorState::Open
            })
        );

        let closed = report_frame(REPORT_SUBTYPE_POSITION, POSITION_VALUE_CLOSED);
        assert_eq!(
            HostCommand::decode(&closed),
            Ok(HostCommand::PositionReport {
                state: SensorState::Closed
            })
        );
    }

    #[test]
    fn test_unknown_command_code() {
        let frame = [FRAME_START, FRAME_MARKER, 0x00, 0x7F, 0x00, 0x00, 0x00];
        assert_eq!(
            HostCommand::decode(&frame),
            Err(ProtocolError::UnknownCommand(0x7F))
        );
    }

    #[test]
    fn test_unknown_report_subtype() {
        let frame = report_frame(0x09, 0x00);
        assert_eq!(
            HostCommand::decode(&frame),
            Err(ProtocolError::UnknownReportSubType(0x09))
        );
    }

    #[test]
    fn test_report_value_out_of_range() {
        let frame = report_frame(REPORT_SUBTYPE_POSITION, 0x07);
        assert_eq!(
            HostCommand::decode(&frame),
            Err(ProtocolError::InvalidReportValue {
                subtype: REPORT_SUBTYPE_POSITION,
                value: 0x07
            })
        );
    }

    #[test]
    fn test_short_report_frame() {
        let frame = [FRAME_START, FRAME_MARKER, 0x00, CMD_SENSOR_REPORT, 0x00, 0x01, 0x01, 0x00];
        assert!(matches!(
            HostCommand::decode(&frame),
            Err(ProtocolError::FrameTooShort { .. })
        ));
    }
}
