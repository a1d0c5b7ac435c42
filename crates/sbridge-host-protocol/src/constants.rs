//! Protocol constants
//!
//! These constants define the frame layout, command codes, and fixed reply
//! frames used on the serial link to the host MCU.

// ============================================================================
// Frame Layout
// ============================================================================

/// Start-of-frame marker, first byte of every frame.
pub const FRAME_START: u8 = 0x55;
/// Second fixed marker byte, present in all observed frames.
pub const FRAME_MARKER: u8 = 0xAA;
/// Byte offset of the command code within a frame.
pub const OFFSET_COMMAND: usize = 3;
/// Byte offset of the length-extension field within a frame.
pub const OFFSET_LENGTH: usize = 5;
/// Byte offset of the sub-type within a sensor-report frame.
pub const OFFSET_REPORT_SUBTYPE: usize = 7;
/// Byte offset of the reported value within a sensor-report frame.
pub const OFFSET_REPORT_VALUE: usize = 17;
/// Header length covered by the declared frame length (`6 + L`).
pub const FRAME_HEADER_LEN: usize = 6;
/// Maximum frame size, including the trailing checksum byte.
pub const MAX_FRAME_SIZE: usize = 128;

// ============================================================================
// Command Codes (host MCU → module)
// ============================================================================

/// Host requests connectivity/system info.
pub const CMD_MCU_INFO: u8 = 0x01;
/// Host acknowledges a previous reply.
pub const CMD_ACK: u8 = 0x02;
/// Host requests the switch to configuration mode.
pub const CMD_ENTER_SETTING: u8 = 0x03;
/// Host reports a sensor reading (dispatched further on sub-type).
pub const CMD_SENSOR_REPORT: u8 = 0x08;

// ============================================================================
// Sensor Report Sub-types (frame offset 7)
// ============================================================================

/// Battery level report.
pub const REPORT_SUBTYPE_BATTERY: u8 = 0x01;
/// Window position report.
pub const REPORT_SUBTYPE_POSITION: u8 = 0x02;

// ============================================================================
// Report Values (frame offset 17)
// ============================================================================

/// Battery level: low.
pub const BATTERY_VALUE_LOW: u8 = 0x00;
/// Battery level: mid.
pub const BATTERY_VALUE_MID: u8 = 0x01;
/// Battery level: high.
pub const BATTERY_VALUE_HIGH: u8 = 0x02;

/// Window position: closed.
pub const POSITION_VALUE_CLOSED: u8 = 0x00;
/// Window position: open.
pub const POSITION_VALUE_OPEN: u8 = 0x01;

// ============================================================================
// Fixed Reply Frames (module → host MCU, sent verbatim)
// ============================================================================

/// Startup announcement, written once after boot.
pub const INITIAL_MESSAGE: [u8; 7] = [0x55, 0xAA, 0x00, 0x01, 0x00, 0x00, 0x00];
/// Reply to [`CMD_MCU_INFO`].
pub const CONNECTED_MESSAGE: [u8; 8] = [0x55, 0xAA, 0x00, 0x02, 0x00, 0x01, 0x04, 0x06];
/// Reply to [`CMD_ENTER_SETTING`], sent just before the serial link is shut down.
pub const SETTING_MESSAGE: [u8; 7] = [0x55, 0xAA, 0x00, 0x03, 0x00, 0x00, 0x02];
/// Acknowledgment for sensor reports. Sent immediately for battery reports,
/// and after mesh delivery confirmation for position reports.
pub const CONFIRMATION_MESSAGE: [u8; 8] = [0x55, 0xAA, 0x00, 0x08, 0x00, 0x01, 0x00, 0x08];
