//! The cooperative node loop.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use sbridge_host_protocol::{
    BatteryLevel, FrameAssembler, HostCommand, SensorState, CONFIRMATION_MESSAGE,
    CONNECTED_MESSAGE, INITIAL_MESSAGE, SETTING_MESSAGE,
};
use sbridge_mesh_envelope::{
    AttributesPayload, BatteryConfigPayload, DeviceType, Envelope, PacketType,
    SensorConfigPayload, StateReportPayload,
};

use crate::config::DeviceConfig;
use crate::coordinator::{PublishTracker, DEFAULT_CONFIRMATION_TIMEOUT};
use crate::error::NodeError;
use crate::traits::{ConfigStore, LocalServices, MeshTransport, SerialLink};
use crate::{FIRMWARE_VERSION, MCU_MODEL, NODE_MODEL};

/// Operating mode. The transition to `Configuration` is one-way and
/// terminal for serial communication in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal operation: bridging the host MCU to the mesh.
    Serial,
    /// Local access-point + web configuration + firmware-update mode.
    Configuration,
}

/// The sensor node: owns all mutable protocol state and drives the
/// collaborators from a single cooperative loop.
///
/// One [`poll`](Self::poll) iteration performs at most: consumption of
/// one serial byte (only while no frame is pending dispatch), dispatch of
/// one completed frame, a mesh transport maintenance tick, and a local
/// services maintenance tick.
pub struct Node<S, M, C, L> {
    serial: S,
    mesh: M,
    store: C,
    local: L,
    config: DeviceConfig,
    mode: Mode,
    assembler: FrameAssembler,
    /// At most one completed frame is in flight at a time; byte
    /// consumption is suspended while it awaits dispatch.
    pending_frame: Option<Vec<u8>>,
    tracker: PublishTracker,
    /// Battery label from the most recent battery report, republished
    /// with every state report.
    battery: Option<BatteryLevel>,
}

impl<S, M, C, L> Node<S, M, C, L>
where
    S: SerialLink,
    M: MeshTransport,
    C: ConfigStore,
    L: LocalServices,
{
    /// Create a node with the default confirmation timeout.
    pub fn new(serial: S, mesh: M, store: C, local: L) -> Self {
        Self::with_confirmation_timeout(serial, mesh, store, local, DEFAULT_CONFIRMATION_TIMEOUT)
    }

    /// Create a node with an explicit confirmation timeout.
    pub fn with_confirmation_timeout(
        serial: S,
        mesh: M,
        store: C,
        local: L,
        timeout: Duration,
    ) -> Self {
        Node {
            serial,
            mesh,
            store,
            local,
            config: DeviceConfig::default(),
            mode: Mode::Serial,
            assembler: FrameAssembler::new(),
            pending_frame: None,
            tracker: PublishTracker::new(timeout),
            battery: None,
        }
    }

    /// Load configuration, join the mesh, broadcast the startup
    /// announcements, and greet the host MCU.
    pub fn start(&mut self) -> Result<(), NodeError> {
        self.config = self.store.load()?;
        self.mesh.begin(&self.config.mesh_net_name)?;
        info!(
            "joined mesh '{}' as {}",
            self.config.mesh_net_name,
            self.mesh.local_address()
        );

        self.send_sensor_config()?;
        self.send_battery_config()?;
        self.send_attributes()?;

        self.serial.write_frame(&INITIAL_MESSAGE)
    }

    /// Run one loop iteration. Never fatal: errors are reported to the
    /// caller for logging and the loop keeps running.
    pub fn poll(&mut self) -> Result<(), NodeError> {
        let mut first_error = None;

        if self.mode == Mode::Serial {
            if self.pending_frame.is_none() {
                if let Some(byte) = self.serial.read_byte() {
                    match self.assembler.push_byte(byte) {
                        Ok(Some(frame)) => self.pending_frame = Some(frame),
                        Ok(None) => {}
                        Err(err) => {
                            warn!("frame assembly error: {err}");
                            first_error.get_or_insert(NodeError::Protocol(err));
                        }
                    }
                }
            }
            if let Some(frame) = self.pending_frame.take() {
                if let Err(err) = self.dispatch(&frame) {
                    first_error.get_or_insert(err);
                }
            }
        }

        if let Some(confirmation) = self.mesh.maintenance() {
            if self.tracker.confirm(&confirmation) {
                if self.mode == Mode::Serial {
                    if let Err(err) = self.serial.write_frame(&CONFIRMATION_MESSAGE) {
                        first_error.get_or_insert(err);
                    }
                } else {
                    debug!("confirmation arrived after serial teardown; host ack skipped");
                }
            }
        }
        if let Some(err) = self.tracker.check_timeout(Instant::now()) {
            warn!("{err}");
            first_error.get_or_insert(err);
        }

        self.local.maintenance();

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Dispatch one completed frame. Every path consumes the frame;
    /// unrecognized commands are ignored without a reply.
    fn dispatch(&mut self, frame: &[u8]) -> Result<(), NodeError> {
        match HostCommand::decode(frame) {
            Ok(HostCommand::McuInfoRequest) => self.serial.write_frame(&CONNECTED_MESSAGE),
            Ok(HostCommand::Ack) => Ok(()),
            Ok(HostCommand::EnterSettingMode) => self.enter_configuration_mode(),
            Ok(HostCommand::BatteryReport { level }) => {
                self.battery = Some(level);
                self.serial.write_frame(&CONFIRMATION_MESSAGE)
            }
            Ok(HostCommand::PositionReport { state }) => self.publish_state(state),
            Err(err) => {
                debug!("ignoring unrecognized host frame: {err}");
                Ok(())
            }
        }
    }

    /// Broadcast a state report and arm the confirmation tracker. The
    /// host acknowledgment is deferred until the mesh confirms delivery.
    fn publish_state(&mut self, state: SensorState) -> Result<(), NodeError> {
        let payload = StateReportPayload {
            state: state.label().to_string(),
            battery: self.battery.map(|level| level.label().to_string()),
        };
        let envelope = Envelope::new(DeviceType::Sensor, PacketType::State, &payload)?;
        self.mesh.send_broadcast(&envelope.encode())?;
        self.tracker.arm(Instant::now());
        debug!("state report broadcast, awaiting delivery confirmation");
        Ok(())
    }

    /// Reply to the host, tear down the serial link, and start the local
    /// configuration services. One-way.
    fn enter_configuration_mode(&mut self) -> Result<(), NodeError> {
        self.serial.write_frame(&SETTING_MESSAGE)?;
        self.serial.shutdown();
        self.mode = Mode::Configuration;
        info!("entering configuration mode; serial link closed");
        self.local.enter_configuration_mode()
    }

    /// Broadcast the window-contact discovery announcement. Idempotent.
    pub fn send_sensor_config(&mut self) -> Result<(), NodeError> {
        let payload =
            SensorConfigPayload::new(&self.config.sensor_name, self.config.sensor_class);
        let envelope = Envelope::new(DeviceType::Sensor, PacketType::Config, &payload)?;
        self.mesh.send_broadcast(&envelope.encode())
    }

    /// Broadcast the battery-entity discovery announcement. Idempotent.
    pub fn send_battery_config(&mut self) -> Result<(), NodeError> {
        let payload = BatteryConfigPayload::new(&self.config.battery_name);
        let envelope = Envelope::new(DeviceType::Sensor, PacketType::Config, &payload)?;
        self.mesh.send_broadcast(&envelope.encode())
    }

    /// Broadcast the static node metadata. Idempotent.
    pub fn send_attributes(&mut self) -> Result<(), NodeError> {
        let payload = AttributesPayload {
            device_model: NODE_MODEL.to_string(),
            mcu: MCU_MODEL.to_string(),
            address: self.mesh.local_address().to_string(),
            firmware: FIRMWARE_VERSION.to_string(),
            library: self.mesh.transport_version(),
        };
        let envelope = Envelope::new(DeviceType::Sensor, PacketType::Attributes, &payload)?;
        self.mesh.send_broadcast(&envelope.encode())
    }

    /// Current operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether a state-report publish is awaiting confirmation.
    pub fn awaiting_confirmation(&self) -> bool {
        self.tracker.is_pending()
    }

    /// Active configuration.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Update and persist the configuration (used by the web
    /// configuration surface).
    pub fn save_config(&mut self, config: DeviceConfig) -> Result<(), NodeError> {
        self.store.save(&config)?;
        self.config = config;
        Ok(())
    }
}
