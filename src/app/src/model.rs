use serde::{Deserialize, Serialize};

use crate::scheduler::{PollingScheduler, TimerHandle};
use crate::types::*;

/// Application Model - the complete state
/// Also serves as the ViewModel when serialized
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    // Device information
    pub ap_ssid: Option<String>,
    pub sensor: Option<SensorReading>,
    pub local_time: Option<String>,
    pub firmware_info: Option<FirmwareInfo>,

    // WiFi provisioning
    pub connection_attempt: ConnectionAttempt,
    pub credential_errors: Vec<CredentialError>,
    pub wifi_status: Option<StatusText>,
    /// Last known station configuration, kept until overwritten
    pub connection_info: Option<ConnectionInfo>,
    pub show_disconnect: bool,
    pub show_password: bool,

    // Firmware update
    pub update_session: UpdateSession,
    pub ota_status: Option<StatusText>,

    // Timers not owned by a session
    pub scheduler: PollingScheduler,
    pub reload_timer: Option<TimerHandle>,
    pub sensor_timer: Option<TimerHandle>,
    pub local_time_timer: Option<TimerHandle>,

    // UI state
    pub error_message: Option<String>,
}

impl Model {
    /// Set an error message
    pub fn set_error(&mut self, error: String) {
        self.error_message = Some(error);
    }

    /// Set an error message and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: String,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }
}
