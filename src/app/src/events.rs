use serde::{Deserialize, Serialize};

use crate::commands::{timer::TimerOutput, upload::UploadOutput};
use crate::scheduler::TimerHandle;
use crate::types::*;

/// WiFi provisioning events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum WifiEvent {
    /// Connect button pressed. `timestamp_ms` is the Shell's wall clock.
    Connect {
        ssid: String,
        password: String,
        timestamp_ms: u64,
    },
    FetchConnectInfo,
    Disconnect {
        timestamp_ms: u64,
    },
    TogglePasswordVisibility,

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    ConnectResponse(Result<(), String>),
    #[serde(skip)]
    StatusResponse {
        handle: TimerHandle,
        result: Result<WifiConnectStatusResponse, String>,
    },
    #[serde(skip)]
    ConnectInfoResponse(Result<Option<DeviceConnectInfo>, String>),
    #[serde(skip)]
    DisconnectResponse(Result<(), String>),
}

/// Firmware update events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum OtaEvent {
    FileSelected {
        name: String,
        size: u64,
    },
    StartUpload,
    /// Upload progress as reported by the Shell's transport.
    /// `total` is `None` when the length is not computable.
    UploadProgress {
        loaded: u64,
        total: Option<u64>,
    },
    /// Informational status query (firmware build info)
    CheckStatus,

    // Internal events, skipped from serialization
    #[serde(skip)]
    UploadFinished(UploadOutput),
    #[serde(skip)]
    StatusResponse(Result<OtaStatusResponse, String>),
}

/// Device information events (internal)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    #[serde(skip)]
    ApSsidResponse(Result<ApSsid, String>),
    #[serde(skip)]
    SensorResponse {
        handle: TimerHandle,
        result: Result<DeviceSensorReading, String>,
    },
    #[serde(skip)]
    LocalTimeResponse {
        handle: TimerHandle,
        result: Result<Option<LocalTime>, String>,
    },
}

/// UI events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ClearError,
}

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    // Initialization
    Initialize,

    // Domain events
    Wifi(WifiEvent),
    Ota(OtaEvent),
    Device(DeviceEvent),
    Ui(UiEvent),

    // Timer resolution (internal)
    #[serde(skip)]
    Tick {
        handle: TimerHandle,
        output: TimerOutput,
    },
}
