use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

use crate::config::{PASSWORD_MAX_LEN, SSID_MAX_LEN};
use crate::scheduler::TimerHandle;

/// Lifecycle of a WiFi connection attempt as seen by the page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Idle,
    Connecting,
    Failed,
    Connected,
}

impl ConnectionStatus {
    /// Polling stops for good once an attempt reaches a terminal status
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Connected)
    }
}

/// Connection status reported by `/wifiConnectStatus`.
/// Numeric values are fixed by the device firmware.
#[derive(Debug, Clone, Copy, Serialize_repr, Deserialize_repr, PartialEq, Eq)]
#[repr(u8)]
pub enum WifiConnectStatusCode {
    None = 0,
    Connecting = 1,
    ConnectFailed = 2,
    ConnectSuccess = 3,
    Disconnected = 4,
}

impl From<WifiConnectStatusCode> for ConnectionStatus {
    fn from(code: WifiConnectStatusCode) -> Self {
        match code {
            WifiConnectStatusCode::ConnectFailed => Self::Failed,
            WifiConnectStatusCode::ConnectSuccess => Self::Connected,
            WifiConnectStatusCode::None
            | WifiConnectStatusCode::Connecting
            | WifiConnectStatusCode::Disconnected => Self::Connecting,
        }
    }
}

/// `/wifiConnectStatus` response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WifiConnectStatusResponse {
    pub wifi_connect_status: WifiConnectStatusCode,
}

/// `/wifiConnectInfo` response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceConnectInfo {
    pub ap: String,
    pub ip: String,
    pub netmask: String,
    pub gw: String,
}

/// Network configuration of the station interface
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub access_point_name: String,
    pub ip_address: String,
    pub netmask: String,
    pub gateway: String,
}

impl From<DeviceConnectInfo> for ConnectionInfo {
    fn from(info: DeviceConnectInfo) -> Self {
        Self {
            access_point_name: info.ap,
            ip_address: info.ip,
            netmask: info.netmask,
            gateway: info.gw,
        }
    }
}

/// The live connection attempt. Only one exists at a time; submitting new
/// credentials replaces it together with its poll timer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionAttempt {
    pub ssid: String,
    pub status: ConnectionStatus,
    /// Present only while `status` is `Connecting`
    pub poll_handle: Option<TimerHandle>,
    /// Consecutive status polls that did not produce a usable answer
    pub failed_polls: u32,
}

impl ConnectionAttempt {
    /// Start over for `ssid`. The password only travels in the connect request.
    /// The poll handle is left to the caller, which has to cancel it before
    /// arming a new one.
    pub fn reset(&mut self, ssid: String) {
        self.ssid = ssid;
        self.status = ConnectionStatus::Connecting;
        self.failed_polls = 0;
    }
}

/// Credential input field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CredentialField {
    Ssid,
    Password,
}

impl CredentialField {
    fn label(self) -> &'static str {
        match self {
            Self::Ssid => "SSID",
            Self::Password => "Password",
        }
    }

    fn max_len(self) -> usize {
        match self {
            Self::Ssid => SSID_MAX_LEN,
            Self::Password => PASSWORD_MAX_LEN,
        }
    }
}

/// Validation error for the credentials form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CredentialError {
    EmptyField(CredentialField),
    /// Credentials travel in HTTP headers, so only printable ASCII is allowed
    InvalidCharacters(CredentialField),
    TooLong { field: CredentialField, max: usize },
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{} Can't be Empty!", field.label()),
            Self::InvalidCharacters(field) => {
                write!(f, "{} contains unsupported characters!", field.label())
            }
            Self::TooLong { field, max } => {
                write!(f, "{} must not exceed {max} characters!", field.label())
            }
        }
    }
}

fn validate_field(field: CredentialField, value: &str) -> Option<CredentialError> {
    if value.trim().is_empty() {
        Some(CredentialError::EmptyField(field))
    } else if !value.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
        Some(CredentialError::InvalidCharacters(field))
    } else if value.len() > field.max_len() {
        Some(CredentialError::TooLong {
            field,
            max: field.max_len(),
        })
    } else {
        None
    }
}

/// Check both credential fields independently; all errors are reported at once.
pub fn validate_credentials(ssid: &str, password: &str) -> Result<(), Vec<CredentialError>> {
    let errors: Vec<_> = [
        validate_field(CredentialField::Ssid, ssid),
        validate_field(CredentialField::Password, password),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
