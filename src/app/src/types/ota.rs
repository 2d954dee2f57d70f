use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::scheduler::TimerHandle;

/// Lifecycle of a firmware update as seen by the page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UpdateStatus {
    #[default]
    Idle,
    Uploading,
    Failed,
    Succeeded,
}

/// Update status reported by `/OTAstatus`.
/// Numeric values are fixed by the device firmware.
#[derive(Debug, Clone, Copy, Serialize_repr, Deserialize_repr, PartialEq, Eq)]
#[repr(i8)]
pub enum OtaUpdateStatusCode {
    Failed = -1,
    /// No update finished yet, the answer only carries firmware info
    Pending = 0,
    Successful = 1,
}

/// `/OTAstatus` response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OtaStatusResponse {
    pub compile_date: String,
    pub compile_time: String,
    pub ota_update_status: OtaUpdateStatusCode,
}

/// Build info of the firmware currently running on the device
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirmwareInfo {
    pub compile_date: String,
    pub compile_time: String,
}

impl From<&OtaStatusResponse> for FirmwareInfo {
    fn from(response: &OtaStatusResponse) -> Self {
        Self {
            compile_date: response.compile_date.clone(),
            compile_time: response.compile_time.clone(),
        }
    }
}

/// Firmware image picked in the file dialog. The Shell keeps the contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
}

/// State of the firmware update session
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateSession {
    pub file: Option<SelectedFile>,
    pub status: UpdateStatus,
    /// Upload progress in percent, known once the Shell reported a total size
    pub progress: Option<u8>,
    /// The transfer itself is done and the final status answer is pending
    pub transfer_finished: bool,
    /// Remaining seconds until reload, set once the update succeeded
    pub countdown_seconds: Option<u32>,
    pub countdown_handle: Option<TimerHandle>,
}

impl UpdateSession {
    pub fn is_countdown_running(&self) -> bool {
        self.countdown_handle.is_some()
    }
}

/// Percentage of `loaded` in `total`, clamped to 100
pub fn upload_percentage(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (loaded.min(total).saturating_mul(100) / total) as u8
}
