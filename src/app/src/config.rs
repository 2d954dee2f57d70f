//! Timing and limit constants for the device page.
//!
//! All intervals are in milliseconds unless the name says otherwise.

/// Cadence of the WiFi connection status poll.
pub const WIFI_STATUS_POLL_INTERVAL_MS: u64 = 3000;

/// Consecutive failed status polls tolerated before the attempt is given up.
pub const WIFI_STATUS_MAX_FAILED_POLLS: u32 = 3;

/// Delay between a disconnect request and the page reload.
pub const DISCONNECT_RELOAD_DELAY_MS: u64 = 2000;

/// Length of the reboot countdown after a successful firmware update.
pub const OTA_REBOOT_COUNTDOWN_SECS: u32 = 10;

/// Tick of the reboot countdown.
pub const OTA_COUNTDOWN_TICK_MS: u64 = 1000;

pub const SENSOR_POLL_INTERVAL_MS: u64 = 5000;

pub const LOCAL_TIME_POLL_INTERVAL_MS: u64 = 10000;

/// Size of the station SSID buffer in the device's WiFi config.
pub const SSID_MAX_LEN: usize = 32;

/// Size of the station password buffer in the device's WiFi config.
pub const PASSWORD_MAX_LEN: usize = 64;
