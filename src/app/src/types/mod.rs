//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - wifi: WiFi provisioning types
//! - ota: Firmware update types
//! - device: Device information shown on the page
//! - common: Shared UI types

pub mod common;
pub mod device;
pub mod ota;
pub mod wifi;

pub use common::*;
pub use device::*;
pub use ota::*;
pub use wifi::*;
