use anyhow::Result;
use crux_core::typegen::TypeGen;
use esp_portal_core::{
    events::{DeviceEvent, OtaEvent, UiEvent, WifiEvent},
    types::{
        ConnectionStatus, CredentialError, CredentialField, StatusKind, UpdateStatus,
    },
    App, PageOperation, TimerChannel, TimerOperation, TimerOutput, UploadOperation, UploadOutput,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Domain event enums, so every variant the page sends is traced
    gen.register_type::<WifiEvent>()?;
    gen.register_type::<OtaEvent>()?;
    gen.register_type::<DeviceEvent>()?;
    gen.register_type::<UiEvent>()?;

    // Enums reachable from the view model
    gen.register_type::<ConnectionStatus>()?;
    gen.register_type::<UpdateStatus>()?;
    gen.register_type::<StatusKind>()?;
    gen.register_type::<CredentialField>()?;
    gen.register_type::<CredentialError>()?;
    gen.register_type::<TimerChannel>()?;

    // Shell-side effect protocols
    gen.register_type::<TimerOperation>()?;
    gen.register_type::<TimerOutput>()?;
    gen.register_type::<UploadOperation>()?;
    gen.register_type::<UploadOutput>()?;
    gen.register_type::<PageOperation>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
