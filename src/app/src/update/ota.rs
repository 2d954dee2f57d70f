/*
   Idle ──StartUpload──► Uploading ──progress tick / transfer done──► status poll
                             │                                           │
                     upload transport                        ┌───────────┴──────────┐
                          failure                 status -1, or status 0 /        status 1
                             │                    no answer after transfer            │
                             ▼                               │                        ▼
                           Failed ◄──────────────────────────┘                   Succeeded
                   (StartUpload again)                                (countdown ... 0 → reload)
*/
use crux_core::{render::render, Command};

use crate::commands::upload::UploadOutput;
use crate::config::{OTA_COUNTDOWN_TICK_MS, OTA_REBOOT_COUNTDOWN_SECS};
use crate::events::{Event, OtaEvent};
use crate::http_helpers::build_url;
use crate::model::Model;
use crate::scheduler::{PollingScheduler, TimerChannel, TimerHandle};
use crate::types::{
    upload_percentage, FirmwareInfo, OtaStatusResponse, OtaUpdateStatusCode, SelectedFile,
    StatusText, UpdateStatus,
};
use crate::{device_post, Effect, PageCmd, UploadCmd};

pub const NO_FILE_SELECTED_ALERT: &str = "Select A File First";
pub const SIZE_UNKNOWN_ALERT: &str = "total size is unknown";
pub const UPLOAD_ERROR_TEXT: &str = "!!! Upload Error !!!";
pub const UNCONFIRMED_UPDATE_TEXT: &str =
    "Firmware upload finished, but the device did not confirm the update";

fn uploading_text(file_name: &str) -> String {
    format!("Uploading {file_name}, Firmware Update in Progress...")
}

fn countdown_text(seconds: u32) -> String {
    format!("OTA Firmware Update Complete. This page will close shortly, Rebooting in: {seconds}")
}

/// Handle firmware update events
pub fn handle(event: OtaEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        OtaEvent::FileSelected { name, size } => {
            log::debug!("firmware image selected: {name} ({size} bytes)");
            model.update_session.file = Some(SelectedFile { name, size });
            render()
        }

        OtaEvent::StartUpload => start_upload(model),

        OtaEvent::UploadProgress { loaded, total } => handle_progress(loaded, total, model),

        OtaEvent::UploadFinished(output) => handle_upload_finished(output, model),

        OtaEvent::CheckStatus => check_status(),

        OtaEvent::StatusResponse(result) => handle_status_response(result, model),
    }
}

fn start_upload(model: &mut Model) -> Command<Effect, Event> {
    let session = &mut model.update_session;

    if session.status == UpdateStatus::Uploading || session.is_countdown_running() {
        log::warn!("ignoring upload request, an update is already in progress");
        return Command::done();
    }

    let Some(file) = &session.file else {
        log::warn!("upload requested without a firmware image");
        return PageCmd::alert(NO_FILE_SELECTED_ALERT);
    };

    log::info!("uploading firmware image {} ({} bytes)", file.name, file.size);
    model.ota_status = Some(StatusText::info(uploading_text(&file.name)));
    session.status = UpdateStatus::Uploading;
    session.progress = None;
    session.transfer_finished = false;
    model.error_message = None;

    Command::all([
        render(),
        UploadCmd::send(build_url("/OTAupdate"), "file")
            .build()
            .then_send(|output| Event::Ota(OtaEvent::UploadFinished(output))),
    ])
}

/// Every progress tick with a known total triggers exactly one status poll
fn handle_progress(loaded: u64, total: Option<u64>, model: &mut Model) -> Command<Effect, Event> {
    let session = &mut model.update_session;

    if session.status != UpdateStatus::Uploading {
        log::debug!("ignoring progress outside of an upload");
        return Command::done();
    }

    let Some(total) = total else {
        return PageCmd::alert(SIZE_UNKNOWN_ALERT);
    };

    session.progress = Some(upload_percentage(loaded, total));
    Command::all([render(), check_status()])
}

fn handle_upload_finished(output: UploadOutput, model: &mut Model) -> Command<Effect, Event> {
    let session = &mut model.update_session;

    if session.status != UpdateStatus::Uploading {
        return Command::done();
    }

    match output {
        // The last progress tick usually fires before the device answered
        UploadOutput::Completed => {
            log::info!("firmware upload finished");
            session.transfer_finished = true;
            check_status()
        }
        UploadOutput::Failed { message } => {
            log::error!("firmware upload failed: {message}");
            session.status = UpdateStatus::Failed;
            model.ota_status = Some(StatusText::error(UPLOAD_ERROR_TEXT));
            render()
        }
    }
}

/// Query the update status and firmware build info
pub fn check_status() -> Command<Effect, Event> {
    device_post!("/OTAstatus", "Get OTA status",
        body_string: "ota_update_status".to_string(),
        expect_json: OtaStatusResponse,
        then: |result| Event::Ota(OtaEvent::StatusResponse(result))
    )
}

fn handle_status_response(
    result: Result<OtaStatusResponse, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            log::warn!("{e}");
            if awaits_final_status(model) {
                mark_unconfirmed(model);
            }
            return model.set_error_and_render(e);
        }
    };

    model.firmware_info = Some(FirmwareInfo::from(&response));

    // Once the countdown runs, later answers only refresh the build info
    if model.update_session.is_countdown_running() {
        return render();
    }

    match response.ota_update_status {
        OtaUpdateStatusCode::Successful => start_countdown(model),
        OtaUpdateStatusCode::Failed => {
            log::error!("device reported a failed firmware update");
            model.update_session.status = UpdateStatus::Failed;
            model.ota_status = Some(StatusText::error(UPLOAD_ERROR_TEXT));
            render()
        }
        OtaUpdateStatusCode::Pending => {
            if awaits_final_status(model) {
                mark_unconfirmed(model);
            }
            render()
        }
    }
}

fn awaits_final_status(model: &Model) -> bool {
    let session = &model.update_session;
    session.status == UpdateStatus::Uploading && session.transfer_finished
}

/// The answer to the final poll decides the upload. Anything but success or
/// failure leaves the session open for another attempt.
fn mark_unconfirmed(model: &mut Model) {
    log::warn!("device did not confirm the firmware update");
    model.update_session.status = UpdateStatus::Failed;
    model.ota_status = Some(StatusText::error(UNCONFIRMED_UPDATE_TEXT));
}

fn start_countdown(model: &mut Model) -> Command<Effect, Event> {
    log::info!("firmware update complete, reloading in {OTA_REBOOT_COUNTDOWN_SECS} s");

    let session = &mut model.update_session;
    session.status = UpdateStatus::Succeeded;
    session.countdown_seconds = Some(OTA_REBOOT_COUNTDOWN_SECS);
    model.ota_status = Some(StatusText::success(countdown_text(
        OTA_REBOOT_COUNTDOWN_SECS,
    )));

    let timer = model.scheduler.restart(
        &mut session.countdown_handle,
        TimerChannel::OtaCountdown,
        OTA_COUNTDOWN_TICK_MS,
    );
    Command::all([render(), timer])
}

/// Countdown tick - one second elapsed
pub fn handle_countdown_tick(handle: TimerHandle, model: &mut Model) -> Command<Effect, Event> {
    let session = &mut model.update_session;

    if !handle.is_current(session.countdown_handle) {
        log::debug!("dropping stale countdown tick {handle:?}");
        return Command::done();
    }

    let remaining = session.countdown_seconds.unwrap_or(0).saturating_sub(1);
    session.countdown_seconds = Some(remaining);
    model.ota_status = Some(StatusText::success(countdown_text(remaining)));

    if remaining > 0 {
        return Command::all([
            render(),
            PollingScheduler::arm(handle, OTA_COUNTDOWN_TICK_MS),
        ]);
    }

    Command::all([
        render(),
        PollingScheduler::cancel(&mut session.countdown_handle),
        PageCmd::reload(),
    ])
}
