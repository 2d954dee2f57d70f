/*
                 Connect (valid credentials)
                          ↓
     ┌──────────────► Connecting ◄────────┐
     │                    │               │
  Connect            (status poll)   code 0/1/4, or fewer than
  (any state)             │          MAX consecutive poll failures
                ┌─────────┴─────────┐
                │                   │
             code 2              code 3
   or MAX poll failures             │
                ↓                   ↓
             Failed             Connected ──► fetch connection info
*/
use crux_core::{render::render, Command};

use crate::config::{
    DISCONNECT_RELOAD_DELAY_MS, WIFI_STATUS_MAX_FAILED_POLLS, WIFI_STATUS_POLL_INTERVAL_MS,
};
use crate::events::{Event, WifiEvent};
use crate::http_helpers::timestamp_body;
use crate::model::Model;
use crate::scheduler::{PollingScheduler, TimerChannel, TimerHandle};
use crate::types::{
    validate_credentials, ConnectionInfo, ConnectionStatus, DeviceConnectInfo, StatusText,
    WifiConnectStatusResponse,
};
use crate::{device_delete, device_get, device_post, update_field, Effect, PageCmd};

pub const CONNECTING_TEXT: &str = "Connecting.....";
pub const CONNECT_FAILED_TEXT: &str =
    "Failed to Connect. Please check AP credentials and compatibility";
pub const CONNECT_SUCCESS_TEXT: &str = "Connection Success!";
pub const DEVICE_UNREACHABLE_TEXT: &str =
    "Failed to Connect. The device did not answer the status request";

/// Handle WiFi provisioning events
pub fn handle(event: WifiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        WifiEvent::Connect {
            ssid,
            password,
            timestamp_ms,
        } => handle_connect(ssid, password, timestamp_ms, model),

        WifiEvent::ConnectResponse(result) => {
            // The outcome is observed through the status poll
            if let Err(e) = result {
                log::warn!("{e}");
            }
            Command::done()
        }

        WifiEvent::StatusResponse { handle, result } => {
            handle_status_response(handle, result, model)
        }

        WifiEvent::FetchConnectInfo => fetch_connect_info(),

        WifiEvent::ConnectInfoResponse(result) => handle_connect_info_response(result, model),

        WifiEvent::Disconnect { timestamp_ms } => handle_disconnect(timestamp_ms, model),

        WifiEvent::DisconnectResponse(result) => {
            // The page reloads regardless
            if let Err(e) = result {
                log::warn!("{e}");
            }
            Command::done()
        }

        WifiEvent::TogglePasswordVisibility => {
            update_field!(model.show_password, !model.show_password)
        }
    }
}

/// Validate the credentials and, if they are fine, start a new attempt
fn handle_connect(
    ssid: String,
    password: String,
    timestamp_ms: u64,
    model: &mut Model,
) -> Command<Effect, Event> {
    if let Err(errors) = validate_credentials(&ssid, &password) {
        log::debug!("credentials rejected: {errors:?}");
        model.credential_errors = errors;
        return render();
    }

    model.credential_errors.clear();
    submit_connect(ssid, password, timestamp_ms, model)
}

/// Send the credentials to the device and start polling the connection status.
/// A poll of a previous attempt is cancelled.
fn submit_connect(
    ssid: String,
    password: String,
    timestamp_ms: u64,
    model: &mut Model,
) -> Command<Effect, Event> {
    log::info!("connecting device to \"{ssid}\"");

    let request = device_post!("/wifiConnect", "WiFi connect",
        headers: [("my-connect-ssid", ssid.clone()), ("my-connect-pswd", password)],
        body_string: timestamp_body(timestamp_ms),
        then: |result| Event::Wifi(WifiEvent::ConnectResponse(result))
    );

    let attempt = &mut model.connection_attempt;
    attempt.reset(ssid);
    let timers = model.scheduler.restart(
        &mut attempt.poll_handle,
        TimerChannel::WifiStatus,
        WIFI_STATUS_POLL_INTERVAL_MS,
    );
    model.wifi_status = Some(StatusText::info(CONNECTING_TEXT));

    Command::all([render(), request, timers])
}

/// Status poll tick - ask the device for the connection status
pub fn handle_status_tick(handle: TimerHandle, model: &mut Model) -> Command<Effect, Event> {
    if !handle.is_current(model.connection_attempt.poll_handle) {
        log::debug!("dropping stale WiFi status tick {handle:?}");
        return Command::done();
    }

    device_post!("/wifiConnectStatus", "WiFi connect status",
        body_string: "wifi_connect_status".to_string(),
        expect_json: WifiConnectStatusResponse,
        then: |result| Event::Wifi(WifiEvent::StatusResponse { handle, result })
    )
}

/// Status poll response - advance the attempt and either re-arm or stop polling
fn handle_status_response(
    handle: TimerHandle,
    result: Result<WifiConnectStatusResponse, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !handle.is_current(model.connection_attempt.poll_handle) {
        log::debug!("dropping WiFi status response of replaced poll {handle:?}");
        return Command::done();
    }

    let response = match result {
        Ok(response) => response,
        Err(e) => return handle_status_failure(handle, e, model),
    };

    let attempt = &mut model.connection_attempt;
    attempt.failed_polls = 0;
    attempt.status = response.wifi_connect_status.into();

    if !attempt.status.is_terminal() {
        model.wifi_status = Some(StatusText::info(CONNECTING_TEXT));
        return Command::all([
            render(),
            PollingScheduler::arm(handle, WIFI_STATUS_POLL_INTERVAL_MS),
        ]);
    }

    let stop = PollingScheduler::cancel(&mut attempt.poll_handle);
    if attempt.status == ConnectionStatus::Connected {
        log::info!("device connected to \"{}\"", attempt.ssid);
        model.wifi_status = Some(StatusText::success(CONNECT_SUCCESS_TEXT));
        Command::all([render(), stop, fetch_connect_info()])
    } else {
        log::error!("device failed to connect to \"{}\"", attempt.ssid);
        model.wifi_status = Some(StatusText::error(CONNECT_FAILED_TEXT));
        Command::all([render(), stop])
    }
}

/// A status poll went wrong (network, HTTP status or undecodable body).
/// Polling goes on until too many polls in a row failed.
fn handle_status_failure(
    handle: TimerHandle,
    error: String,
    model: &mut Model,
) -> Command<Effect, Event> {
    let attempt = &mut model.connection_attempt;
    attempt.failed_polls += 1;

    if attempt.failed_polls < WIFI_STATUS_MAX_FAILED_POLLS {
        log::warn!(
            "WiFi status poll failed ({}/{WIFI_STATUS_MAX_FAILED_POLLS}): {error}",
            attempt.failed_polls
        );
        return PollingScheduler::arm(handle, WIFI_STATUS_POLL_INTERVAL_MS);
    }

    log::error!("giving up on WiFi status: {error}");
    attempt.status = ConnectionStatus::Failed;
    model.wifi_status = Some(StatusText::error(DEVICE_UNREACHABLE_TEXT));
    Command::all([render(), PollingScheduler::cancel(&mut attempt.poll_handle)])
}

/// Request the station configuration
pub fn fetch_connect_info() -> Command<Effect, Event> {
    device_get!("/wifiConnectInfo", "Get WiFi connect info",
        expect_optional_json: DeviceConnectInfo,
        then: |result| Event::Wifi(WifiEvent::ConnectInfoResponse(result))
    )
}

fn handle_connect_info_response(
    result: Result<Option<DeviceConnectInfo>, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    match result {
        Ok(Some(info)) => update_field!(
            model.connection_info, Some(ConnectionInfo::from(info));
            model.show_disconnect, true
        ),
        Ok(None) => {
            log::debug!("device has no station connection");
            Command::done()
        }
        Err(e) => {
            log::warn!("{e}");
            // Only worth a banner when the user just watched the connection succeed
            if model.connection_attempt.status == ConnectionStatus::Connected {
                model.set_error_and_render(e)
            } else {
                Command::done()
            }
        }
    }
}

/// Disconnect the station and reload the page once the device had time to
/// tear the interface down
fn handle_disconnect(timestamp_ms: u64, model: &mut Model) -> Command<Effect, Event> {
    log::info!("disconnecting device, reloading in {DISCONNECT_RELOAD_DELAY_MS} ms");

    let attempt = &mut model.connection_attempt;
    let stop_poll = PollingScheduler::cancel(&mut attempt.poll_handle);
    if attempt.status == ConnectionStatus::Connecting {
        attempt.status = ConnectionStatus::Idle;
    }

    let reload = model.scheduler.restart(
        &mut model.reload_timer,
        TimerChannel::Reload,
        DISCONNECT_RELOAD_DELAY_MS,
    );

    Command::all([
        stop_poll,
        device_delete!("/wifiDisconnect", "WiFi disconnect",
            body_string: timestamp_body(timestamp_ms),
            then: |result| Event::Wifi(WifiEvent::DisconnectResponse(result))
        ),
        reload,
    ])
}

/// Reload tick - the disconnect delay elapsed
pub fn handle_reload_tick(handle: TimerHandle, model: &mut Model) -> Command<Effect, Event> {
    if !handle.is_current(model.reload_timer) {
        log::debug!("dropping stale reload tick {handle:?}");
        return Command::done();
    }

    model.reload_timer = None;
    PageCmd::reload()
}
