/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.ap_ssid, Some(ssid))
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.connection_info, Some(info);
///     model.show_disconnect, true
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

// Re-export http_helpers functions for macro use
pub use crate::http_helpers::{
    build_url, check_response_status, extract_error_message, is_response_success,
    map_http_error, parse_json_response, parse_optional_json_response, process_json_response,
    process_optional_json_response, process_status_response, BASE_URL,
};

/// Macro for POST requests to the device.
///
/// The `then:` arm names the `Result<_, String>` produced from the response and
/// builds the event sent back to the app. Everything it captures is moved.
///
/// # Patterns
///
/// Pattern 1: POST with string body expecting JSON response
/// ```ignore
/// device_post!("/OTAstatus", "Get OTA status",
///     body_string: "ota_update_status".to_string(),
///     expect_json: OtaStatusResponse,
///     then: |result| Event::Ota(OtaEvent::StatusResponse(result))
/// )
/// ```
///
/// Pattern 2: POST with extra headers and string body, status only
/// ```ignore
/// device_post!("/wifiConnect", "WiFi connect",
///     headers: [("my-connect-ssid", ssid), ("my-connect-pswd", password)],
///     body_string: timestamp_body(timestamp_ms),
///     then: |result| Event::Wifi(WifiEvent::ConnectResponse(result))
/// )
/// ```
///
/// Pattern 3: POST with string body, status only
/// ```ignore
/// device_post!("/wifiConnect", "WiFi connect",
///     body_string: timestamp_body(timestamp_ms),
///     then: |result| Event::Wifi(WifiEvent::ConnectResponse(result))
/// )
/// ```
#[macro_export]
macro_rules! device_post {
    // Pattern 1: POST with string body expecting JSON response
    ($endpoint:expr, $action:expr, body_string: $body:expr, expect_json: $response_type:ty, then: |$result:ident| $event:expr $(,)?) => {{
        $crate::HttpCmd::post($crate::build_url($endpoint))
            .body_string($body)
            .build()
            .then_send(move |response| {
                let $result: Result<$response_type, String> =
                    $crate::process_json_response($action, response);
                $event
            })
    }};

    // Pattern 2: POST with extra headers and string body, status only
    ($endpoint:expr, $action:expr, headers: [$(($name:expr, $value:expr)),* $(,)?], body_string: $body:expr, then: |$result:ident| $event:expr $(,)?) => {{
        let builder = $crate::HttpCmd::post($crate::build_url($endpoint));
        $(
            let builder = builder.header($name, $value);
        )*
        builder
            .body_string($body)
            .build()
            .then_send(move |response| {
                let $result: Result<(), String> =
                    $crate::process_status_response($action, response);
                $event
            })
    }};

    // Pattern 3: POST with string body, status only
    ($endpoint:expr, $action:expr, body_string: $body:expr, then: |$result:ident| $event:expr $(,)?) => {{
        $crate::device_post!($endpoint, $action, headers: [], body_string: $body, then: |$result| $event)
    }};
}

/// Macro for DELETE requests to the device (status only).
///
/// # Example
/// ```ignore
/// device_delete!("/wifiDisconnect", "WiFi disconnect",
///     body_string: timestamp_body(timestamp_ms),
///     then: |result| Event::Wifi(WifiEvent::DisconnectResponse(result))
/// )
/// ```
#[macro_export]
macro_rules! device_delete {
    ($endpoint:expr, $action:expr, body_string: $body:expr, then: |$result:ident| $event:expr $(,)?) => {{
        $crate::HttpCmd::delete($crate::build_url($endpoint))
            .body_string($body)
            .build()
            .then_send(move |response| {
                let $result: Result<(), String> =
                    $crate::process_status_response($action, response);
                $event
            })
    }};
}

/// Macro for GET requests to the device.
///
/// # Patterns
///
/// Pattern 1: GET expecting JSON response
/// ```ignore
/// device_get!("/apSSID", "Get AP SSID",
///     expect_json: ApSsid,
///     then: |result| Event::Device(DeviceEvent::ApSsidResponse(result))
/// )
/// ```
///
/// Pattern 2: GET expecting JSON response or an empty body (`Option`)
/// ```ignore
/// device_get!("/localTime", "Get local time",
///     expect_optional_json: LocalTime,
///     then: |result| Event::Device(DeviceEvent::LocalTimeResponse { handle, result })
/// )
/// ```
#[macro_export]
macro_rules! device_get {
    // Pattern 1: GET expecting JSON response
    ($endpoint:expr, $action:expr, expect_json: $response_type:ty, then: |$result:ident| $event:expr $(,)?) => {{
        $crate::HttpCmd::get($crate::build_url($endpoint))
            .build()
            .then_send(move |response| {
                let $result: Result<$response_type, String> =
                    $crate::process_json_response($action, response);
                $event
            })
    }};

    // Pattern 2: GET expecting optional JSON response
    ($endpoint:expr, $action:expr, expect_optional_json: $response_type:ty, then: |$result:ident| $event:expr $(,)?) => {{
        $crate::HttpCmd::get($crate::build_url($endpoint))
            .build()
            .then_send(move |response| {
                let $result: Result<Option<$response_type>, String> =
                    $crate::process_optional_json_response($action, response);
                $event
            })
    }};
}
