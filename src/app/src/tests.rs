use super::*;
use crux_core::testing::AppTester;
use crux_http::protocol::HttpRequest;

/// Everything a command asked the Shell to do, grouped by capability
#[derive(Debug, Default)]
pub(crate) struct Emitted {
    pub renders: usize,
    pub http: Vec<HttpRequest>,
    pub timers: Vec<TimerOperation>,
    pub uploads: Vec<UploadOperation>,
    pub pages: Vec<PageOperation>,
}

impl Emitted {
    pub fn from_command(mut cmd: Command<Effect, Event>) -> Self {
        let mut emitted = Self::default();
        for effect in cmd.effects() {
            match effect {
                Effect::Render(_) => emitted.renders += 1,
                Effect::Http(request) => emitted.http.push(request.operation),
                Effect::Timer(request) => emitted.timers.push(request.operation),
                Effect::Upload(request) => emitted.uploads.push(request.operation),
                Effect::Page(request) => emitted.pages.push(request.operation),
            }
        }
        emitted
    }

    /// Requests sent to `endpoint`
    pub fn requests_to(&self, endpoint: &str) -> Vec<&HttpRequest> {
        let url = build_url(endpoint);
        self.http.iter().filter(|r| r.url == url).collect()
    }

    pub fn header(request: &HttpRequest, name: &str) -> Option<String> {
        request
            .headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.clone())
    }

    /// `(id, millis)` of every started timer
    pub fn started_timers(&self) -> Vec<(u64, u64)> {
        self.timers
            .iter()
            .filter_map(|op| match op {
                TimerOperation::Start { id, millis } => Some((*id, *millis)),
                TimerOperation::Clear { .. } => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.renders == 0
            && self.http.is_empty()
            && self.timers.is_empty()
            && self.uploads.is_empty()
            && self.pages.is_empty()
    }
}

fn update(model: &mut Model, event: Event) -> Emitted {
    Emitted::from_command(crux_core::App::update(&App, event, model))
}

#[test]
fn test_initialize_loads_page_data() {
    let mut model = Model::default();

    let emitted = update(&mut model, Event::Initialize);

    for endpoint in [
        "/apSSID",
        "/OTAstatus",
        "/wifiConnectInfo",
        "/Sensor",
        "/localTime",
    ] {
        assert_eq!(
            emitted.requests_to(endpoint).len(),
            1,
            "expected one request to {endpoint}"
        );
    }
    assert!(emitted.renders > 0);
    assert!(model.sensor_timer.is_some());
    assert!(model.local_time_timer.is_some());
}

#[test]
fn test_cleared_tick_is_ignored() {
    let mut model = Model::default();
    let _ = update(
        &mut model,
        Event::Wifi(WifiEvent::Connect {
            ssid: "HomeNet".to_string(),
            password: "secret".to_string(),
            timestamp_ms: 0,
        }),
    );
    let handle = model
        .connection_attempt
        .poll_handle
        .expect("poll should be running");

    let emitted = update(
        &mut model,
        Event::Tick {
            handle,
            output: TimerOutput::Cleared,
        },
    );

    assert!(emitted.is_empty());
}

#[test]
fn test_fired_tick_is_routed_by_channel() {
    let mut model = Model::default();
    let _ = update(
        &mut model,
        Event::Wifi(WifiEvent::Connect {
            ssid: "HomeNet".to_string(),
            password: "secret".to_string(),
            timestamp_ms: 0,
        }),
    );
    let handle = model
        .connection_attempt
        .poll_handle
        .expect("poll should be running");

    let emitted = update(
        &mut model,
        Event::Tick {
            handle,
            output: TimerOutput::Fired,
        },
    );

    assert_eq!(emitted.requests_to("/wifiConnectStatus").len(), 1);
}

#[test]
fn test_wifi_and_ota_timers_are_independent() {
    let mut model = Model::default();
    let _ = update(
        &mut model,
        Event::Ota(OtaEvent::FileSelected {
            name: "firmware.bin".to_string(),
            size: 1024,
        }),
    );
    let _ = update(&mut model, Event::Ota(OtaEvent::StartUpload));
    let _ = update(
        &mut model,
        Event::Ota(OtaEvent::StatusResponse(Ok(OtaStatusResponse {
            compile_date: "Jul 17 2023".to_string(),
            compile_time: "10:10:00".to_string(),
            ota_update_status: OtaUpdateStatusCode::Successful,
        }))),
    );
    let countdown = model
        .update_session
        .countdown_handle
        .expect("countdown should be running");

    let emitted = update(
        &mut model,
        Event::Wifi(WifiEvent::Connect {
            ssid: "HomeNet".to_string(),
            password: "secret".to_string(),
            timestamp_ms: 0,
        }),
    );

    assert!(!emitted
        .timers
        .contains(&TimerOperation::Clear { id: countdown.id }));
    assert_eq!(model.update_session.countdown_handle, Some(countdown));
}

#[test]
fn test_clear_error() {
    let app = AppTester::<App>::default();
    let mut model = Model {
        error_message: Some("Some error".to_string()),
        ..Default::default()
    };

    let _command = app.update(Event::Ui(UiEvent::ClearError), &mut model);

    assert_eq!(model.error_message, None);
}

#[test]
fn test_view_excludes_password() {
    let app = App;
    let mut model = Model::default();
    let _ = update(
        &mut model,
        Event::Wifi(WifiEvent::Connect {
            ssid: "HomeNet".to_string(),
            password: "hunter22".to_string(),
            timestamp_ms: 0,
        }),
    );

    let view = crux_core::App::view(&app, &model);
    let json = serde_json::to_string(&view).unwrap();

    assert!(json.contains("HomeNet"));
    assert!(!json.contains("hunter22"));
}
