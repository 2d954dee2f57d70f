use crux_core::{render::render, Command};

use crate::config::{LOCAL_TIME_POLL_INTERVAL_MS, SENSOR_POLL_INTERVAL_MS};
use crate::events::{DeviceEvent, Event};
use crate::model::Model;
use crate::scheduler::{PollingScheduler, TimerChannel, TimerHandle};
use crate::types::{ApSsid, DeviceSensorReading, LocalTime, SensorReading};
use crate::{device_get, update_field, Effect};

/// Fetch the AP name and start the sensor and clock channels.
/// Both channels poll right away; the next tick is armed from each response.
pub fn initialize(model: &mut Model) -> Command<Effect, Event> {
    let (sensor, stop_sensor) = model
        .scheduler
        .renew(&mut model.sensor_timer, TimerChannel::Sensor);
    let (clock, stop_clock) = model
        .scheduler
        .renew(&mut model.local_time_timer, TimerChannel::LocalTime);

    Command::all([
        stop_sensor,
        stop_clock,
        device_get!("/apSSID", "Get AP SSID",
            expect_json: ApSsid,
            then: |result| Event::Device(DeviceEvent::ApSsidResponse(result))
        ),
        fetch_sensor(sensor),
        fetch_local_time(clock),
    ])
}

/// Handle device information responses
pub fn handle(event: DeviceEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        DeviceEvent::ApSsidResponse(result) => match result {
            Ok(ap) => update_field!(model.ap_ssid, Some(ap.ssid)),
            Err(e) => {
                log::warn!("{e}");
                Command::done()
            }
        },

        DeviceEvent::SensorResponse { handle, result } => {
            handle_sensor_response(handle, result, model)
        }

        DeviceEvent::LocalTimeResponse { handle, result } => {
            handle_local_time_response(handle, result, model)
        }
    }
}

pub fn handle_sensor_tick(handle: TimerHandle, model: &mut Model) -> Command<Effect, Event> {
    if !handle.is_current(model.sensor_timer) {
        log::debug!("dropping stale sensor tick {handle:?}");
        return Command::done();
    }
    fetch_sensor(handle)
}

pub fn handle_local_time_tick(handle: TimerHandle, model: &mut Model) -> Command<Effect, Event> {
    if !handle.is_current(model.local_time_timer) {
        log::debug!("dropping stale local time tick {handle:?}");
        return Command::done();
    }
    fetch_local_time(handle)
}

fn fetch_sensor(handle: TimerHandle) -> Command<Effect, Event> {
    device_get!("/Sensor", "Get sensor reading",
        expect_json: DeviceSensorReading,
        then: |result| Event::Device(DeviceEvent::SensorResponse { handle, result })
    )
}

fn fetch_local_time(handle: TimerHandle) -> Command<Effect, Event> {
    device_get!("/localTime", "Get local time",
        expect_optional_json: LocalTime,
        then: |result| Event::Device(DeviceEvent::LocalTimeResponse { handle, result })
    )
}

// Failed reads keep the channel alive; the device may just be busy.
fn handle_sensor_response(
    handle: TimerHandle,
    result: Result<DeviceSensorReading, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !handle.is_current(model.sensor_timer) {
        return Command::done();
    }

    let next = PollingScheduler::arm(handle, SENSOR_POLL_INTERVAL_MS);
    match result {
        Ok(reading) => Command::all([
            update_field!(model.sensor, Some(SensorReading::from(reading))),
            next,
        ]),
        Err(e) => {
            log::warn!("{e}");
            next
        }
    }
}

fn handle_local_time_response(
    handle: TimerHandle,
    result: Result<Option<LocalTime>, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !handle.is_current(model.local_time_timer) {
        return Command::done();
    }

    let next = PollingScheduler::arm(handle, LOCAL_TIME_POLL_INTERVAL_MS);
    match result {
        Ok(Some(time)) => {
            model.local_time = Some(time.time);
            Command::all([render(), next])
        }
        Ok(None) => {
            log::debug!("device clock not synchronised yet");
            next
        }
        Err(e) => {
            log::warn!("{e}");
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::timer::TimerOperation;
    use crate::tests::Emitted;

    fn reading() -> DeviceSensorReading {
        DeviceSensorReading {
            temp: "23".to_string(),
            humidity: "45".to_string(),
        }
    }

    #[test]
    fn initialize_polls_everything_once() {
        let mut model = Model::default();

        let emitted = Emitted::from_command(initialize(&mut model));

        assert_eq!(emitted.requests_to("/apSSID").len(), 1);
        assert_eq!(emitted.requests_to("/Sensor").len(), 1);
        assert_eq!(emitted.requests_to("/localTime").len(), 1);
        assert!(emitted.timers.is_empty());
        assert_eq!(
            model.sensor_timer.map(|h| h.channel),
            Some(TimerChannel::Sensor)
        );
        assert_eq!(
            model.local_time_timer.map(|h| h.channel),
            Some(TimerChannel::LocalTime)
        );
    }

    #[test]
    fn second_initialize_replaces_channels() {
        let mut model = Model::default();
        let _ = initialize(&mut model);
        let sensor = model.sensor_timer.expect("sensor channel should be running");

        let emitted = Emitted::from_command(initialize(&mut model));

        assert!(emitted.timers.contains(&TimerOperation::Clear { id: sensor.id }));
        assert!(!sensor.is_current(model.sensor_timer));
    }

    #[test]
    fn ap_ssid_response_sets_name() {
        let mut model = Model::default();

        let _ = handle(
            DeviceEvent::ApSsidResponse(Ok(ApSsid {
                ssid: "ESP32-Portal".to_string(),
            })),
            &mut model,
        );

        assert_eq!(model.ap_ssid.as_deref(), Some("ESP32-Portal"));
    }

    #[test]
    fn sensor_response_updates_reading_and_rearms() {
        let mut model = Model::default();
        let _ = initialize(&mut model);
        let sensor = model.sensor_timer.expect("sensor channel should be running");

        let emitted = Emitted::from_command(handle(
            DeviceEvent::SensorResponse {
                handle: sensor,
                result: Ok(reading()),
            },
            &mut model,
        ));

        assert_eq!(
            model.sensor,
            Some(SensorReading {
                temperature: "23".to_string(),
                humidity: "45".to_string(),
            })
        );
        assert_eq!(
            emitted.started_timers(),
            vec![(sensor.id, SENSOR_POLL_INTERVAL_MS)]
        );
    }

    #[test]
    fn sensor_failure_keeps_polling() {
        let mut model = Model::default();
        let _ = initialize(&mut model);
        let sensor = model.sensor_timer.expect("sensor channel should be running");

        let emitted = Emitted::from_command(handle(
            DeviceEvent::SensorResponse {
                handle: sensor,
                result: Err("Get sensor reading failed".to_string()),
            },
            &mut model,
        ));

        assert!(model.sensor.is_none());
        assert!(model.error_message.is_none());
        assert_eq!(emitted.started_timers().len(), 1);
    }

    #[test]
    fn sensor_tick_fetches_reading() {
        let mut model = Model::default();
        let _ = initialize(&mut model);
        let sensor = model.sensor_timer.expect("sensor channel should be running");

        let emitted = Emitted::from_command(handle_sensor_tick(sensor, &mut model));

        let requests = emitted.requests_to("/Sensor");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
    }

    #[test]
    fn stale_sensor_events_are_dropped() {
        let mut model = Model::default();
        let _ = initialize(&mut model);
        let stale = model.sensor_timer.expect("sensor channel should be running");
        let _ = initialize(&mut model);

        let tick = Emitted::from_command(handle_sensor_tick(stale, &mut model));
        let response = Emitted::from_command(handle(
            DeviceEvent::SensorResponse {
                handle: stale,
                result: Ok(reading()),
            },
            &mut model,
        ));

        assert!(tick.is_empty());
        assert!(response.is_empty());
        assert!(model.sensor.is_none());
    }

    #[test]
    fn empty_local_time_keeps_previous_value() {
        let mut model = Model::default();
        let _ = initialize(&mut model);
        let clock = model
            .local_time_timer
            .expect("clock channel should be running");
        model.local_time = Some("12:00:00".to_string());

        let emitted = Emitted::from_command(handle(
            DeviceEvent::LocalTimeResponse {
                handle: clock,
                result: Ok(None),
            },
            &mut model,
        ));

        assert_eq!(model.local_time.as_deref(), Some("12:00:00"));
        assert_eq!(
            emitted.started_timers(),
            vec![(clock.id, LOCAL_TIME_POLL_INTERVAL_MS)]
        );
    }

    #[test]
    fn local_time_response_sets_time() {
        let mut model = Model::default();
        let _ = initialize(&mut model);
        let clock = model
            .local_time_timer
            .expect("clock channel should be running");

        let _ = handle(
            DeviceEvent::LocalTimeResponse {
                handle: clock,
                result: Ok(Some(LocalTime {
                    time: "Mon Jul 17 10:10:00 2023".to_string(),
                })),
            },
            &mut model,
        );

        assert_eq!(model.local_time.as_deref(), Some("Mon Jul 17 10:10:00 2023"));
    }
}
