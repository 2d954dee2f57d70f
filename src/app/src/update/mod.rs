mod device;
mod ota;
mod ui;
mod wifi;

use crux_core::{render::render, Command};

use crate::commands::timer::TimerOutput;
use crate::events::Event;
use crate::model::Model;
use crate::scheduler::{TimerChannel, TimerHandle};
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Initialize => Command::all([
            render(),
            device::initialize(model),
            ota::check_status(),
            wifi::fetch_connect_info(),
        ]),

        Event::Wifi(wifi_event) => wifi::handle(wifi_event, model),
        Event::Ota(ota_event) => ota::handle(ota_event, model),
        Event::Device(device_event) => device::handle(device_event, model),
        Event::Ui(ui_event) => ui::handle(ui_event, model),

        Event::Tick { handle, output } => handle_tick(handle, output, model),
    }
}

/// Route a resolved timer to the owner of its channel
fn handle_tick(handle: TimerHandle, output: TimerOutput, model: &mut Model) -> Command<Effect, Event> {
    if output == TimerOutput::Cleared {
        return Command::done();
    }

    match handle.channel {
        TimerChannel::WifiStatus => wifi::handle_status_tick(handle, model),
        TimerChannel::Reload => wifi::handle_reload_tick(handle, model),
        TimerChannel::OtaCountdown => ota::handle_countdown_tick(handle, model),
        TimerChannel::Sensor => device::handle_sensor_tick(handle, model),
        TimerChannel::LocalTime => device::handle_local_time_tick(handle, model),
    }
}
