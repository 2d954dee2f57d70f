//! Recurring timers for the device page.
//!
//! Each poll channel owns at most one [`TimerHandle`] at a time, stored in a
//! slot on the model. Ticks are one-shot: the owner re-arms the handle once it
//! has finished processing a tick (usually when the poll response arrived), so
//! a slow device never sees two overlapping polls from the same channel.
//!
//! Ticks and responses carry the handle they were issued for. Anything that
//! does not match the handle currently held by the slot is stale and must be
//! dropped by the owner; see [`TimerHandle::is_current`].

use crux_core::Command;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::{Effect, TimerCmd};

/// Logical timer slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimerChannel {
    WifiStatus,
    OtaCountdown,
    Reload,
    Sensor,
    LocalTime,
}

/// Identity of one started timer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub channel: TimerChannel,
    pub id: u64,
}

impl TimerHandle {
    /// Whether this handle is the one currently held by `slot`
    pub fn is_current(&self, slot: Option<TimerHandle>) -> bool {
        slot == Some(*self)
    }
}

/// Allocates timer handles and builds the timer commands.
///
/// The scheduler is channel agnostic. Keeping a single timer per channel is up
/// to the callers, which use [`PollingScheduler::restart`] and
/// [`PollingScheduler::cancel`] on their slot.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollingScheduler {
    next_id: u64,
}

impl PollingScheduler {
    /// Allocate a new handle and arm its first tick after `interval_ms`.
    pub fn start(
        &mut self,
        channel: TimerChannel,
        interval_ms: u64,
    ) -> (TimerHandle, Command<Effect, Event>) {
        let handle = self.allocate(channel);
        log::debug!("start timer {handle:?} ({interval_ms} ms)");
        (handle, Self::arm(handle, interval_ms))
    }

    fn allocate(&mut self, channel: TimerChannel) -> TimerHandle {
        self.next_id += 1;
        TimerHandle {
            channel,
            id: self.next_id,
        }
    }

    /// Arm the next tick of an already started handle.
    pub fn arm(handle: TimerHandle, interval_ms: u64) -> Command<Effect, Event> {
        TimerCmd::start(handle.id, interval_ms)
            .build()
            .then_send(move |output| Event::Tick { handle, output })
    }

    /// Stop a timer. Safe to call with `None` or with a handle that already fired.
    pub fn stop(handle: Option<TimerHandle>) -> Command<Effect, Event> {
        match handle {
            Some(handle) => {
                log::debug!("stop timer {handle:?}");
                TimerCmd::clear(handle.id)
            }
            None => Command::done(),
        }
    }

    /// Stop whatever `slot` holds, then start a new timer and store it in `slot`.
    pub fn restart(
        &mut self,
        slot: &mut Option<TimerHandle>,
        channel: TimerChannel,
        interval_ms: u64,
    ) -> Command<Effect, Event> {
        let stop = Self::stop(slot.take());
        let (handle, start) = self.start(channel, interval_ms);
        *slot = Some(handle);
        Command::all([stop, start])
    }

    /// Stop whatever `slot` holds and store a fresh handle without arming it.
    /// The owner polls right away and arms the handle from the response.
    pub fn renew(
        &mut self,
        slot: &mut Option<TimerHandle>,
        channel: TimerChannel,
    ) -> (TimerHandle, Command<Effect, Event>) {
        let stop = Self::stop(slot.take());
        let handle = self.allocate(channel);
        *slot = Some(handle);
        (handle, stop)
    }

    /// Empty `slot` and stop the timer it held.
    pub fn cancel(slot: &mut Option<TimerHandle>) -> Command<Effect, Event> {
        Self::stop(slot.take())
    }
}
