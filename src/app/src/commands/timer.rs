//! Timer command definitions.
//!
//! The Shell owns the actual timers (`setTimeout`). Every `Start` is a one-shot
//! request that the Shell resolves once: with `Fired` when the delay elapsed, or
//! with `Cleared` when a `Clear` for the same id arrived first.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

// Operations that the Shell needs to perform for timers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOperation {
    Start { id: u64, millis: u64 },
    Clear { id: u64 },
}

// The output of a started timer (shell tells us how it ended)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOutput {
    Fired,
    Cleared,
}

impl Operation for TimerOperation {
    type Output = TimerOutput;
}

/// Command-based timer API
pub struct Timer<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Timer<Effect, Event>
where
    Effect: Send + From<crux_core::Request<TimerOperation>> + 'static,
    Event: Send + 'static,
{
    /// Arm a one-shot timer that resolves after `millis`
    pub fn start(id: u64, millis: u64) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(TimerOperation::Start { id, millis })
    }

    /// Clear a timer. Clearing an unknown or already fired id is a no-op in the Shell.
    pub fn clear(id: u64) -> Command<Effect, Event> {
        Command::new(move |ctx| async move {
            ctx.notify_shell(TimerOperation::Clear { id });
        })
    }
}

/// Request builder for timer operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: TimerOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<TimerOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: TimerOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = TimerOutput>> {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
