//! Page command definitions.
//!
//! Fire-and-forget browser actions. The Shell never answers these.

use crux_core::{capability::Operation, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PageOperation {
    /// Full reload of the page (`location.reload`)
    Reload,
    /// Blocking user notification (`window.alert`)
    Alert { message: String },
}

impl Operation for PageOperation {
    type Output = ();
}

/// Command-based page API
pub struct Page<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Page<Effect, Event>
where
    Effect: Send + From<crux_core::Request<PageOperation>> + 'static,
    Event: Send + 'static,
{
    pub fn reload() -> Command<Effect, Event> {
        Self::notify(PageOperation::Reload)
    }

    pub fn alert(message: impl Into<String>) -> Command<Effect, Event> {
        Self::notify(PageOperation::Alert {
            message: message.into(),
        })
    }

    fn notify(operation: PageOperation) -> Command<Effect, Event> {
        Command::new(move |ctx| async move {
            ctx.notify_shell(operation);
        })
    }
}
