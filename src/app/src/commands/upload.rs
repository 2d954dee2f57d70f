//! Firmware upload command definitions.
//!
//! `crux_http` cannot send multipart bodies or report upload progress, so the
//! Shell performs the upload with the file it holds from the file picker.
//! Progress is reported back as `OtaEvent::UploadProgress` events while the
//! request is pending; the request resolves once the transfer has finished.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

// Operations that the Shell needs to perform for uploads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadOperation {
    /// POST the selected file as multipart form data under `field_name`
    Send { url: String, field_name: String },
}

// The output of an upload (shell tells us how the transfer ended)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadOutput {
    Completed,
    Failed { message: String },
}

impl Operation for UploadOperation {
    type Output = UploadOutput;
}

/// Command-based upload API
pub struct Upload<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Upload<Effect, Event>
where
    Effect: Send + From<crux_core::Request<UploadOperation>> + 'static,
    Event: Send + 'static,
{
    /// Upload the selected file to `url`
    pub fn send(
        url: impl Into<String>,
        field_name: impl Into<String>,
    ) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(UploadOperation::Send {
            url: url.into(),
            field_name: field_name.into(),
        })
    }
}

/// Request builder for upload operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: UploadOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<UploadOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: UploadOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = UploadOutput>>
    {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
