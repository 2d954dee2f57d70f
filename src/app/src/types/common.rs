use serde::{Deserialize, Serialize};

/// How a status text should be styled by the Shell
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Info,
    Success,
    Error,
}

/// A rendered status line (WiFi connection, firmware update)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusText {
    kind: StatusKind,
    text: String,
}

impl StatusText {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
