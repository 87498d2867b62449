//! The `{status, data}` envelope wrapped around every JSON response.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
    Error,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            message: None,
        }
    }

    pub fn fail(data: T) -> Self {
        Self {
            status: Status::Fail,
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope<()> {
    /// Success without a payload.
    pub fn ack() -> Self {
        Self {
            status: Status::Success,
            data: None,
            message: None,
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            status: Status::Error,
            data: None,
            message: Some(message),
        }
    }
}
