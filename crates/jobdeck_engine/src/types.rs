use std::fmt;

use jobdeck_core::{ApplicationRecord, BatchSnapshot, JobPage, PipelineRecord};

/// Everything the engine reports back to the driver.
///
/// API failures arrive as `*Failed` variants carrying a display message;
/// nothing crosses the channel as an error type and nothing panics.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    JobsFetched { page: JobPage },
    JobsFetchFailed { message: String },
    BatchSubmitted { task_id: String, total: u32 },
    BatchSubmitFailed { message: String },
    /// The poller observed a progress snapshot for the watched task.
    TaskSnapshot { snapshot: BatchSnapshot },
    /// The poller exhausted its retry budget; the task outcome is unknown
    /// to the client from here on.
    TaskStalled { task_id: String },
    PipelineFetched { records: Vec<PipelineRecord> },
    PipelineFetchFailed { message: String },
    ApplicationCreated { record: ApplicationRecord },
    ApplicationCreateFailed { message: String },
    ApplicationUpdated { record: ApplicationRecord },
    ApplicationUpdateFailed { message: String },
}

/// A failed API call, with the HTTP status when one was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// Non-2xx response; the message carries the plain-text error body.
    Http(u16),
    Timeout,
    Network,
    /// The response body could not be decoded as the expected JSON shape.
    Decode,
    InvalidBaseUrl,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Http(status) => write!(f, "http status {status}"),
            ApiFailure::Timeout => write!(f, "timeout"),
            ApiFailure::Network => write!(f, "network error"),
            ApiFailure::Decode => write!(f, "decode error"),
            ApiFailure::InvalidBaseUrl => write!(f, "invalid base url"),
        }
    }
}
