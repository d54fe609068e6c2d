//! Jobdeck engine: HTTP client, progress poller and effect execution.
mod client;
mod engine;
mod poller;
mod types;

pub use client::{ApiSettings, HttpApi, JobBoardApi};
pub use engine::{EngineCommands, EngineHandle};
pub use poller::{poll_task, ChannelProgressSink, PollSettings, ProgressSink};
pub use types::{ApiError, ApiFailure, EngineEvent};
