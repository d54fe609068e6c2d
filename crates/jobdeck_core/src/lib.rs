//! Jobdeck core: pure state machine and view-model helpers.
//!
//! No IO happens here. The driver feeds [`Msg`]s into [`update`] and
//! executes the returned [`Effect`]s; the engine's results come back as
//! further msgs.
mod effect;
mod filters;
mod msg;
mod pipeline;
mod selection;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use filters::{JobFilters, PAGE_SIZE, SEARCH_SETTLE_MS};
pub use msg::Msg;
pub use pipeline::{group_applications, PipelineBoard, PipelineColumn, PIPELINE_COLUMNS};
pub use selection::SelectionSet;
pub use state::{AppState, BatchState};
pub use types::{
    ApplicationPatch, ApplicationRecord, ApplicationStatus, BatchItemResult, BatchItemStatus,
    BatchSnapshot, BatchStarted, JobId, JobListing, JobPage, JobSummary, NewApplication,
    PipelineRecord,
};
pub use update::update;
pub use view_model::{AppViewModel, BatchView, ColumnView, JobRowView};
