use crate::{ApplicationPatch, JobId, NewApplication};

/// IO the update function requests from the driver. The pure core never
/// performs these itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch a page of the job list with the given query.
    FetchJobs { query: Vec<(String, String)> },
    /// Fire `Msg::SearchSettled { generation }` after the settle delay.
    ScheduleSearchSettle { generation: u64 },
    /// Submit the whole selection snapshot as one mass-apply request.
    SubmitBatch { job_ids: Vec<JobId> },
    /// Attach the progress poller to a server-assigned task.
    WatchTask { task_id: String },
    /// Stop client-side observation of the current task. The server-side
    /// task itself is never cancelled.
    DetachPoll,
    /// Fetch the flat application list for the pipeline view.
    FetchPipeline,
    /// Create one application outside the batch flow.
    CreateApplication { request: NewApplication },
    /// Partially update one application.
    UpdateApplication {
        application_id: String,
        patch: ApplicationPatch,
    },
}
