use crate::{
    ApplicationPatch, ApplicationStatus, BatchSnapshot, JobId, JobPage, NewApplication,
    PipelineRecord,
};

/// Every event the state machine can receive, from the user or the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Job list and selection.
    /// User toggled one job's membership in the selection set.
    JobToggled(JobId),
    /// User activated the "select all on current page" control.
    PageToggled { page_ids: Vec<JobId> },
    /// User cleared the whole selection.
    SelectionCleared,
    /// Engine delivered a page of the job list.
    JobsLoaded { page: JobPage },
    JobsLoadFailed { message: String },

    // Filter/query synchronization.
    /// User edited the free-text search box (raw, not yet settled).
    SearchEdited(String),
    /// The settle timer for a given edit generation elapsed.
    SearchSettled { generation: u64 },
    StatusFilterSet(String),
    SourceFilterSet(String),
    MinScoreSet(Option<u32>),
    MinSalarySet(Option<u64>),
    /// User moved to another page of the list.
    PageRequested { skip: u32 },

    // Mass-apply workflow.
    /// User opened the mass-apply dialog over the current selection.
    BatchOpened,
    /// User confirmed the batch; submit the snapshot as one request.
    BatchStartClicked,
    BatchSubmitSucceeded { task_id: String, total: u32 },
    BatchSubmitFailed { message: String },
    /// The poller observed a task snapshot.
    SnapshotReceived { snapshot: BatchSnapshot },
    /// The poller exhausted its retry budget; the task outcome is unknown.
    PollStalled { task_id: String },
    /// User closed the dialog, from any phase.
    BatchClosed,

    // Single apply.
    /// User applied to one job outside the batch flow.
    ApplyRequested { request: NewApplication },
    ApplyCompleted,
    ApplyFailed { message: String },

    // Pipeline view.
    PipelineLoaded { records: Vec<PipelineRecord> },
    PipelineLoadFailed { message: String },
    /// User moved an application to another stage.
    StatusChangeRequested {
        application_id: String,
        status: ApplicationStatus,
    },
    /// User edited an application's notes or follow-up data.
    ApplicationEditRequested {
        application_id: String,
        patch: ApplicationPatch,
    },
    ApplicationUpdated,
    ApplicationUpdateFailed { message: String },
}
