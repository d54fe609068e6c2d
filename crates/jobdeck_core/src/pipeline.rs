use crate::{ApplicationStatus, PipelineRecord};

/// One fixed display stage of the application pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineColumn {
    pub key: ApplicationStatus,
    pub label: &'static str,
}

/// The six pipeline columns, in display order.
pub const PIPELINE_COLUMNS: [PipelineColumn; 6] = [
    PipelineColumn {
        key: ApplicationStatus::Applied,
        label: "Applied",
    },
    PipelineColumn {
        key: ApplicationStatus::Responded,
        label: "Responded",
    },
    PipelineColumn {
        key: ApplicationStatus::Interviewing,
        label: "Interviewing",
    },
    PipelineColumn {
        key: ApplicationStatus::TechnicalTest,
        label: "Tech Test",
    },
    PipelineColumn {
        key: ApplicationStatus::Offer,
        label: "Offer",
    },
    PipelineColumn {
        key: ApplicationStatus::Rejected,
        label: "Rejected",
    },
];

/// Application records partitioned into the six fixed stage buckets.
///
/// All six keys are always present; within a bucket the server-provided
/// relative order of records is preserved. Records whose status matches no
/// known column key are folded into the `applied` bucket and counted in
/// `unrecognized` so callers can surface the reclassification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineBoard {
    buckets: [Vec<PipelineRecord>; 6],
    pub unrecognized: usize,
}

/// Partitions an unordered sequence of records into the pipeline board.
pub fn group_applications(records: Vec<PipelineRecord>) -> PipelineBoard {
    let mut board = PipelineBoard::default();
    for record in records {
        match ApplicationStatus::from_key(&record.status) {
            Some(status) => board.buckets[column_index(status)].push(record),
            None => {
                board.unrecognized += 1;
                board.buckets[column_index(ApplicationStatus::Applied)].push(record);
            }
        }
    }
    board
}

impl PipelineBoard {
    pub fn column(&self, key: ApplicationStatus) -> &[PipelineRecord] {
        &self.buckets[column_index(key)]
    }

    /// Total records across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

fn column_index(status: ApplicationStatus) -> usize {
    match status {
        ApplicationStatus::Applied => 0,
        ApplicationStatus::Responded => 1,
        ApplicationStatus::Interviewing => 2,
        ApplicationStatus::TechnicalTest => 3,
        ApplicationStatus::Offer => 4,
        ApplicationStatus::Rejected => 5,
    }
}
