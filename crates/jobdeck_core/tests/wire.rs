use jobdeck_core::{
    ApplicationPatch, ApplicationStatus, BatchItemStatus, BatchSnapshot, NewApplication,
};

#[test]
fn batch_snapshot_decodes_from_server_json() {
    let body = r#"{
        "task_id": "t9",
        "total": 3,
        "completed": 2,
        "failed": 1,
        "current_job": null,
        "results": [
            {"job_id": "a", "job_title": "Backend Engineer", "status": "done"},
            {"job_id": "b", "job_title": "Data Engineer", "status": "skipped", "error": "Already applied"},
            {"job_id": "c", "job_title": "Unknown", "status": "failed", "error": "Job not found"}
        ],
        "done": true
    }"#;

    let snapshot: BatchSnapshot = serde_json::from_str(body).expect("valid snapshot");
    assert_eq!(snapshot.task_id, "t9");
    assert_eq!(snapshot.processed(), 3);
    assert_eq!(snapshot.count_with_status(BatchItemStatus::Done), 1);
    assert_eq!(snapshot.count_with_status(BatchItemStatus::Skipped), 1);
    assert_eq!(snapshot.results[2].error.as_deref(), Some("Job not found"));
    assert!(snapshot.done);
}

#[test]
fn snapshot_tolerates_missing_optional_fields() {
    let body = r#"{"task_id": "t1", "total": 5, "completed": 0, "failed": 0, "done": false}"#;
    let snapshot: BatchSnapshot = serde_json::from_str(body).expect("valid snapshot");
    assert!(snapshot.current_job.is_none());
    assert!(snapshot.results.is_empty());
}

#[test]
fn application_patch_serializes_only_present_fields() {
    let patch = ApplicationPatch::status(ApplicationStatus::Interviewing);
    let body = serde_json::to_value(&patch).expect("serializable");
    assert_eq!(body, serde_json::json!({"status": "interviewing"}));
}

#[test]
fn new_application_omits_absent_optionals() {
    let request = NewApplication {
        job_id: "job-1".to_string(),
        cover_letter: None,
        resume_version: Some("v2".to_string()),
    };
    let body = serde_json::to_value(&request).expect("serializable");
    assert_eq!(
        body,
        serde_json::json!({"job_id": "job-1", "resume_version": "v2"})
    );
}

#[test]
fn application_status_keys_round_trip() {
    for status in ApplicationStatus::ALL {
        assert_eq!(ApplicationStatus::from_key(status.key()), Some(status));
    }
    assert_eq!(ApplicationStatus::from_key("ghosted"), None);
}
