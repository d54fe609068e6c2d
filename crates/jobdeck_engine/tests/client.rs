use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobdeck_core::{ApplicationPatch, ApplicationStatus, NewApplication};
use jobdeck_engine::{ApiFailure, ApiSettings, HttpApi, JobBoardApi};

fn api_for(server: &MockServer) -> HttpApi {
    let settings = ApiSettings {
        base_url: format!("{}/api/v1", server.uri()),
        ..ApiSettings::default()
    };
    HttpApi::new(&settings).expect("client")
}

fn application_body(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "job_id": "job-1",
        "applied_at": "2026-07-01T12:00:00Z",
        "cover_letter": null,
        "resume_version": null,
        "status": status,
        "follow_up_date": null,
        "interview_notes": null,
        "notes": null,
        "created_at": "2026-07-01T12:00:00Z",
    })
}

#[tokio::test]
async fn submit_mass_apply_posts_the_id_list_as_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/applications/mass-apply"))
        .and(body_json(serde_json::json!({"job_ids": ["a", "b", "c"]})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"task_id": "t9", "total": 3})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let job_ids: Vec<String> = ["a", "b", "c"].iter().map(|id| id.to_string()).collect();
    let started = api.submit_mass_apply(&job_ids).await.expect("submit ok");
    assert_eq!(started.task_id, "t9");
    assert_eq!(started.total, 3);
}

#[tokio::test]
async fn non_2xx_bodies_become_typed_errors_with_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/applications/mass-apply"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Some job IDs not found"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api
        .submit_mass_apply(&["a".to_string()])
        .await
        .expect_err("must fail");
    assert_eq!(err.kind, ApiFailure::Http(400));
    assert_eq!(err.message, "Some job IDs not found");
}

#[tokio::test]
async fn task_progress_decodes_the_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/applications/mass-apply/t9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "t9",
            "total": 2,
            "completed": 1,
            "failed": 0,
            "current_job": "Backend Engineer at Acme",
            "results": [
                {"job_id": "a", "job_title": "Backend Engineer", "status": "done"}
            ],
            "done": false,
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let snapshot = api.task_progress("t9").await.expect("progress ok");
    assert_eq!(snapshot.processed(), 1);
    assert_eq!(
        snapshot.current_job.as_deref(),
        Some("Backend Engineer at Acme")
    );
    assert!(!snapshot.done);
}

#[tokio::test]
async fn list_jobs_carries_the_query_pairs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/"))
        .and(query_param("search", "rust"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{
                "id": "job-1",
                "title": "Rust Engineer",
                "company": "Acme",
                "location": "Remote",
                "source": "remoteok",
                "salary_min": 90000,
                "salary_max": 120000,
                "is_remote": true,
                "match_score": 81.5,
                "status": "new",
            }],
            "total": 1,
            "skip": 0,
            "limit": 20,
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let query = vec![
        ("search".to_string(), "rust".to_string()),
        ("skip".to_string(), "0".to_string()),
        ("limit".to_string(), "20".to_string()),
    ];
    let page = api.list_jobs(&query).await.expect("jobs ok");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "Rust Engineer");
}

#[tokio::test]
async fn create_application_posts_to_the_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/applications/"))
        .and(body_json(serde_json::json!({
            "job_id": "job-1",
            "cover_letter": "Dear team",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(application_body("app-1", "applied")))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let record = api
        .create_application(&NewApplication {
            job_id: "job-1".to_string(),
            cover_letter: Some("Dear team".to_string()),
            resume_version: None,
        })
        .await
        .expect("create ok");
    assert_eq!(record.id, "app-1");
    assert_eq!(record.status, "applied");
}

#[tokio::test]
async fn update_application_patches_only_present_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/applications/app-1"))
        .and(body_json(serde_json::json!({"status": "interviewing"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(application_body("app-1", "interviewing")),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let record = api
        .update_application("app-1", &ApplicationPatch::status(ApplicationStatus::Interviewing))
        .await
        .expect("update ok");
    assert_eq!(record.status, "interviewing");
}

#[tokio::test]
async fn pipeline_fetch_decodes_joined_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/applications/pipeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "app-1",
            "job_id": "job-1",
            "job_title": "Rust Engineer",
            "job_company": "Acme",
            "job_url": "https://example.com/job-1",
            "job_score": 81.5,
            "applied_at": "2026-07-01T12:00:00Z",
            "cover_letter": null,
            "resume_version": null,
            "status": "responded",
            "follow_up_date": null,
            "interview_notes": null,
            "notes": null,
            "created_at": "2026-07-01T12:00:00Z",
        }])))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let records = api.pipeline().await.expect("pipeline ok");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].job_company, "Acme");
    assert_eq!(records[0].status, "responded");
}

#[tokio::test]
async fn base_url_without_trailing_slash_still_resolves() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/applications/pipeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    // No trailing slash on the base; the last path segment must survive.
    let settings = ApiSettings {
        base_url: format!("{}/api/v1", server.uri()),
        ..ApiSettings::default()
    };
    let api = HttpApi::new(&settings).expect("client");
    let records = api.pipeline().await.expect("pipeline ok");
    assert!(records.is_empty());
}
