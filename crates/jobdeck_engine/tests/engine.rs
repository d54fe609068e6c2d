use std::time::{Duration, Instant};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobdeck_engine::{ApiSettings, EngineEvent, EngineHandle, PollSettings};

fn handle_for(server: &MockServer) -> EngineHandle {
    let settings = ApiSettings {
        base_url: format!("{}/api/v1", server.uri()),
        ..ApiSettings::default()
    };
    let poll = PollSettings {
        interval: Duration::from_millis(20),
        retry_delay: Duration::from_millis(10),
        max_attempts: 3,
    };
    EngineHandle::new(&settings, poll).expect("engine")
}

async fn next_event(handle: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = handle.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "no event within deadline");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn submit_failure_comes_back_as_an_event_not_a_fault() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/applications/mass-apply"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Some job IDs not found"))
        .mount(&server)
        .await;

    let handle = handle_for(&server);
    handle.commands().submit_batch(vec!["a".to_string()]);

    match next_event(&handle).await {
        EngineEvent::BatchSubmitFailed { message } => {
            assert!(message.contains("Some job IDs not found"));
            assert!(message.contains("400"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn watch_task_streams_snapshots_until_done() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/applications/mass-apply"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"task_id": "t9", "total": 1})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/applications/mass-apply/t9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "t9",
            "total": 1,
            "completed": 1,
            "failed": 0,
            "current_job": null,
            "results": [
                {"job_id": "a", "job_title": "Backend Engineer", "status": "done"}
            ],
            "done": true,
        })))
        .mount(&server)
        .await;

    let handle = handle_for(&server);
    let commands = handle.commands();
    commands.submit_batch(vec!["a".to_string()]);

    let task_id = match next_event(&handle).await {
        EngineEvent::BatchSubmitted { task_id, total } => {
            assert_eq!(total, 1);
            task_id
        }
        other => panic!("unexpected event {other:?}"),
    };
    commands.watch_task(task_id);

    match next_event(&handle).await {
        EngineEvent::TaskSnapshot { snapshot } => {
            assert_eq!(snapshot.task_id, "t9");
            assert!(snapshot.done);
        }
        other => panic!("unexpected event {other:?}"),
    }
}
