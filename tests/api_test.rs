//! HTTP API tests driving the router in-process

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use common::{test_config, TempDir};
use home_ir::core::mock::MockTransmitter;
use home_ir::{create_router, AppState, TransmitError};

struct Harness {
    light: TempDir,
    ac: TempDir,
    transmitter: Arc<MockTransmitter>,
    app: Router,
}

impl Harness {
    fn new(transmitter: MockTransmitter) -> Self {
        let light = TempDir::new("light");
        let ac = TempDir::new("ac");
        let transmitter = Arc::new(transmitter);
        let state = AppState::with_transmitter(test_config(&light, &ac), transmitter.clone());
        let app = create_router(Arc::new(state));
        Self {
            light,
            ac,
            transmitter,
            app,
        }
    }

    async fn send(&self, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri).await
    }

    async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::POST, uri).await
    }
}

#[tokio::test]
async fn test_light_on_success() {
    let h = Harness::new(MockTransmitter::ok());
    let file = h.light.write("light_on.txt", "+900 -450");

    let (status, body) = h.get("/light/on").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "mode": "on",
            "success": true,
            "message": "Light set to on mode successfully"
        })
    );
    assert_eq!(h.transmitter.sent(), vec![file]);
}

#[tokio::test]
async fn test_ac_resource_missing() {
    let h = Harness::new(MockTransmitter::ok());

    let (status, body) = h.post("/ac/aircon/on").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "ACResourceNotFoundError");
    assert!(body["detail"].as_str().unwrap().contains("aircon_on"));
    assert!(h.transmitter.sent().is_empty(), "nothing sent without a file");
}

#[tokio::test]
async fn test_light_transmission_timeout() {
    let h = Harness::new(MockTransmitter::failing(TransmitError::Timeout));
    h.light.write("light_dark.txt", "+900 -450");

    let (status, body) = h.get("/light/dark").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_type"], "IRTransmissionError");
    assert_eq!(
        body["detail"],
        "Failed to transmit IR signal for mode 'dark': IR transmission timed out"
    );
}

#[tokio::test]
async fn test_non_zero_exit_detail() {
    let h = Harness::new(MockTransmitter::failing(TransmitError::NonZeroExit {
        code: Some(1),
        stderr: "device busy".to_string(),
    }));
    h.ac.write("ac_timer_up.txt", "+900 -450");

    let (status, body) = h.post("/ac/timer/up").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        "Failed to transmit IR signal for action 'timer_up': Command failed with code 1: device busy"
    );
}

#[tokio::test]
async fn test_get_and_post_are_equivalent() {
    let h = Harness::new(MockTransmitter::ok());
    h.ac.write("ac_heater_temp_down.txt", "+900 -450");

    let (get_status, get_body) = h.get("/ac/heater/temp/down").await;
    let (post_status, post_body) = h.post("/ac/heater/temp/down").await;

    assert_eq!(get_status, StatusCode::OK);
    assert_eq!(post_status, StatusCode::OK);
    assert_eq!(get_body, post_body);
    assert_eq!(get_body["action"], "heater_temp_down");
    assert_eq!(
        get_body["message"],
        "Temperature control heater_temp_down executed successfully"
    );
    assert_eq!(h.transmitter.sent().len(), 2);
}

#[tokio::test]
async fn test_all_bright_route() {
    let h = Harness::new(MockTransmitter::ok());
    h.light.write("light_all_bright.txt", "+900 -450");

    let (status, body) = h.post("/light/all-bright").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "all_bright");
}

#[tokio::test]
async fn test_discovery_endpoints() {
    let h = Harness::new(MockTransmitter::ok());

    let (status, body) = h.get("/light/modes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["all_bright", "bright", "dark", "off", "on"]));

    let (status, body) = h.get("/ac/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "available_modes": ["aircon_on", "heater_on", "off"],
            "available_temp_controls": ["aircon_temp_up", "heater_temp_up", "heater_temp_down"],
            "available_timer_controls": ["timer_on", "timer_up", "timer_down"]
        })
    );
}

#[tokio::test]
async fn test_command_by_name() {
    let h = Harness::new(MockTransmitter::ok());
    h.light.write("light_bright.txt", "+900 -450");
    h.ac.write("ac_off.txt", "+900 -450");

    let (status, body) = h.post("/light/mode/bright").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "bright");

    let (status, body) = h.get("/ac/command/off").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "off");
    assert_eq!(body["message"], "AC set to off mode successfully");
}

#[tokio::test]
async fn test_unknown_command_name() {
    let h = Harness::new(MockTransmitter::ok());

    let (status, body) = h.get("/light/mode/disco").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "ValueError");
    assert_eq!(body["expected"].as_array().map(|a| a.len()), Some(5));

    let (status, body) = h.post("/ac/command/fan_on").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["expected"].as_array().map(|a| a.len()), Some(9));

    assert!(h.transmitter.sent().is_empty());
}

#[tokio::test]
async fn test_stats_counts() {
    let h = Harness::new(MockTransmitter::ok());
    h.light.write("light_on.txt", "+900 -450");

    h.get("/light/on").await;
    h.get("/ac/aircon/on").await;
    h.get("/light/mode/disco").await;

    let (status, body) = h.get("/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_commands"], 2);
    assert_eq!(body["total_sent"], 1);
    assert_eq!(body["total_resource_missing"], 1);
    assert_eq!(body["total_failed"], 0);
    assert_eq!(body["errors_by_code"]["RES_NOT_FOUND"], 1);
    assert_eq!(body["last_command"]["command"], "aircon_on");
    assert_eq!(body["last_command"]["outcome"], "resource_missing");
}

#[tokio::test]
async fn test_service_endpoints() {
    let h = Harness::new(MockTransmitter::ok());

    let (status, body) = h.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["endpoints"]["light_control"], "/light");

    let (status, body) = h.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["transmitter_device"], "/dev/lirc-test");
}

#[tokio::test]
async fn test_unknown_route() {
    let h = Harness::new(MockTransmitter::ok());

    let (status, body) = h.get("/garage/open").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn test_request_id_header() {
    let h = Harness::new(MockTransmitter::ok());
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = h.app.clone().oneshot(request).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unreadable_resource_dir_is_server_error() {
    let light = TempDir::new("light");
    let ac = TempDir::new("ac");
    let mut config = (*test_config(&light, &ac)).clone();
    // Component longer than NAME_MAX: the lookup itself fails
    config.light_resources_dir = light.path().join("x".repeat(300));
    let transmitter = Arc::new(MockTransmitter::ok());
    let state = AppState::with_transmitter(Arc::new(config), transmitter.clone());
    let app = create_router(Arc::new(state));

    let request = Request::builder().uri("/light/on").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error_type"], "ResourceReadError");
    assert!(transmitter.sent().is_empty());
}
