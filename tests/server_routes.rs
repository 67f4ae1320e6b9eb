use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use humanizer::{AppState, Humanizer, HumanizerConfig, PhraseTable, UNPROCESSABLE_MESSAGE, build_router};

const LONG_TEXT: &str = "Automated writing tools produce consistent prose. \
    That consistency can feel flat to many readers over time.";

fn app_with(config: HumanizerConfig) -> axum::Router {
    let humanizer =
        Humanizer::new(config, std::sync::Arc::new(PhraseTable::default())).expect("valid config");
    build_router(AppState::new(humanizer).with_seed(Some(42)))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body must be readable")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body must be utf-8")
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request builder should not fail")
}

fn json_request(value: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/humanize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(value.to_string()))
        .expect("request builder should not fail")
}

#[tokio::test]
async fn healthz_returns_ok_json() {
    let response = app_with(HumanizerConfig::default())
        .oneshot(
            Request::builder()
                .uri("/v1/healthz")
                .body(Body::empty())
                .expect("request builder should not fail"),
        )
        .await
        .expect("healthz handler should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(value, json!({ "status": "ok" }));
}

#[tokio::test]
async fn index_renders_empty_form() {
    let response = app_with(HumanizerConfig::default())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .expect("content-type header present")
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"), "{content_type}");

    let body = body_string(response).await;
    assert!(body.contains("name=\"input_text\""));
    assert!(!body.contains("class=\"result\""));
    // No LLM client configured
    assert!(!body.contains("<select"));
}

#[tokio::test]
async fn form_submission_renders_paragraph_markup() {
    let response = app_with(HumanizerConfig::disabled())
        .oneshot(form_request(
            "input_text=Automated+writing+tools+produce+consistent+prose.+That+consistency+can+feel+flat+to+many+readers+over+time.",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(
        "<p>Automated writing tools produce consistent prose. That consistency can feel flat to many readers over time.</p>"
    ));
}

#[tokio::test]
async fn form_submission_too_short_shows_message() {
    let response = app_with(HumanizerConfig::default())
        .oneshot(form_request("input_text=Hi."))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains(UNPROCESSABLE_MESSAGE));
}

#[tokio::test]
async fn blank_form_submission_has_no_result() {
    let response = app_with(HumanizerConfig::default())
        .oneshot(form_request("input_text=+++"))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(!body.contains("class=\"result\""));
}

#[tokio::test]
async fn llm_engine_without_client_is_reported() {
    let response = app_with(HumanizerConfig::default())
        .oneshot(form_request("input_text=Some+text+here&engine=llm"))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains(humanizer::server::LLM_DISABLED_MESSAGE));
}

#[tokio::test]
async fn json_api_is_reproducible_with_seed() {
    let request = json!({ "text": LONG_TEXT, "mode": "plain", "seed": 7 });

    let first = app_with(HumanizerConfig::historical())
        .oneshot(json_request(request.clone()))
        .await
        .unwrap();
    let second = app_with(HumanizerConfig::historical())
        .oneshot(json_request(request))
        .await
        .unwrap();

    let first: Value = serde_json::from_str(&body_string(first).await).unwrap();
    let second: Value = serde_json::from_str(&body_string(second).await).unwrap();

    assert_eq!(first["status"], "humanized");
    assert_eq!(first, second);
    assert!(first.get("rejection").is_none());
}

#[tokio::test]
async fn json_api_reports_rejection() {
    let response = app_with(HumanizerConfig::default())
        .oneshot(json_request(json!({ "text": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(value["status"], "rejected");
    assert_eq!(value["output"], UNPROCESSABLE_MESSAGE);
    assert_eq!(value["rejection"], json!({ "reason": "empty_input" }));
}
