use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use spamsift::ml::{EstimatorArtifact, ModelArtifact, VectorizerArtifact};
use spamsift::normalizer::NormalizerConfig;
use spamsift::service::SpamClassifier;
use spamsift::web::handlers::{ApiError, ClassifyResponse, HealthResponse};
use spamsift::web::router;

fn app() -> Router {
    let vocabulary: HashMap<String, usize> = ["free", "prize", "claim", "hello", "today"]
        .iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), i))
        .collect();
    let vectorizer = VectorizerArtifact::new(vocabulary, Some(vec![1.0; 5]));
    let model = ModelArtifact {
        classes: vec![0, 1],
        reported_accuracy: Some(0.972),
        estimator: EstimatorArtifact::Linear {
            coef: vec![1.0, 1.0, 1.0, -1.0, -1.0],
            intercept: -0.1,
        },
    };
    let classifier =
        SpamClassifier::from_artifacts(vectorizer, model, NormalizerConfig::default()).unwrap();

    router(Arc::new(classifier))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/classify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn form_page_shows_accuracy_and_no_result() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Spam Message Classifier"));
    assert!(html.contains("97.2% accuracy"));
    assert!(html.contains("name=\"message\""));
    assert!(!html.contains("Processed text:"));
}

#[tokio::test]
async fn form_submission_renders_spam_verdict() {
    let response = app()
        .oneshot(form_request(
            "message=Congratulations%21+You+WON+a+free+prize%2C+claim+now%21%21%21",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("This is SPAM"));
    assert!(html.contains("congratul free prize claim"));
    // The submitted message is kept in the text area.
    assert!(html.contains("Congratulations! You WON a free prize, claim now!!!"));
}

#[tokio::test]
async fn form_submission_renders_ham_verdict() {
    let response = app()
        .oneshot(form_request("message=Hello%2C+how+are+you+today%3F"))
        .await
        .unwrap();

    let html = body_string(response).await;
    assert!(html.contains("This is NOT spam"));
    assert!(html.contains("hello today"));
}

#[tokio::test]
async fn blank_form_submission_warns_without_verdict() {
    let response = app().oneshot(form_request("message=+++")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Please enter a message"));
    assert!(!html.contains("This is SPAM"));
    assert!(!html.contains("This is NOT spam"));
}

#[tokio::test]
async fn api_classifies_json_messages() {
    let response = app()
        .oneshot(json_request(r#"{"message": "Claim your free prize"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ClassifyResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body.label, Some(1));
    assert_eq!(body.processed, "claim free prize");
    assert!(body.warning.is_none());

    let response = app()
        .oneshot(json_request(r#"{"message": ""}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: ClassifyResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(body.verdict.is_none());
    assert_eq!(body.warning.as_deref(), Some("Please enter a message"));
}

#[tokio::test]
async fn api_rejects_malformed_json() {
    let response = app()
        .oneshot(json_request(r#"{"text": 42"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ApiError = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(!body.error.is_empty());
}

#[tokio::test]
async fn health_reports_version() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: HealthResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body.status, "ok");
    assert_eq!(body.version, spamsift::VERSION);
}
