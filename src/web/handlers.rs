use std::sync::Arc;

use askama_axum::Template;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::VERSION;
use crate::ml::Verdict;
use crate::service::Analysis;
use crate::web::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Formatted model accuracy, empty when the model has none.
    accuracy: String,
    message: String,
    verdict: String,
    is_spam: bool,
    processed: String,
    warning: String,
    error: String,
    version: &'static str,
}

impl IndexTemplate {
    fn new(state: &AppState, message: String) -> Self {
        IndexTemplate {
            accuracy: state
                .classifier
                .reported_accuracy()
                .map(|a| format!("{:.1}%", a * 100.0))
                .unwrap_or_default(),
            message,
            verdict: String::new(),
            is_spam: false,
            processed: String::new(),
            warning: String::new(),
            error: String::new(),
            version: VERSION,
        }
    }

    fn with_analysis(mut self, analysis: &Analysis) -> Self {
        if let Some(verdict) = analysis.verdict() {
            self.verdict = verdict.message().to_string();
            self.is_spam = verdict.is_spam();
            self.processed = analysis.processed.to_string();
        }
        self.warning = analysis.warning().unwrap_or_default().to_string();
        self.error = analysis.error().unwrap_or_default().to_string();
        self
    }
}

#[derive(Deserialize)]
pub struct ClassifyForm {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub verdict: Option<Verdict>,
    pub label: Option<u8>,
    pub processed: String,
    pub warning: Option<String>,
    pub error: Option<String>,
}

impl From<Analysis> for ClassifyResponse {
    fn from(analysis: Analysis) -> Self {
        let verdict = analysis.verdict();
        ClassifyResponse {
            verdict,
            label: verdict.map(Verdict::label),
            warning: analysis.warning().map(str::to_string),
            error: analysis.error().map(str::to_string),
            processed: analysis.processed.into_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET / - Empty form page
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    IndexTemplate::new(&state, String::new())
}

/// POST / - Classify the submitted message and render the result
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ClassifyForm>,
) -> impl IntoResponse {
    let analysis = state.classifier.analyze(&form.message);
    IndexTemplate::new(&state, form.message).with_analysis(&analysis)
}

/// POST /api/classify - Classify a message given as JSON
pub async fn api_classify(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(request)) => {
            let analysis = state.classifier.analyze(&request.message);
            Json(ClassifyResponse::from(analysis)).into_response()
        }
        Err(rejection) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(&rejection.body_text())),
        )
            .into_response(),
    }
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}
