//! HTTP presentation layer.
//!
//! A thin axum surface over the pipeline:
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Single-page upload form |
//! | `POST` | `/ask` | Multipart: `file` parts + `question` field → answer |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "invalid_request", "message": "question must not be empty" } }
//! ```
//!
//! User-correctable conditions (`invalid_request`, `document_parse`) come
//! back as 400 warnings. Provider failures are logged in full but reach
//! the client as a 502 with a generic message — no stack traces or
//! provider detail are exposed.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the form can be
//! hosted separately from the API if desired.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;

use crate::config::Config;
use crate::error::Error;
use crate::models::UploadedDocument;
use crate::pipeline::QaPipeline;

/// Maximum multipart upload size. Axum's default of 2 MB is too small for
/// typical PDF documents.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Shared application state passed to route handlers.
#[derive(Clone)]
struct AppState {
    pipeline: Arc<QaPipeline>,
    tracing_project: Arc<str>,
}

/// Start the HTTP server on the configured bind address. Runs until the
/// process is terminated.
pub async fn run_server(config: &Config, pipeline: Arc<QaPipeline>) -> anyhow::Result<()> {
    let state = AppState {
        pipeline,
        tracing_project: config.tracing.project.as_str().into(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(handle_index))
        .route(
            "/ask",
            post(handle_ask).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    println!("askdoc listening on http://{}", config.server.bind);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g. `"invalid_request"`).
    code: String,
    /// Human-readable message. Generic for provider failures.
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(code: &str, message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: code.to_string(),
        message: message.into(),
    }
}

/// Map a pipeline error onto the HTTP error contract. Provider failures
/// keep their detail in the log only.
fn classify_error(err: Error) -> AppError {
    match &err {
        Error::InvalidRequest(msg) => bad_request("invalid_request", msg.clone()),
        Error::DocumentParse(_) => bad_request(
            "document_parse",
            "One of the uploaded files could not be read as a PDF.",
        ),
        Error::Timeout(_) => AppError {
            status: StatusCode::REQUEST_TIMEOUT,
            code: "timeout".to_string(),
            message: "The request timed out. Please try again.".to_string(),
        },
        Error::Embedding(_) | Error::Generation(_) => AppError {
            status: StatusCode::BAD_GATEWAY,
            code: "provider_error".to_string(),
            message: "The answer could not be generated. Please try again later.".to_string(),
        },
        Error::Configuration(_) => AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "configuration".to_string(),
            message: "The service is misconfigured.".to_string(),
        },
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET / ============

async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ============ POST /ask ============

#[derive(Serialize)]
struct AnswerResponse {
    answer: String,
}

/// Accepts a multipart form with repeated `file` parts (PDF bytes) and a
/// `question` text field. At least one file and a non-empty question are
/// required; otherwise a warning is returned without touching the
/// pipeline or any external provider.
async fn handle_ask(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnswerResponse>, AppError> {
    let mut documents: Vec<UploadedDocument> = Vec::new();
    let mut question = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request("invalid_request", format!("malformed form data: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" | "files" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    bad_request("invalid_request", format!("failed to read upload: {}", e))
                })?;
                if !bytes.is_empty() {
                    documents.push(UploadedDocument::new(filename, bytes.to_vec()));
                }
            }
            "question" => {
                question = field.text().await.map_err(|e| {
                    bad_request("invalid_request", format!("failed to read question: {}", e))
                })?;
            }
            _ => {}
        }
    }

    if documents.is_empty() || question.trim().is_empty() {
        return Err(bad_request(
            "invalid_request",
            "Please upload at least one PDF and enter a question.",
        ));
    }

    let span = tracing::info_span!(
        "ask",
        project = %state.tracing_project,
        files = documents.len(),
    );
    let result = state
        .pipeline
        .answer(&documents, &question)
        .instrument(span)
        .await;

    match result {
        Ok(answer) => Ok(Json(AnswerResponse { answer })),
        Err(err) => {
            if err.is_user_correctable() {
                tracing::warn!(error = %err, "request rejected");
            } else {
                tracing::error!(error = %err, "pipeline failed");
            }
            Err(classify_error(err))
        }
    }
}

/// Embedded single-page form: file picker, question box, button, spinner,
/// and warning/success banners.
const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>askdoc — PDF Q&amp;A</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 640px; margin: 3rem auto; padding: 0 1rem; color: #222; }
  h1 { font-size: 1.4rem; }
  form { display: grid; gap: 0.75rem; }
  input[type=text] { padding: 0.5rem; font-size: 1rem; }
  button { padding: 0.5rem 1rem; font-size: 1rem; cursor: pointer; }
  .banner { padding: 0.75rem; border-radius: 4px; display: none; white-space: pre-wrap; }
  .warning { background: #fff3cd; border: 1px solid #ffe69c; }
  .success { background: #d1e7dd; border: 1px solid #a3cfbb; }
  #spinner { display: none; }
</style>
</head>
<body>
<h1>📄 AI-Powered PDF Q&amp;A</h1>
<p>Upload one or more PDFs and ask a question about their contents.</p>
<form id="ask-form">
  <input type="file" id="files" accept="application/pdf" multiple>
  <input type="text" id="question" placeholder="Enter your question">
  <button type="submit">Get Answer</button>
</form>
<p id="spinner">Processing…</p>
<div id="warning" class="banner warning"></div>
<div id="answer" class="banner success"></div>
<script>
const form = document.getElementById('ask-form');
const spinner = document.getElementById('spinner');
const warning = document.getElementById('warning');
const answer = document.getElementById('answer');
form.addEventListener('submit', async (e) => {
  e.preventDefault();
  warning.style.display = 'none';
  answer.style.display = 'none';
  const files = document.getElementById('files').files;
  const question = document.getElementById('question').value;
  if (files.length === 0 || question.trim() === '') {
    warning.textContent = 'Please upload at least one PDF and enter a question.';
    warning.style.display = 'block';
    return;
  }
  const data = new FormData();
  for (const f of files) data.append('file', f);
  data.append('question', question);
  spinner.style.display = 'block';
  try {
    const res = await fetch('/ask', { method: 'POST', body: data });
    const body = await res.json();
    if (res.ok) {
      answer.textContent = body.answer;
      answer.style.display = 'block';
    } else {
      warning.textContent = body.error.message;
      warning.style.display = 'block';
    }
  } catch (err) {
    warning.textContent = 'The request failed. Please try again.';
    warning.style.display = 'block';
  } finally {
    spinner.style.display = 'none';
  }
});
</script>
</body>
</html>
"#;
