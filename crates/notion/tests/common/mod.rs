//! In-process stand-in for the Notion REST API.
//!
//! Binds an axum router on `127.0.0.1:0`, records every request it
//! receives, and answers either with a fresh object id or with a
//! configured error.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use scaffold_notion::api::NotionApiConfig;
use scaffold_notion::NotionApi;

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub notion_version: Option<String>,
    pub body: Value,
}

/// How the stub answers.
#[derive(Debug, Clone)]
pub enum StubMode {
    Succeed,
    /// Notion-style JSON error object.
    Fail {
        status: u16,
        code: &'static str,
        message: &'static str,
    },
    /// Non-JSON error body, as a proxy in front of Notion might send.
    FailRaw { status: u16, body: &'static str },
}

#[derive(Clone)]
struct StubState {
    mode: StubMode,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubNotion {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubNotion {
    pub async fn start(mode: StubMode) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            mode,
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/v1/pages", post(handle_create))
            .route("/v1/databases", post(handle_create))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });

        Self {
            base_url: format!("http://{addr}/v1"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Client pointed at this stub with a fixed test token.
    pub fn client(&self) -> NotionApi {
        let mut config = NotionApiConfig::new("secret_test_token");
        config.api_url = self.base_url.clone();
        NotionApi::new(&config).expect("build client")
    }
}

async fn handle_create(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        authorization: header("authorization"),
        notion_version: header("notion-version"),
        body,
    });

    match &state.mode {
        StubMode::Succeed => {
            let object = if uri.path().ends_with("/databases") {
                "database"
            } else {
                "page"
            };
            Json(json!({ "object": object, "id": uuid::Uuid::new_v4().to_string() }))
                .into_response()
        }
        StubMode::Fail {
            status,
            code,
            message,
        } => (
            StatusCode::from_u16(*status).unwrap(),
            Json(json!({
                "object": "error",
                "status": status,
                "code": code,
                "message": message,
            })),
        )
            .into_response(),
        StubMode::FailRaw { status, body } => {
            (StatusCode::from_u16(*status).unwrap(), *body).into_response()
        }
    }
}
