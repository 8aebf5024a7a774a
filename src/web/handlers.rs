//! Request handlers for the web form and its JSON twin

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::agent::AgentHistory;
use crate::core::{Credential, ErrorKind, Result};
use crate::llm::{get_model_presets, ModelId, ModelPreset};
use crate::task::{render_outcome, TaskRequest};
use crate::web::form::{render_page, FormValues};
use crate::web::WebState;

/// Fields posted by the HTML form
///
/// An unchecked checkbox is simply absent from the body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunForm {
    pub api_key: String,
    pub task: String,
    pub model: String,
    pub headless: Option<String>,
}

/// JSON run request
#[derive(Debug, Deserialize)]
pub struct ApiRunRequest {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub api_key: String,
    pub model: Option<String>,
    pub headless: Option<bool>,
}

/// JSON run response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiRunResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<AgentHistory>,
}

/// Build a validated request; the credential is checked before the model name
fn build_request(
    task: String,
    api_key: String,
    model: Option<&str>,
    headless: bool,
    default_model: ModelId,
) -> Result<TaskRequest> {
    let request = TaskRequest::new(task, Credential::new(api_key)).with_headless(headless);
    request.validate()?;

    let model = match model.map(str::trim).filter(|m| !m.is_empty()) {
        Some(name) => name.parse::<ModelId>()?,
        None => default_model,
    };

    Ok(request.with_model(model))
}

pub async fn index(State(state): State<Arc<WebState>>) -> Html<String> {
    Html(render_page(&state.default_values(), None))
}

pub async fn submit(
    State(state): State<Arc<WebState>>,
    Form(form): Form<RunForm>,
) -> Html<String> {
    let headless = form.headless.is_some();
    let values = FormValues {
        api_key: form.api_key.clone(),
        task: form.task.clone(),
        model: if form.model.trim().is_empty() {
            state.default_model.as_str().to_string()
        } else {
            form.model.clone()
        },
        headless,
    };

    let output = match build_request(
        form.task,
        form.api_key,
        Some(form.model.as_str()),
        headless,
        state.default_model,
    ) {
        Ok(request) => state.runner.run_to_text(request).await,
        Err(e) => render_outcome(Err(e)),
    };

    Html(render_page(&values, Some(&output)))
}

pub async fn api_run(
    State(state): State<Arc<WebState>>,
    Json(body): Json<ApiRunRequest>,
) -> (StatusCode, Json<ApiRunResponse>) {
    let outcome = match build_request(
        body.task,
        body.api_key,
        body.model.as_deref(),
        body.headless.unwrap_or(state.default_headless),
        state.default_model,
    ) {
        Ok(request) => state.runner.run(request).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(history) => (
            StatusCode::OK,
            Json(ApiRunResponse {
                ok: true,
                kind: None,
                output: history.to_string(),
                history: Some(history),
            }),
        ),
        Err(e) => {
            let kind = e.kind();
            let status = match kind {
                ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::ExternalCall => StatusCode::BAD_GATEWAY,
            };
            (
                status,
                Json(ApiRunResponse {
                    ok: false,
                    kind: Some(kind.to_string()),
                    output: render_outcome(Err(e)),
                    history: None,
                }),
            )
        }
    }
}

pub async fn models() -> Json<Vec<ModelPreset>> {
    Json(get_model_presets())
}

pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_checks_credential_first() {
        let err = build_request(
            "t".into(),
            "".into(),
            Some("not-a-model"),
            true,
            ModelId::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), crate::task::MISSING_API_KEY);
    }

    #[test]
    fn test_build_request_model_handling() {
        let request =
            build_request("t".into(), "k".into(), None, false, ModelId::Claude3Sonnet).unwrap();
        assert_eq!(request.model, ModelId::Claude3Sonnet);
        assert!(!request.headless);

        let request = build_request(
            "t".into(),
            "k".into(),
            Some("claude-3-haiku-20240307"),
            true,
            ModelId::default(),
        )
        .unwrap();
        assert_eq!(request.model, ModelId::Claude3Haiku);

        let err = build_request("t".into(), "k".into(), Some("gpt-4o"), true, ModelId::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
