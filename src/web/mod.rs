//! Web form server
//!
//! A single-page form that submits a task and shows the agent's output,
//! plus a small JSON API for scripted use.

pub mod form;
pub mod handlers;

use std::net::IpAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::{Config, Credential, Result};
use crate::llm::ModelId;
use crate::task::TaskRunner;
use crate::web::form::FormValues;

/// Shared state for all requests
///
/// Holds only immutable defaults and the runner; each submission carries
/// its own credential.
pub struct WebState {
    pub runner: TaskRunner,
    /// Pre-filled credential for the form
    pub default_credential: Credential,
    pub default_model: ModelId,
    pub default_headless: bool,
}

impl WebState {
    pub fn new(runner: TaskRunner) -> Self {
        Self {
            runner,
            default_credential: Credential::default(),
            default_model: ModelId::default(),
            default_headless: true,
        }
    }

    /// State with defaults taken from configuration and the environment
    ///
    /// The environment credential is only pre-filled when the server is bound
    /// to a loopback address.
    pub fn from_config(runner: TaskRunner, config: &Config) -> Result<Self> {
        let credential = form_credential(&config.server.host, Config::credential_from_env());

        Ok(Self {
            runner,
            default_credential: credential,
            default_model: config.default_model()?,
            default_headless: config.browser.headless,
        })
    }

    fn default_values(&self) -> FormValues {
        FormValues {
            api_key: self.default_credential.expose().to_string(),
            task: String::new(),
            model: self.default_model.as_str().to_string(),
            headless: self.default_headless,
        }
    }
}

fn is_loopback_host(host: &str) -> bool {
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .map(|ip| ip.is_loopback())
        .unwrap_or(false)
}

/// Credential shown in the form for a server bound to `host`
fn form_credential(host: &str, credential: Credential) -> Credential {
    if credential.is_blank() || is_loopback_host(host) {
        return credential;
    }
    tracing::info!(host, "Not pre-filling the API key on a non-loopback address");
    Credential::default()
}

/// Build the router
pub fn app(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/run", post(handlers::submit))
        .route("/api/run", post(handlers::api_run))
        .route("/api/models", get(handlers::models))
        .route("/api/health", get(handlers::health))
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped
pub async fn serve(state: WebState, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web form listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
