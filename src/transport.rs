//! HTTP seam to the upstream query service.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::auth::AuthSession;
use crate::error::EngineError;

const QUERY_PATH: &str = "/api/dashboards";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `COURTCHART_ENDPOINT` and `COURTCHART_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: env_opt("COURTCHART_ENDPOINT").unwrap_or(defaults.endpoint),
            timeout_secs: env_opt("COURTCHART_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    pub fn query_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), QUERY_PATH)
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Anything that can turn a question into a raw result envelope.
pub trait QueryTransport {
    fn post_question(&self, question: &str) -> Result<Value, EngineError>;
}

pub struct HttpTransport {
    config: ClientConfig,
    session: Option<AuthSession>,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: ClientConfig, session: Option<AuthSession>) -> Result<Self, EngineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            session,
            client,
        })
    }
}

impl QueryTransport for HttpTransport {
    fn post_question(&self, question: &str) -> Result<Value, EngineError> {
        let url = self.config.query_url();
        debug!(%url, "posting question");

        let mut request = self.client.post(&url).json(&json!({ "question": question }));
        if let Some(session) = &self.session {
            request = request.bearer_auth(&session.token);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                EngineError::Network(format!(
                    "request timed out after {} seconds",
                    self.config.timeout_secs
                ))
            } else {
                EngineError::Network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        let body: Option<Value> = response.json().ok();

        if !status.is_success() {
            warn!(%status, "query service rejected the question");
            return Err(EngineError::Network(failure_message(status.as_u16(), body.as_ref())));
        }

        body.ok_or_else(|| EngineError::Network("response body is not JSON".to_string()))
    }
}

/// The service's own `detail` text when it sent one, else the status line.
fn failure_message(status: u16, body: Option<&Value>) -> String {
    body.and_then(|b| b.get("detail"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {} from query service", status))
}
