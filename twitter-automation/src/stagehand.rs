//! Client for the hosted Stagehand session API.
//!
//! A session is started with `POST /sessions/start`, driven with
//! `POST /sessions/{id}/{navigate,act,extract}` and released with
//! `POST /sessions/{id}/end`. Driving calls answer with an event stream of
//! `data: {json}` lines; the `system` event with status `finished` carries the
//! result and `error` carries the failure.

use crate::template::BrowserbaseSessionCreateParams;
use crate::{
    AutomationEngine, AutomationError, AutomationSession, ExtractRequest, SessionTemplate, WaitUntil,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.stagehand.browserbase.com/v1";

const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Debug)]
pub struct StagehandEngine {
    client: Client,
    base_url: String,
}

impl StagehandEngine {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Point the engine at another API root (a local mock in tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for StagehandEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomationEngine for StagehandEngine {
    fn new_session(&self, template: SessionTemplate) -> Box<dyn AutomationSession> {
        Box::new(StagehandSession {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            template,
            session_id: None,
        })
    }
}

pub struct StagehandSession {
    client: Client,
    base_url: String,
    template: SessionTemplate,
    session_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartSessionRequest<'a> {
    model_name: &'a str,
    verbose: u8,
    browserbase_session_create_params: &'a BrowserbaseSessionCreateParams,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartSessionData {
    session_id: String,
    #[serde(default = "default_available")]
    available: bool,
}

fn default_available() -> bool {
    true
}

impl StagehandSession {
    fn request(&self, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("x-bb-api-key", &self.template.api_key)
            .header("x-bb-project-id", &self.template.project_id)
            .header("x-stream-response", "true")
            .header("x-sent-at", chrono::Utc::now().to_rfc3339())
            .header("x-language", "rust")
            .header("x-sdk-version", SDK_VERSION);

        if let Some(key) = &self.template.model_api_key {
            builder = builder.header("x-model-api-key", key);
        }
        if let Some(id) = &self.session_id {
            builder = builder.header("x-bb-session-id", id);
        }
        builder
    }

    async fn execute(&self, method: &str, args: Value) -> Result<Value, AutomationError> {
        let session_id = self.session_id.as_deref().ok_or_else(|| {
            AutomationError::SessionNotStarted(format!("cannot run '{method}' before init"))
        })?;

        debug!("Stagehand {} on session {}", method, session_id);
        let response = self
            .request(&format!("/sessions/{session_id}/{method}"))
            .json(&args)
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        parse_event_stream(&body)
    }
}

#[async_trait::async_trait]
impl AutomationSession for StagehandSession {
    async fn init(&mut self) -> Result<(), AutomationError> {
        let body = StartSessionRequest {
            model_name: &self.template.model_name,
            verbose: self.template.verbose,
            browserbase_session_create_params: &self.template.browserbase_session_create_params,
        };

        let response = self.request("/sessions/start").json(&body).send().await?;
        let parsed: ApiResponse<StartSessionData> = check_status(response).await?.json().await?;

        if !parsed.success {
            return Err(AutomationError::Api(parsed.message.unwrap_or_default()));
        }
        let data = parsed.data.ok_or_else(|| {
            AutomationError::ResponseParse("session start response has no data".to_string())
        })?;

        if !data.available {
            warn!("Stagehand reports session {} as unavailable", data.session_id);
        }
        info!(
            "Started Stagehand session {} (context: {:?})",
            data.session_id,
            self.template.context_id()
        );
        self.session_id = Some(data.session_id);
        Ok(())
    }

    async fn goto(&mut self, url: &str, wait_until: WaitUntil) -> Result<(), AutomationError> {
        self.execute(
            "navigate",
            json!({ "url": url, "options": { "waitUntil": wait_until } }),
        )
        .await?;
        Ok(())
    }

    async fn act(&mut self, instruction: &str) -> Result<Value, AutomationError> {
        self.execute("act", json!({ "action": instruction })).await
    }

    async fn extract(&mut self, request: ExtractRequest) -> Result<Value, AutomationError> {
        self.execute(
            "extract",
            json!({
                "instruction": request.instruction,
                "schemaDefinition": request.schema,
            }),
        )
        .await
    }

    async fn wait_for_timeout(&mut self, duration: Duration) -> Result<(), AutomationError> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), AutomationError> {
        let Some(session_id) = self.session_id.clone() else {
            return Ok(());
        };

        let response = self
            .request(&format!("/sessions/{session_id}/end"))
            .send()
            .await;
        self.session_id = None;

        check_status(response?).await?;
        info!("Ended Stagehand session {}", session_id);
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, AutomationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED {
        return Err(AutomationError::Unauthorized(
            "Unauthorized request to the Stagehand API. Check your Browserbase API key".to_string(),
        ));
    }
    Err(AutomationError::Http(
        format!("{} {}", status.as_u16(), body.trim())
            .trim_end()
            .to_string(),
    ))
}

/// Pull the final result out of a `data: {json}` event stream.
pub(crate) fn parse_event_stream(body: &str) -> Result<Value, AutomationError> {
    let mut saw_event = false;

    for line in body.lines() {
        let Some(payload) = line.trim().strip_prefix("data:") else {
            continue;
        };
        let payload = payload.trim();
        if payload.is_empty() {
            continue;
        }
        saw_event = true;

        let event: Value = serde_json::from_str(payload)?;
        let data = event.get("data").cloned().unwrap_or(Value::Null);
        match event.get("type").and_then(Value::as_str) {
            Some("system") => match data.get("status").and_then(Value::as_str) {
                Some("finished") => return Ok(data.get("result").cloned().unwrap_or(Value::Null)),
                Some("error") => {
                    let message = match data.get("error") {
                        Some(Value::String(s)) => s.clone(),
                        Some(Value::Null) | None => String::new(),
                        Some(other) => other.to_string(),
                    };
                    return Err(AutomationError::Server(message));
                }
                _ => {}
            },
            Some("log") => debug!("stagehand: {}", data.get("message").unwrap_or(&data)),
            _ => {}
        }
    }

    // Non-streaming servers answer with a plain `{success, data}` envelope.
    if !saw_event {
        if let Ok(envelope) = serde_json::from_str::<ApiResponse<Value>>(body) {
            if envelope.success {
                return Ok(envelope.data.unwrap_or(Value::Null));
            }
            return Err(AutomationError::Api(envelope.message.unwrap_or_default()));
        }
    }

    Err(AutomationError::ResponseParse(
        "stream ended without a finished event".to_string(),
    ))
}
