use serde::{Deserialize, Serialize};
use std::fmt;

/// Model the engine uses to resolve natural-language actions
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o";

pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Reference to a persistent Browserbase context (cookies, login state)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserContext {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSettings {
    pub viewport: Viewport,
    pub advanced_stealth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BrowserContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserbaseSessionCreateParams {
    pub project_id: String,
    pub proxies: bool,
    pub browser_settings: BrowserSettings,
}

/// Everything needed to start one remote session. Cheap to clone; a new
/// session is instantiated from it for every tool call.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionTemplate {
    pub env: String,
    pub api_key: String,
    pub project_id: String,
    pub verbose: u8,
    pub model_name: String,
    pub model_api_key: Option<String>,
    pub browserbase_session_create_params: BrowserbaseSessionCreateParams,
}

impl SessionTemplate {
    /// Remote Browserbase session with a 1024x768 viewport, advanced stealth
    /// and proxies on. The values are not configurable.
    pub fn browserbase(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        let project_id = project_id.into();
        Self {
            env: "BROWSERBASE".to_string(),
            api_key: api_key.into(),
            project_id: project_id.clone(),
            verbose: 0,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            model_api_key: None,
            browserbase_session_create_params: BrowserbaseSessionCreateParams {
                project_id,
                proxies: true,
                browser_settings: BrowserSettings {
                    viewport: Viewport::default(),
                    advanced_stealth: true,
                    context: None,
                },
            },
        }
    }

    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    /// Empty keys are dropped so the engine falls back to its own credential.
    pub fn with_model_api_key(mut self, key: Option<String>) -> Self {
        self.model_api_key = key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_context_id(mut self, context_id: Option<String>) -> Self {
        self.browserbase_session_create_params
            .browser_settings
            .context = context_id.map(|id| BrowserContext { id });
        self
    }

    pub fn context_id(&self) -> Option<&str> {
        self.browserbase_session_create_params
            .browser_settings
            .context
            .as_ref()
            .map(|c| c.id.as_str())
    }
}

impl fmt::Debug for SessionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTemplate")
            .field("env", &self.env)
            .field("api_key", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("verbose", &self.verbose)
            .field("model_name", &self.model_name)
            .field(
                "model_api_key",
                &self.model_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "browserbase_session_create_params",
                &self.browserbase_session_create_params,
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixed_browser_settings() {
        let template = SessionTemplate::browserbase("bb-key", "proj-1");
        let params = &template.browserbase_session_create_params;
        assert_eq!(template.env, "BROWSERBASE");
        assert_eq!(template.model_name, "gpt-4o");
        assert!(params.proxies);
        assert!(params.browser_settings.advanced_stealth);
        assert_eq!(params.browser_settings.viewport.width, 1024);
        assert_eq!(params.browser_settings.viewport.height, 768);
        assert_eq!(params.project_id, "proj-1");
    }

    #[test]
    fn test_create_params_wire_shape() {
        let template = SessionTemplate::browserbase("bb-key", "proj-1")
            .with_context_id(Some("ctx-42".to_string()));
        let value = serde_json::to_value(&template.browserbase_session_create_params).unwrap();
        assert_eq!(
            value,
            json!({
                "projectId": "proj-1",
                "proxies": true,
                "browserSettings": {
                    "viewport": {"width": 1024, "height": 768},
                    "advancedStealth": true,
                    "context": {"id": "ctx-42"}
                }
            })
        );
    }

    #[test]
    fn test_context_omitted_when_unset() {
        let template = SessionTemplate::browserbase("bb-key", "proj-1").with_context_id(None);
        let value = serde_json::to_value(&template.browserbase_session_create_params).unwrap();
        assert!(value["browserSettings"].get("context").is_none());
        assert_eq!(template.context_id(), None);
    }

    #[test]
    fn test_empty_model_key_is_dropped() {
        let template =
            SessionTemplate::browserbase("bb-key", "proj-1").with_model_api_key(Some(String::new()));
        assert_eq!(template.model_api_key, None);

        let template = SessionTemplate::browserbase("bb-key", "proj-1")
            .with_model_api_key(Some("sk-test".to_string()));
        assert_eq!(template.model_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let template = SessionTemplate::browserbase("bb-secret", "proj-1")
            .with_model_api_key(Some("sk-secret".to_string()));
        let printed = format!("{template:?}");
        assert!(!printed.contains("bb-secret"));
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("proj-1"));
    }
}
