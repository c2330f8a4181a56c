use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use twitter_automation::SessionTemplate;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("No configuration supplied. Pass --config <PATH> or --config-json <JSON>")]
    MissingSource,
}

/// Connection-time configuration. Values come only from the caller; the
/// process environment is never consulted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Enable debug logging in the automation engine
    #[serde(default)]
    pub debug: bool,
    pub browserbase_api_key: String,
    pub browserbase_project_id: String,
    /// OpenAI key the engine uses for natural-language actions
    pub openai_api_key: String,
    /// Browserbase context for persistent sessions (login state)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

impl Configuration {
    /// Parse a JSON or YAML document.
    ///
    /// The document is read into a `serde_yaml::Value` first so that scalars
    /// keep their type: `true`, `42` or `null` where a string is expected
    /// are rejected instead of being coerced to text.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let document: serde_yaml::Value = serde_yaml::from_str(source)?;
        Ok(serde_yaml::from_value(document)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Resolve the configuration from whichever CLI source was given. A file wins over inline text.
    pub fn resolve(path: Option<&Path>, inline: Option<&str>) -> Result<Self, ConfigError> {
        match (path, inline) {
            (Some(path), _) => Self::from_path(path),
            (None, Some(inline)) => Self::parse(inline),
            (None, None) => Err(ConfigError::MissingSource),
        }
    }

    /// Template every automation session is instantiated from.
    pub fn session_template(&self) -> SessionTemplate {
        SessionTemplate::browserbase(&self.browserbase_api_key, &self.browserbase_project_id)
            .with_verbose(u8::from(self.debug))
            .with_model_api_key(Some(self.openai_api_key.clone()))
            .with_context_id(self.context_id.clone())
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("debug", &self.debug)
            .field("browserbase_api_key", &"<redacted>")
            .field("browserbase_project_id", &self.browserbase_project_id)
            .field("openai_api_key", &"<redacted>")
            .field("context_id", &self.context_id)
            .finish()
    }
}

/// The context id shared by every tool call of one server instance.
#[derive(Clone, Debug, Default)]
pub struct ContextStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl ContextStore {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub async fn get(&self) -> Option<String> {
        self.inner.read().await.clone()
    }

    pub async fn set(&self, context_id: String) {
        *self.inner.write().await = Some(context_id);
    }
}
