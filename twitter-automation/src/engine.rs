use crate::{AutomationError, SessionTemplate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Page lifecycle event a navigation waits for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitUntil {
    #[default]
    Load,
    DomContentLoaded,
}

/// A schema-guided read of the current page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Natural-language description of what to pull out of the page
    pub instruction: String,
    /// JSON Schema the extracted value must conform to
    pub schema: serde_json::Value,
}

impl ExtractRequest {
    pub fn new(instruction: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            instruction: instruction.into(),
            schema,
        }
    }
}

/// Builds fresh sessions from a template. One engine is shared by all tool calls.
pub trait AutomationEngine: Send + Sync {
    /// Construct a session. Nothing is contacted until `init` is called.
    fn new_session(&self, template: SessionTemplate) -> Box<dyn AutomationSession>;
}

/// One live remote browser, used for a single script and then closed
#[async_trait::async_trait]
pub trait AutomationSession: Send {
    /// Start the remote browser
    async fn init(&mut self) -> Result<(), AutomationError>;

    /// Navigate the page to `url`
    async fn goto(&mut self, url: &str, wait_until: WaitUntil) -> Result<(), AutomationError>;

    /// Perform a natural-language action such as "click the reply button"
    async fn act(&mut self, instruction: &str) -> Result<serde_json::Value, AutomationError>;

    /// Read structured data from the page
    async fn extract(
        &mut self,
        request: ExtractRequest,
    ) -> Result<serde_json::Value, AutomationError>;

    /// Let the page settle for a fixed time
    async fn wait_for_timeout(&mut self, duration: Duration) -> Result<(), AutomationError>;

    /// Tear the remote browser down. Must be safe to call on a session whose `init` failed.
    async fn close(&mut self) -> Result<(), AutomationError>;
}
