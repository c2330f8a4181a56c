use crate::config::{Configuration, ContextStore};
use anyhow::Result;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use twitter_automation::AutomationEngine;

pub const DEFAULT_SEARCH_COUNT: f64 = 10.0;

fn default_search_count() -> f64 {
    DEFAULT_SEARCH_COUNT
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PostArgs {
    #[schemars(description = "Tweet text to post")]
    pub text: String,
    #[serde(rename = "replyToUrl", default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "URL of tweet to reply to (optional)")]
    pub reply_to_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchArgs {
    #[schemars(description = "Search query to find tweets")]
    pub query: String,
    #[serde(default = "default_search_count")]
    #[schemars(description = "Number of search results to return")]
    pub count: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SetContextIdArgs {
    #[serde(rename = "contextId")]
    #[schemars(description = "The context ID to set")]
    pub context_id: String,
}

/// Server state shared by every tool call. Clones share the context store.
#[derive(Clone)]
pub struct TwitterWrapper {
    pub config: Arc<Configuration>,
    pub context: ContextStore,
    pub engine: Arc<dyn AutomationEngine>,
    pub tool_router: ToolRouter<Self>,
}

pub fn init_logging() -> Result<()> {
    let log_level = env::var("LOG_LEVEL")
        .map(|level| match level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            _ => Level::INFO,
        })
        .unwrap_or(Level::INFO);

    // stdout carries the JSON-RPC stream in stdio mode
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    Ok(())
}
