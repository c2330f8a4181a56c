use crate::config::{Configuration, ContextStore};
use crate::format;
use crate::prompt::get_server_instructions;
use crate::scripts;
pub use crate::utils::TwitterWrapper;
use crate::utils::{PostArgs, SearchArgs, SetContextIdArgs};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use std::sync::Arc;
use tracing::{info, warn};
use twitter_automation::{with_session, AutomationEngine, SessionTemplate, StagehandEngine};

pub const SERVER_NAME: &str = "Twitter MCP";
pub const SERVER_VERSION: &str = "1.0.0";

#[tool_router]
impl TwitterWrapper {
    /// Server backed by the hosted Stagehand engine.
    pub fn new(config: Configuration) -> Self {
        Self::with_engine(config, Arc::new(StagehandEngine::new()))
    }

    pub fn with_engine(config: Configuration, engine: Arc<dyn AutomationEngine>) -> Self {
        let context = ContextStore::new(config.context_id.clone());
        Self {
            config: Arc::new(config),
            context,
            engine,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Post a tweet to Twitter")]
    pub async fn twitter_post(
        &self,
        Parameters(args): Parameters<PostArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!(
            "twitter_post: {} chars, reply_to_url={:?}",
            args.text.chars().count(),
            args.reply_to_url
        );
        let template = self.session_template().await;

        let text = args.text.clone();
        let reply_to_url = args.reply_to_url.clone();
        let outcome = with_session(self.engine.as_ref(), template, move |page| {
            Box::pin(async move { scripts::post_tweet(page, &text, reply_to_url.as_deref()).await })
        })
        .await;

        Ok(match outcome {
            Ok(()) => CallToolResult::success(vec![Content::text(format::post_success(
                &args.text,
                args.reply_to_url.as_deref(),
            ))]),
            Err(e) => {
                warn!("twitter_post failed: {}", e);
                CallToolResult::error(vec![Content::text(format::post_error(&e))])
            }
        })
    }

    #[tool(description = "Search for tweets on Twitter")]
    pub async fn twitter_search(
        &self,
        Parameters(args): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!("twitter_search: query={:?}, count={}", args.query, args.count);
        let template = self.session_template().await;

        let query = args.query.clone();
        let count = args.count;
        let outcome = with_session(self.engine.as_ref(), template, move |page| {
            Box::pin(async move { scripts::search_tweets(page, &query, count).await })
        })
        .await;

        Ok(match outcome {
            Ok(tweets) => {
                info!("twitter_search: extracted {} tweets", tweets.len());
                CallToolResult::success(vec![Content::text(format::search_listing(
                    &args.query,
                    &tweets,
                ))])
            }
            Err(e) => {
                warn!("twitter_search failed: {}", e);
                CallToolResult::error(vec![Content::text(format::search_error(&e))])
            }
        })
    }

    #[tool(description = "Get the current Browserbase context ID for persistent sessions")]
    pub async fn get_context_id(&self) -> Result<CallToolResult, McpError> {
        let context_id = self.context.get().await;
        Ok(CallToolResult::success(vec![Content::text(
            format::context_id_report(context_id.as_deref()),
        )]))
    }

    #[tool(description = "Set the context ID for persistent sessions")]
    pub async fn set_context_id(
        &self,
        Parameters(args): Parameters<SetContextIdArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!("set_context_id: {}", args.context_id);
        self.context.set(args.context_id.clone()).await;
        Ok(CallToolResult::success(vec![Content::text(
            format::context_id_set(&args.context_id),
        )]))
    }
}

impl TwitterWrapper {
    /// Template for the next session. The context id is read at call time so a
    /// `set_context_id` applies to every later post and search.
    pub async fn session_template(&self) -> SessionTemplate {
        let mut snapshot = (*self.config).clone();
        snapshot.context_id = self.context.get().await;
        snapshot.session_template()
    }
}

#[tool_handler]
impl ServerHandler for TwitterWrapper {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(get_server_instructions()),
        }
    }
}
