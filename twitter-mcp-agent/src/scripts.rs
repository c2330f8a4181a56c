//! Browser scripts run inside one automation session.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use twitter_automation::{AutomationError, AutomationSession, ExtractRequest, WaitUntil};

pub const COMPOSE_URL: &str = "https://twitter.com/compose/tweet";
pub const SEARCH_URL: &str = "https://twitter.com/search";

/// Time the page gets after publishing so the request reaches the server
pub const PUBLISH_SETTLE: Duration = Duration::from_millis(2000);

pub const REPLY_ACTION: &str = "click the reply button";
pub const PUBLISH_ACTION: &str = "click the post button to publish the tweet";
pub const SCROLL_ACTION: &str = "Scroll down to load more search results";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Tweet {
    /// The tweet content text
    pub text: String,
    /// The username of the tweet author
    pub author: String,
    /// When the tweet was posted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Likes, retweets, replies count if visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TweetBatch {
    #[serde(default)]
    pub tweets: Vec<Tweet>,
}

/// Page a post starts from: the tweet being replied to, or the compose dialog.
pub fn post_target(reply_to_url: Option<&str>) -> &str {
    reply_to_url.unwrap_or(COMPOSE_URL)
}

pub fn compose_action(text: &str) -> String {
    format!("type \"{text}\" in the tweet compose area")
}

pub fn search_url(query: &str) -> String {
    format!(
        "{SEARCH_URL}?q={}&src=typed_query",
        urlencoding::encode(query)
    )
}

pub fn search_instruction(count: f64) -> String {
    format!(
        "Extract the first {count} tweets from the search results including tweet text, author username, and timestamp"
    )
}

pub fn tweet_batch_schema() -> Result<serde_json::Value, AutomationError> {
    serde_json::to_value(schemars::schema_for!(TweetBatch))
        .map_err(|e| AutomationError::Internal(format!("failed to build tweet schema: {e}")))
}

pub async fn post_tweet(
    page: &mut dyn AutomationSession,
    text: &str,
    reply_to_url: Option<&str>,
) -> Result<(), AutomationError> {
    page.goto(post_target(reply_to_url), WaitUntil::DomContentLoaded)
        .await?;
    if reply_to_url.is_some() {
        page.act(REPLY_ACTION).await?;
    }

    page.act(&compose_action(text)).await?;
    page.act(PUBLISH_ACTION).await?;

    page.wait_for_timeout(PUBLISH_SETTLE).await
}

pub async fn search_tweets(
    page: &mut dyn AutomationSession,
    query: &str,
    count: f64,
) -> Result<Vec<Tweet>, AutomationError> {
    page.goto(&search_url(query), WaitUntil::Load).await?;
    page.act(SCROLL_ACTION).await?;

    let extracted = page
        .extract(ExtractRequest::new(
            search_instruction(count),
            tweet_batch_schema()?,
        ))
        .await?;

    if extracted.is_null() {
        return Ok(Vec::new());
    }
    let batch: TweetBatch = serde_json::from_value(extracted)
        .map_err(|e| AutomationError::Extraction(e.to_string()))?;
    Ok(batch.tweets)
}
