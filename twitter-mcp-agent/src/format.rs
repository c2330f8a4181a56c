use crate::scripts::Tweet;
use twitter_automation::AutomationError;

const UNKNOWN_ERROR: &str = "Unknown error";

fn fault_message(err: &AutomationError) -> String {
    err.user_message()
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn post_success(text: &str, reply_to_url: Option<&str>) -> String {
    match reply_to_url {
        Some(url) => format!("Successfully posted tweet: \"{text}\" as reply to {url}"),
        None => format!("Successfully posted tweet: \"{text}\""),
    }
}

pub fn post_error(err: &AutomationError) -> String {
    format!("Error posting tweet: {}", fault_message(err))
}

pub fn search_error(err: &AutomationError) -> String {
    format!("Error searching tweets: {}", fault_message(err))
}

/// Numbered listing; timestamp and engagement lines appear only when extracted.
pub fn search_listing(query: &str, tweets: &[Tweet]) -> String {
    let entries: Vec<String> = tweets
        .iter()
        .enumerate()
        .map(|(i, tweet)| {
            let mut entry = format!("{}. @{}\n{}\n", i + 1, tweet.author, tweet.text);
            if let Some(timestamp) = present(&tweet.timestamp) {
                entry.push_str(&format!("Posted: {timestamp}"));
            }
            if let Some(engagement) = present(&tweet.engagement) {
                entry.push_str(&format!("\nEngagement: {engagement}"));
            }
            entry.push('\n');
            entry
        })
        .collect();

    format!(
        "Found {} tweets for query: \"{}\"\n\n{}",
        tweets.len(),
        query,
        entries.join("\n")
    )
}

pub fn context_id_report(context_id: Option<&str>) -> String {
    match context_id {
        Some(id) => format!(
            "Current context ID: {id}\n\nThis context ID is being used to maintain your browser session across requests."
        ),
        None => "No context ID configured. After logging in, you can retrieve a context ID from Browserbase to maintain persistent sessions.\n\nTo use a context ID, pass it in the configuration when connecting to this MCP server.".to_string(),
    }
}

pub fn context_id_set(context_id: &str) -> String {
    format!("Context ID set to: {context_id}")
}
