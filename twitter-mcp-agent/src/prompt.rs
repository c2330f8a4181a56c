use chrono::Local;

pub fn get_server_instructions() -> String {
    let current_date_time = Local::now().to_string();

    format!(
        "
You can post and search tweets on Twitter. Every call drives a fresh remote browser session, so each call takes several seconds.

**Tools**

*   `twitter_post`: posts `text`. Pass `replyToUrl` (a tweet URL) to reply instead of starting a new thread.
*   `twitter_search`: searches for `query` and returns up to `count` tweets (default 10). The count is a hint to the page reader and is not guaranteed.
*   `get_context_id` / `set_context_id`: read or replace the Browserbase context used for every following session. The context carries the browser's login state.

**Login state**

Posting requires a logged-in Twitter account. If posts fail with errors about the compose area or a login page, ask the user for a Browserbase context ID that holds a logged-in session and set it with `set_context_id`.

**Results**

A successful post only means no step raised an error. It does not confirm the tweet is visible. Use `twitter_search` afterwards if confirmation matters.

Current date and time: {current_date_time}
"
    )
}
