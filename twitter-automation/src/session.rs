use crate::{AutomationEngine, AutomationError, AutomationSession, SessionTemplate};
use futures::future::BoxFuture;
use tracing::{debug, warn};

/// Open a session from `template`, run `script` against it and close it.
///
/// `close` runs exactly once on every path, including when `init` fails.
/// A failing `close` is logged and never replaces the script's outcome.
pub async fn with_session<T, F>(
    engine: &dyn AutomationEngine,
    template: SessionTemplate,
    script: F,
) -> Result<T, AutomationError>
where
    F: for<'s> FnOnce(&'s mut dyn AutomationSession) -> BoxFuture<'s, Result<T, AutomationError>>,
{
    let mut session = engine.new_session(template);

    let outcome = match session.init().await {
        Ok(()) => {
            debug!("Automation session initialized");
            script(session.as_mut()).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = session.close().await {
        warn!("Failed to close automation session: {}", e);
    }

    outcome
}
