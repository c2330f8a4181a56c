//! Remote browser automation through natural-language actions
//!
//! This crate wraps a hosted automation engine (Stagehand on Browserbase) behind
//! a small Playwright-like surface: `goto`, `act`, `extract` and
//! `wait_for_timeout` on a session that lives for exactly one script.

pub mod engine;
pub mod errors;
pub mod session;
pub mod stagehand;
pub mod template;

pub use engine::{AutomationEngine, AutomationSession, ExtractRequest, WaitUntil};
pub use errors::AutomationError;
pub use session::with_session;
pub use stagehand::{StagehandEngine, StagehandSession, DEFAULT_API_URL};
pub use template::{
    BrowserContext, BrowserSettings, BrowserbaseSessionCreateParams, SessionTemplate, Viewport,
    DEFAULT_MODEL_NAME,
};
