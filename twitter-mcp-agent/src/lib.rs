pub mod config;
pub mod format;
pub mod prompt;
pub mod scripts;
pub mod server;
pub mod utils;

pub use config::{ConfigError, Configuration, ContextStore};
pub use server::TwitterWrapper;
