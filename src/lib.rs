pub mod catalog;
pub mod cli;
pub mod config;
pub mod generator;
pub mod llm;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use catalog::WorkflowCatalog;
pub use config::Config;
pub use generator::workflow::{Action, launch};
