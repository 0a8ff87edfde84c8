//! Crew error types.

use nvm_pay::PayError;

/// Errors that can occur while assembling or running a crew.
#[derive(Debug, thiserror::Error)]
pub enum CrewError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Pay(#[from] PayError),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool '{tool}' is not available to agent '{agent}'")]
    ToolNotPermitted { tool: String, agent: String },

    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("invalid pipeline: {0}")]
    InvalidPipeline(String),

    #[error("executor error: {0}")]
    Executor(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
