//! nevermined-crew: an agent crew whose orchestrator pays for each service
//! before the agent providing it runs.
//!
//! Tools are registered by name in a [`ToolRegistry`]; [`AgentProfile`]s list
//! the tools they may call; a [`Pipeline`] runs [`TaskSpec`]s in declared
//! order, feeding each task the outcomes of the tasks it names as context.
//! Payment tasks go through the [`PaymentTool`]; work tasks go through a
//! [`TaskExecutor`].
//!
//! Without a model behind it the crew runs with the [`DormantExecutor`]: payments
//! still happen, work tasks produce a digest of what they were given.

pub mod agent;
pub mod config;
pub mod crew;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod report;
pub mod task;
pub mod tool_registry;
pub mod tools;

pub use agent::AgentProfile;
pub use config::{CrewConfig, PaidService};
pub use crew::{crew_inputs, payment_crew};
pub use error::CrewError;
pub use executor::{DormantExecutor, TaskExecutor};
pub use pipeline::{FailurePolicy, Pipeline};
pub use report::{PipelineReport, TaskOutcome, TaskStatus};
pub use task::{TaskAction, TaskInputs, TaskSpec};
pub use tool_registry::ToolRegistry;
pub use tools::{PaymentTool, Tool, ToolDeclaration, ToolResult, PAYMENT_TOOL_NAME};
