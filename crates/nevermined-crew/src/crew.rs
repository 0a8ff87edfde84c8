//! The payment crew: an orchestrator that pays the analyzer and summarizer
//! services before each of them runs.

use std::sync::Arc;

use crate::agent::{AgentProfile, ANALYZER, ORCHESTRATOR, SUMMARIZER};
use crate::config::CrewConfig;
use crate::error::CrewError;
use crate::pipeline::Pipeline;
use crate::task::{TaskInputs, TaskSpec};
use crate::tool_registry::ToolRegistry;

pub const PAY_ANALYZER: &str = "pay_analyzer";
pub const ANALYZE: &str = "analyze";
pub const PAY_SUMMARIZER: &str = "pay_summarizer";
pub const SUMMARIZE: &str = "summarize";

/// Input key holding the text the crew works on.
pub const INITIAL_TEXT: &str = "initial_text";

/// Declare the four-task payment crew over `registry`.
///
/// The registry must already hold the payment tool.
pub fn payment_crew(config: &CrewConfig, registry: Arc<ToolRegistry>) -> Result<Pipeline, CrewError> {
    let mut pipeline = Pipeline::new(registry).with_policy(config.failure_policy);

    pipeline.add_agent(AgentProfile::orchestrator())?;
    pipeline.add_agent(AgentProfile::analyzer())?;
    pipeline.add_agent(AgentProfile::summarizer())?;

    pipeline.add_task(TaskSpec::pay(
        PAY_ANALYZER,
        ORCHESTRATOR,
        ANALYZER,
        config.analyzer.did.as_str(),
        config.analyzer.amount.as_str(),
    ))?;

    pipeline.add_task(
        TaskSpec::work(
            ANALYZE,
            ANALYZER,
            "Analyze the provided text and extract key insights, trends, and patterns.",
        )
        .expected_output(
            "A detailed analysis of the text with identified patterns, trends, and insights",
        )
        .with_context(PAY_ANALYZER),
    )?;

    pipeline.add_task(
        TaskSpec::pay(
            PAY_SUMMARIZER,
            ORCHESTRATOR,
            SUMMARIZER,
            config.summarizer.did.as_str(),
            config.summarizer.amount.as_str(),
        )
        .with_context(ANALYZE),
    )?;

    pipeline.add_task(
        TaskSpec::work(
            SUMMARIZE,
            SUMMARIZER,
            "Create a concise summary of the analysis results highlighting the most important points.",
        )
        .expected_output("A concise summary of the key points from the analysis")
        .with_context(PAY_SUMMARIZER)
        .with_context(ANALYZE),
    )?;

    Ok(pipeline)
}

/// Run inputs for the payment crew.
pub fn crew_inputs(config: &CrewConfig) -> TaskInputs {
    TaskInputs::from([(INITIAL_TEXT.to_string(), config.input_text.clone())])
}
