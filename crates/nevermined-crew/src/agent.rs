//! Agent roster: who does what, and which tools each may call.

use serde::{Deserialize, Serialize};

use crate::tools::PAYMENT_TOOL_NAME;

pub const ORCHESTRATOR: &str = "Orchestrator";
pub const ANALYZER: &str = "Analyzer";
pub const SUMMARIZER: &str = "Summarizer";

/// A crew member. `role` doubles as the agent's key within a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// Names of the tools this agent may invoke.
    pub tools: Vec<String>,
}

impl AgentProfile {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.tools.contains(&name) {
            self.tools.push(name);
        }
        self
    }

    pub fn can_use(&self, tool: &str) -> bool {
        self.tools.iter().any(|t| t == tool)
    }

    /// Manages payments and coordinates the other agents. Holds the payment tool.
    pub fn orchestrator() -> Self {
        Self::new(
            ORCHESTRATOR,
            "Manage agent payments and coordinate tasks between agents",
            "I am an orchestration agent specialized in managing workflows and handling \
             payments. I ensure that all services are properly compensated for their work \
             using decentralized payment protocols.",
        )
        .with_tool(PAYMENT_TOOL_NAME)
    }

    pub fn analyzer() -> Self {
        Self::new(
            ANALYZER,
            "Analyze data and extract meaningful insights",
            "I am an expert in data analysis with the ability to identify patterns, trends, \
             and insights from complex information. I provide detailed analytical reports \
             based on raw data.",
        )
    }

    pub fn summarizer() -> Self {
        Self::new(
            SUMMARIZER,
            "Summarize complex data into concise, actionable insights",
            "I specialize in condensing large volumes of information into clear, concise \
             summaries. I focus on extracting the most important points and presenting them \
             in an easily digestible format.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_orchestrator_can_pay() {
        assert!(AgentProfile::orchestrator().can_use(PAYMENT_TOOL_NAME));
        assert!(!AgentProfile::analyzer().can_use(PAYMENT_TOOL_NAME));
        assert!(!AgentProfile::summarizer().can_use(PAYMENT_TOOL_NAME));
    }

    #[test]
    fn test_with_tool_deduplicates() {
        let agent = AgentProfile::new("r", "g", "b")
            .with_tool("search")
            .with_tool("search");
        assert_eq!(agent.tools, vec!["search".to_string()]);
    }
}
