//! Declarative work items.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named inputs available to every task of a run (e.g. `initial_text`).
pub type TaskInputs = BTreeMap<String, String>;

/// What running a task means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskAction {
    /// Pay for a service through the payment tool.
    Pay { service_id: String, amount: String },
    /// Hand the task to the executor.
    Work,
}

/// One step of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub id: String,
    pub description: String,
    pub expected_output: String,
    /// Role of the agent that runs this task.
    pub agent: String,
    pub action: TaskAction,
    /// Ids of earlier tasks whose outcomes this task receives as context.
    pub context: Vec<String>,
}

impl TaskSpec {
    /// A task executed by `agent` through the pipeline's executor.
    pub fn work(
        id: impl Into<String>,
        agent: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            expected_output: String::new(),
            agent: agent.into(),
            action: TaskAction::Work,
            context: Vec::new(),
        }
    }

    /// A task that pays `amount` for `service_id` on behalf of `service_name`.
    pub fn pay(
        id: impl Into<String>,
        agent: impl Into<String>,
        service_name: &str,
        service_id: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        let service_id = service_id.into();
        let amount = amount.into();
        Self {
            id: id.into(),
            description: format!(
                "Pay for the {service_name} service using DID {service_id} with payment amount {amount}"
            ),
            expected_output: format!(
                "Confirmation of successful payment to the {service_name} service with agreement ID"
            ),
            agent: agent.into(),
            action: TaskAction::Pay { service_id, amount },
            context: Vec::new(),
        }
    }

    pub fn expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = expected.into();
        self
    }

    /// Receive the outcome of task `id` as context. `id` must be declared earlier.
    pub fn with_context(mut self, id: impl Into<String>) -> Self {
        self.context.push(id.into());
        self
    }

    pub fn is_payment(&self) -> bool {
        matches!(self.action, TaskAction::Pay { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pay_task_describes_payment() {
        let task = TaskSpec::pay("pay", "Orchestrator", "Analyzer", "did:nv:a", "1000");
        assert!(task.is_payment());
        assert_eq!(
            task.description,
            "Pay for the Analyzer service using DID did:nv:a with payment amount 1000"
        );
        assert_eq!(
            task.action,
            TaskAction::Pay {
                service_id: "did:nv:a".to_string(),
                amount: "1000".to_string()
            }
        );
    }

    #[test]
    fn test_work_task_builder() {
        let task = TaskSpec::work("analyze", "Analyzer", "Analyze the text")
            .expected_output("An analysis")
            .with_context("pay");
        assert!(!task.is_payment());
        assert_eq!(task.context, vec!["pay".to_string()]);
        assert_eq!(task.expected_output, "An analysis");
    }
}
