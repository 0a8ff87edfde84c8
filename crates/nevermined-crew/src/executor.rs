//! The seam where work tasks are carried out.
//!
//! Model invocation lives behind [`TaskExecutor`]. The bundled
//! [`DormantExecutor`] makes no model calls: it records what the agent was
//! asked to do and what it was given, so a crew runs end to end offline.

use futures::future::BoxFuture;

use crate::agent::AgentProfile;
use crate::error::CrewError;
use crate::report::TaskOutcome;
use crate::task::{TaskInputs, TaskSpec};

/// Characters of each context output quoted by [`DormantExecutor`].
const MAX_CONTEXT_CHARS: usize = 200;

/// Runs a work task for an agent.
pub trait TaskExecutor: Send + Sync {
    /// Produce the task's output. `context` holds the outcomes of the tasks it depends on.
    fn execute<'a>(
        &'a self,
        agent: &'a AgentProfile,
        task: &'a TaskSpec,
        context: &'a [TaskOutcome],
        inputs: &'a TaskInputs,
    ) -> BoxFuture<'a, Result<String, CrewError>>;
}

/// Executor without a model: answers with a deterministic digest of the task.
#[derive(Debug, Default, Clone, Copy)]
pub struct DormantExecutor;

impl DormantExecutor {
    pub fn render(
        agent: &AgentProfile,
        task: &TaskSpec,
        context: &[TaskOutcome],
        inputs: &TaskInputs,
    ) -> String {
        let mut out = format!("[{}] {}", agent.role, task.description);

        if !task.expected_output.is_empty() {
            out.push_str(&format!("\nExpected: {}", task.expected_output));
        }
        for (key, value) in inputs {
            out.push_str(&format!("\nInput {key}: {}", truncate(value)));
        }
        for c in context {
            out.push_str(&format!(
                "\nContext {} ({}): {}",
                c.task_id,
                c.status,
                truncate(&c.output)
            ));
        }
        out
    }
}

impl TaskExecutor for DormantExecutor {
    fn execute<'a>(
        &'a self,
        agent: &'a AgentProfile,
        task: &'a TaskSpec,
        context: &'a [TaskOutcome],
        inputs: &'a TaskInputs,
    ) -> BoxFuture<'a, Result<String, CrewError>> {
        tracing::debug!(agent = %agent.role, task = %task.id, "Dormant executor, skipping model");
        let text = Self::render(agent, task, context, inputs);
        Box::pin(async move { Ok(text) })
    }
}

fn truncate(s: &str) -> String {
    if s.chars().count() <= MAX_CONTEXT_CHARS {
        s.to_string()
    } else {
        let head: String = s.chars().take(MAX_CONTEXT_CHARS).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TaskStatus;

    #[tokio::test]
    async fn test_dormant_output_mentions_task_inputs_and_context() {
        let agent = AgentProfile::analyzer();
        let task = TaskSpec::work("analyze", "Analyzer", "Analyze the text")
            .expected_output("Insights");
        let context = vec![TaskOutcome {
            task_id: "pay_analyzer".to_string(),
            agent: "Orchestrator".to_string(),
            status: TaskStatus::Completed,
            output: "Payment successful, Agreement ID: X".to_string(),
            duration_ms: 3,
        }];
        let inputs = TaskInputs::from([("initial_text".to_string(), "Ice is melting.".to_string())]);

        let out = DormantExecutor
            .execute(&agent, &task, &context, &inputs)
            .await
            .unwrap();

        assert_eq!(
            out,
            "[Analyzer] Analyze the text\n\
             Expected: Insights\n\
             Input initial_text: Ice is melting.\n\
             Context pay_analyzer (completed): Payment successful, Agreement ID: X"
        );
    }

    #[test]
    fn test_truncate_long_context() {
        let long = "a".repeat(MAX_CONTEXT_CHARS + 10);
        let t = truncate(&long);
        assert!(t.ends_with("..."));
        assert_eq!(t.chars().count(), MAX_CONTEXT_CHARS + 3);
    }
}
