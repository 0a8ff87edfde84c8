//! The task pipeline: declared tasks run strictly in order, payments gating work.
//!
//! Every context reference must point at an earlier task, so the declared
//! order is always a valid execution order and dependency cycles cannot be
//! expressed.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use crate::agent::AgentProfile;
use crate::error::CrewError;
use crate::executor::TaskExecutor;
use crate::report::{PipelineReport, TaskOutcome, TaskStatus};
use crate::task::{TaskAction, TaskInputs, TaskSpec};
use crate::tool_registry::ToolRegistry;
use crate::tools::PAYMENT_TOOL_NAME;

/// What happens to a task whose context did not complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Dependents of a failed or blocked task are not run.
    #[default]
    Block,
    /// Dependents run anyway, with the failure text in their context.
    Continue,
}

impl FromStr for FailurePolicy {
    type Err = CrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "continue" => Ok(Self::Continue),
            other => Err(CrewError::Config(format!(
                "unknown failure policy {other:?} (expected \"block\" or \"continue\")"
            ))),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Continue => write!(f, "continue"),
        }
    }
}

/// An ordered list of tasks over a set of agents and tools.
pub struct Pipeline {
    agents: BTreeMap<String, AgentProfile>,
    tasks: Vec<TaskSpec>,
    registry: Arc<ToolRegistry>,
    policy: FailurePolicy,
}

impl Pipeline {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            agents: BTreeMap::new(),
            tasks: Vec::new(),
            registry,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn add_agent(&mut self, agent: AgentProfile) -> Result<(), CrewError> {
        if self.agents.contains_key(&agent.role) {
            return Err(CrewError::InvalidPipeline(format!(
                "duplicate agent role: {}",
                agent.role
            )));
        }
        for tool in &agent.tools {
            if !self.registry.contains(tool) {
                return Err(CrewError::UnknownTool(tool.clone()));
            }
        }
        self.agents.insert(agent.role.clone(), agent);
        Ok(())
    }

    /// Append a task after validating it against what is already declared.
    pub fn add_task(&mut self, task: TaskSpec) -> Result<(), CrewError> {
        if task.id.trim().is_empty() {
            return Err(CrewError::InvalidPipeline("task id must not be empty".to_string()));
        }
        if self.tasks.iter().any(|t| t.id == task.id) {
            return Err(CrewError::InvalidPipeline(format!(
                "duplicate task id: {}",
                task.id
            )));
        }

        let agent = self.agents.get(&task.agent).ok_or_else(|| {
            CrewError::InvalidPipeline(format!(
                "task '{}' assigned to unknown agent '{}'",
                task.id, task.agent
            ))
        })?;

        if task.is_payment() && !agent.can_use(PAYMENT_TOOL_NAME) {
            return Err(CrewError::ToolNotPermitted {
                tool: PAYMENT_TOOL_NAME.to_string(),
                agent: agent.role.clone(),
            });
        }

        for dep in &task.context {
            if dep == &task.id {
                return Err(CrewError::InvalidPipeline(format!(
                    "task '{}' lists itself as context",
                    task.id
                )));
            }
            if !self.tasks.iter().any(|t| &t.id == dep) {
                return Err(CrewError::InvalidPipeline(format!(
                    "task '{}' depends on '{dep}', which is not declared before it",
                    task.id
                )));
            }
        }

        self.tasks.push(task);
        Ok(())
    }

    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    pub fn agents(&self) -> impl Iterator<Item = &AgentProfile> {
        self.agents.values()
    }

    /// Run every task once, in declared order.
    ///
    /// Task failures are recorded in the report rather than returned; the
    /// run itself always completes.
    pub async fn run(&self, executor: &dyn TaskExecutor, inputs: &TaskInputs) -> PipelineReport {
        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = chrono::Utc::now();
        tracing::info!(
            run_id = %run_id,
            tasks = self.tasks.len(),
            policy = %self.policy,
            "Pipeline started"
        );

        let mut outcomes: Vec<TaskOutcome> = Vec::with_capacity(self.tasks.len());
        let mut index: HashMap<&str, usize> = HashMap::new();

        for task in &self.tasks {
            let context: Vec<TaskOutcome> = task
                .context
                .iter()
                .filter_map(|id| index.get(id.as_str()).map(|&i| outcomes[i].clone()))
                .collect();

            let outcome = self.run_task(task, &context, executor, inputs).await;

            match outcome.status {
                TaskStatus::Completed => tracing::info!(
                    run_id = %run_id,
                    task = %task.id,
                    agent = %task.agent,
                    duration_ms = outcome.duration_ms,
                    "Task completed"
                ),
                status => tracing::warn!(
                    run_id = %run_id,
                    task = %task.id,
                    agent = %task.agent,
                    %status,
                    output = %outcome.output,
                    "Task did not complete"
                ),
            }

            index.insert(task.id.as_str(), outcomes.len());
            outcomes.push(outcome);
        }

        let report = PipelineReport {
            run_id,
            started_at,
            outcomes,
        };
        tracing::info!(
            run_id = %report.run_id,
            completed = report.count(TaskStatus::Completed),
            failed = report.count(TaskStatus::Failed),
            blocked = report.count(TaskStatus::Blocked),
            "Pipeline finished"
        );
        report
    }

    async fn run_task(
        &self,
        task: &TaskSpec,
        context: &[TaskOutcome],
        executor: &dyn TaskExecutor,
        inputs: &TaskInputs,
    ) -> TaskOutcome {
        let start = Instant::now();
        let outcome = |status, output: String| TaskOutcome {
            task_id: task.id.clone(),
            agent: task.agent.clone(),
            status,
            output,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        if self.policy == FailurePolicy::Block {
            let unmet: Vec<&str> = context
                .iter()
                .filter(|c| !c.is_completed())
                .map(|c| c.task_id.as_str())
                .collect();
            if !unmet.is_empty() {
                return outcome(
                    TaskStatus::Blocked,
                    format!("blocked: {} did not complete", unmet.join(", ")),
                );
            }
        }

        match &task.action {
            TaskAction::Pay { service_id, amount } => {
                let args = serde_json::json!({
                    "service_did": service_id,
                    "payment_amount": amount,
                });
                match self.registry.call(PAYMENT_TOOL_NAME, &args).await {
                    Ok(result) if result.success => outcome(TaskStatus::Completed, result.output),
                    Ok(result) => outcome(TaskStatus::Failed, result.output),
                    Err(e) => outcome(TaskStatus::Failed, e.to_string()),
                }
            }
            TaskAction::Work => {
                // Agents are validated in add_task, so this lookup only fails on internal misuse.
                let Some(agent) = self.agents.get(&task.agent) else {
                    return outcome(
                        TaskStatus::Failed,
                        format!("unknown agent '{}'", task.agent),
                    );
                };
                match executor.execute(agent, task, context, inputs).await {
                    Ok(text) => outcome(TaskStatus::Completed, text),
                    Err(e) => outcome(TaskStatus::Failed, e.to_string()),
                }
            }
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("agents", &self.agents.keys().collect::<Vec<_>>())
            .field(
                "tasks",
                &self.tasks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            )
            .field("tools", &self.registry)
            .field("policy", &self.policy)
            .finish()
    }
}
