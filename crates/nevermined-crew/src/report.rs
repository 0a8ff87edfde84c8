//! Outcomes of a pipeline run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Completed,
    /// The task ran and failed (for payments: the gateway answered `Failure`).
    Failed,
    /// The task never ran because a task it depends on did not complete.
    Blocked,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one task, also handed to dependent tasks as context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub task_id: String,
    pub agent: String,
    pub status: TaskStatus,
    pub output: String,
    pub duration_ms: u64,
}

impl TaskOutcome {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Every outcome of one run, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<TaskOutcome>,
}

impl PipelineReport {
    pub fn outcome(&self, task_id: &str) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.task_id == task_id)
    }

    /// True when every task completed.
    pub fn succeeded(&self) -> bool {
        self.outcomes.iter().all(TaskOutcome::is_completed)
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Output of the last completed task.
    pub fn final_output(&self) -> Option<&str> {
        self.outcomes
            .iter()
            .rev()
            .find(|o| o.is_completed())
            .map(|o| o.output.as_str())
    }
}
