use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User-supplied parameters for generating a study plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyConfig {
    /// Free-text goal, e.g. "Clear Prelims 2027".
    pub goal: String,
    /// First day of the plan.
    pub start_date: NaiveDate,
    /// Number of study days. `0` yields an empty plan.
    pub duration_days: u32,
    /// Daily time budget in hours, may be fractional.
    pub hours_per_day: f64,
}

/// An entry of the topic catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

/// The four fixed activities that make up every study day, in order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Read,
    Practice,
    Explain,
    Recall,
}

impl TaskKind {
    /// Daily ritual order.
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Read,
        TaskKind::Practice,
        TaskKind::Explain,
        TaskKind::Recall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Read => "read",
            TaskKind::Practice => "practice",
            TaskKind::Explain => "explain",
            TaskKind::Recall => "recall",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Read => "Read",
            TaskKind::Practice => "Practice",
            TaskKind::Explain => "Explain",
            TaskKind::Recall => "Recall",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single scheduled activity within a plan day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within a plan, derived from `(day, kind)`.
    pub id: String,
    pub topic_id: String,
    pub kind: TaskKind,
    pub duration_mins: u32,
    #[serde(default)]
    pub is_done: bool,
}

/// One calendar day of the plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlanDay {
    /// 1-based day number.
    pub day: u32,
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
}

impl PlanDay {
    /// Sum of the durations of all tasks scheduled on this day.
    pub fn total_minutes(&self) -> u64 {
        self.tasks.iter().map(|t| u64::from(t.duration_mins)).sum()
    }

    /// Topic studied on this day. All tasks of a day share one topic.
    pub fn topic_id(&self) -> Option<&str> {
        self.tasks.first().map(|t| t.topic_id.as_str())
    }
}

/// A multiple-choice mock test question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index of the correct option.
    pub ans: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub topic: String,
}

/// Respondent answers keyed by the stringified zero-based position of the
/// question in the test (not by `Question::id`), valued by the chosen option.
pub type AnswerMap = HashMap<String, usize>;
