use serde::Serialize;
use tracing::debug;

use crate::catalog::TopicCatalog;
use crate::models::{PlanDay, StudyConfig, Task, TaskKind};
use crate::score::calculate_accuracy;

pub const PRACTICE_MINUTES: u32 = 60;
pub const EXPLAIN_MINUTES: u32 = 15;
pub const RECALL_MINUTES: u32 = 10;
/// Floor for the Read task, applied even when it overshoots the daily budget.
pub const MIN_READ_MINUTES: u32 = 30;

const FIXED_MINUTES: u32 = PRACTICE_MINUTES + EXPLAIN_MINUTES + RECALL_MINUTES;

/// Expands a config into one [`PlanDay`] per study day.
///
/// Day `d` studies `catalog[(d - 1) % len]` through the fixed ritual
/// Read, Practice, Explain, Recall. Read gets whatever the daily budget
/// leaves after the three fixed tasks, but never less than
/// [`MIN_READ_MINUTES`].
///
/// Dates stop at `NaiveDate::MAX`: a plan that would run past it is cut
/// short there. [`crate::commands::build_config`] rejects such configs.
pub fn generate_study_plan(config: &StudyConfig, catalog: &TopicCatalog) -> Vec<PlanDay> {
    let read = read_minutes(config.hours_per_day);
    debug!(
        goal = %config.goal,
        start = %config.start_date,
        days = config.duration_days,
        read_minutes = read,
        "generating study plan"
    );

    (1..=config.duration_days)
        .zip(config.start_date.iter_days())
        .map(|(day, date)| {
            let topic = catalog.topic_for_day(day);
            let tasks = TaskKind::ALL
                .iter()
                .map(|&kind| Task {
                    id: task_id(day, kind),
                    topic_id: topic.id.clone(),
                    kind,
                    duration_mins: duration_for(kind, read),
                    is_done: false,
                })
                .collect();
            PlanDay { day, date, tasks }
        })
        .collect()
}

/// Reproducible task id, unique per `(day, kind)`: `day3-practice`.
pub fn task_id(day: u32, kind: TaskKind) -> String {
    format!("day{}-{}", day, kind.as_str())
}

/// Minutes allotted to the Read task for a daily budget in hours.
///
/// The budget is rounded to whole minutes first. Negative or NaN budgets
/// clamp to the floor.
pub fn read_minutes(hours_per_day: f64) -> u32 {
    let remaining = (hours_per_day * 60.0).round() - FIXED_MINUTES as f64;
    if remaining.is_nan() || remaining < MIN_READ_MINUTES as f64 {
        MIN_READ_MINUTES
    } else {
        remaining.min(u32::MAX as f64) as u32
    }
}

fn duration_for(kind: TaskKind, read: u32) -> u32 {
    match kind {
        TaskKind::Read => read,
        TaskKind::Practice => PRACTICE_MINUTES,
        TaskKind::Explain => EXPLAIN_MINUTES,
        TaskKind::Recall => RECALL_MINUTES,
    }
}

/// Completion summary of a plan.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgress {
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub completed_minutes: u64,
    pub total_minutes: u64,
    /// Whole percentage of tasks done, `0` for an empty plan.
    pub percent: u32,
}

pub fn plan_progress(plan: &[PlanDay]) -> PlanProgress {
    let mut p = PlanProgress::default();
    for task in plan.iter().flat_map(|d| d.tasks.iter()) {
        p.total_tasks += 1;
        p.total_minutes = p.total_minutes.saturating_add(u64::from(task.duration_mins));
        if task.is_done {
            p.completed_tasks += 1;
            p.completed_minutes = p.completed_minutes.saturating_add(u64::from(task.duration_mins));
        }
    }
    p.percent = calculate_accuracy(p.completed_tasks, p.total_tasks);
    p
}
