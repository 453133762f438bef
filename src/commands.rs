use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use tracing::{debug, info};

use crate::catalog::TopicCatalog;
use crate::dates::{self, format_date, get_days_difference, get_today_string};
use crate::error::AppError;
use crate::models::{AnswerMap, PlanDay, Question, StudyConfig};
use crate::plan::{generate_study_plan, plan_progress};
use crate::score::{evaluate_mock, outcome, MockResult, Outcome, PerformanceLevel};
use crate::storage::{filter_by_topic, load_catalog, load_questions, load_questions_from};

pub const DEFAULT_DURATION_DAYS: u32 = 30;
pub const DEFAULT_HOURS_PER_DAY: f64 = 3.0;

/// Builds a study config, defaulting the start date to today.
///
/// Fails with `DateOutOfRange` if the last study day is not a representable date.
pub fn build_config(goal: String, start: Option<String>, days: u32, hours: f64) -> Result<StudyConfig, AppError> {
    let start_date = match start {
        Some(s) => dates::parse_date(&s)?,
        None => dates::today(),
    };
    if days > 0 {
        dates::add_days(start_date, i64::from(days) - 1)?;
    }
    Ok(StudyConfig { goal, start_date, duration_days: days, hours_per_day: hours })
}

/// Parses answers written as `0=2,1=0` (question position = option index).
///
/// Both `=` and `:` are accepted as separators. Blank input is an empty map.
pub fn parse_answer_map(s: &str) -> Result<AnswerMap, AppError> {
    let mut answers = AnswerMap::new();
    for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (q, a) = pair
            .split_once(['=', ':'])
            .ok_or_else(|| AppError::InvalidAnswer(pair.to_string()))?;
        let q: usize = q.trim().parse().map_err(|_| AppError::InvalidAnswer(pair.to_string()))?;
        let a: usize = a.trim().parse().map_err(|_| AppError::InvalidAnswer(pair.to_string()))?;
        answers.insert(q.to_string(), a);
    }
    Ok(answers)
}

/// Generates a plan and prints it as a table, or as JSON when `json` is set.
pub fn cmd_plan(goal: String, start: Option<String>, days: u32, hours: f64, json: bool) -> Result<(), AppError> {
    let config = build_config(goal, start, days, hours)?;
    let catalog = load_catalog()?;
    let plan = generate_study_plan(&config, &catalog);
    info!(days = plan.len(), "study plan generated");

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }
    if plan.is_empty() {
        println!("Empty plan (0 days).");
        return Ok(());
    }

    if !config.goal.is_empty() {
        println!("Goal: {}", config.goal);
    }
    println!("{}", plan_table(&plan, &catalog));
    let progress = plan_progress(&plan);
    println!(
        "{} days, {} tasks, {:.1}h total",
        plan.len(),
        progress.total_tasks,
        progress.total_minutes as f64 / 60.0
    );
    Ok(())
}

/// Renders a plan with one row per day.
pub fn plan_table(plan: &[PlanDay], catalog: &TopicCatalog) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Day").add_attribute(Attribute::Bold),
            Cell::new("Date").add_attribute(Attribute::Bold),
            Cell::new("Topic").add_attribute(Attribute::Bold),
            Cell::new("Read").add_attribute(Attribute::Bold),
            Cell::new("Practice").add_attribute(Attribute::Bold),
            Cell::new("Explain").add_attribute(Attribute::Bold),
            Cell::new("Recall").add_attribute(Attribute::Bold),
            Cell::new("Total").add_attribute(Attribute::Bold),
        ]);

    for d in plan {
        let mut row = vec![
            Cell::new(d.day),
            Cell::new(format_date(&d.date.to_string())),
            Cell::new(catalog.name_of(d.topic_id().unwrap_or_default())),
        ];
        for t in &d.tasks {
            let cell = Cell::new(format!("{}m", t.duration_mins));
            row.push(if t.is_done { cell.fg(Color::Green) } else { cell });
        }
        row.push(Cell::new(format!("{}m", d.total_minutes())).add_attribute(Attribute::Bold));
        table.add_row(row);
    }
    table
}

/// Loads the question set for an attempt and evaluates the answers against it.
pub fn score_attempt(
    answers: &str,
    negative: bool,
    topic: Option<&str>,
    questions_file: Option<&std::path::Path>,
) -> Result<(Vec<Question>, MockResult), AppError> {
    let bank = match questions_file {
        Some(path) => load_questions_from(path)?,
        None => load_questions()?,
    };
    let questions = filter_by_topic(bank, topic);
    let answers = parse_answer_map(answers)?;
    debug!(questions = questions.len(), answered = answers.len(), negative, "scoring mock test");
    let result = evaluate_mock(&questions, &answers, negative);
    Ok((questions, result))
}

/// Scores a mock attempt and prints a per-question breakdown.
pub fn cmd_score(
    answers: String,
    negative: bool,
    topic: Option<String>,
    questions_file: Option<std::path::PathBuf>,
) -> Result<(), AppError> {
    let (questions, result) = score_attempt(&answers, negative, topic.as_deref(), questions_file.as_deref())?;
    if questions.is_empty() {
        println!("No questions found.");
        return Ok(());
    }
    let answer_map = parse_answer_map(&answers)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Question").add_attribute(Attribute::Bold),
            Cell::new("Your Answer").add_attribute(Attribute::Bold),
            Cell::new("Correct").add_attribute(Attribute::Bold),
            Cell::new("Result").add_attribute(Attribute::Bold),
            Cell::new("Explanation").add_attribute(Attribute::Bold),
        ]);

    for (i, q) in questions.iter().enumerate() {
        let chosen = answer_map
            .get(&i.to_string())
            .map(|&a| option_label(q, a))
            .unwrap_or_else(|| "-".to_string());
        let result = outcome(i, q, &answer_map);
        let (status, color) = match result {
            Outcome::Correct => ("Correct", Color::Green),
            Outcome::Incorrect => ("Wrong", Color::Red),
            Outcome::Unattempted => ("Skipped", Color::Grey),
        };
        let explanation = if result == Outcome::Incorrect { q.explanation.as_str() } else { "" };
        table.add_row(vec![
            Cell::new(i),
            Cell::new(&q.question),
            Cell::new(chosen),
            Cell::new(option_label(q, q.ans)),
            Cell::new(status).fg(color),
            Cell::new(explanation),
        ]);
    }
    println!("{table}");
    println!("{}", summary_table(&result));
    Ok(())
}

fn option_label(q: &Question, idx: usize) -> String {
    match q.options.get(idx) {
        Some(text) => format!("{}. {}", idx, text),
        None => format!("{}. ?", idx),
    }
}

/// Display color for a performance tier, shared by the CLI and the TUI.
pub fn level_color(level: PerformanceLevel) -> Color {
    match level {
        PerformanceLevel::Excellent => Color::Green,
        PerformanceLevel::Good => Color::Cyan,
        PerformanceLevel::Average => Color::Yellow,
        PerformanceLevel::NeedsImprovement => Color::Red,
    }
}

/// Score, tallies, accuracy and tier as a two-column table.
pub fn summary_table(result: &MockResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.add_row(vec![Cell::new("Score"), Cell::new(format!("{:.2} / {}", result.score, result.total))]);
    table.add_row(vec![Cell::new("Correct"), Cell::new(result.correct)]);
    table.add_row(vec![Cell::new("Wrong"), Cell::new(result.incorrect)]);
    table.add_row(vec![Cell::new("Skipped"), Cell::new(result.unattempted)]);
    table.add_row(vec![
        Cell::new("Negative Marking"),
        Cell::new(if result.negative_marking { "On (-0.33)" } else { "Off" }),
    ]);
    table.add_row(vec![Cell::new("Accuracy"), Cell::new(format!("{}%", result.accuracy))]);
    table.add_row(vec![
        Cell::new("Performance"),
        Cell::new(result.level).fg(level_color(result.level)).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Lists the topic catalog in cycling order.
pub fn cmd_topics() -> Result<(), AppError> {
    let catalog = load_catalog()?;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["#", "ID", "Name"]);
    for (i, t) in catalog.topics().iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), t.id.clone(), t.name.clone()]);
    }
    println!("{table}");
    Ok(())
}

/// Lists the question bank with the positions to use as answer keys.
pub fn cmd_questions(topic: Option<String>) -> Result<(), AppError> {
    let questions = filter_by_topic(load_questions()?, topic.as_deref());
    if questions.is_empty() {
        println!("No questions found.");
        return Ok(());
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Topic", "Question", "Options"]);
    for (i, q) in questions.iter().enumerate() {
        let options = q
            .options
            .iter()
            .enumerate()
            .map(|(j, o)| format!("{}. {}", j, o))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![i.to_string(), q.topic.clone(), q.question.clone(), options]);
    }
    println!("{table}");
    Ok(())
}

/// Days from today until `target`.
pub fn days_until(target: &str) -> Result<u64, AppError> {
    get_days_difference(&get_today_string(), target)
}

pub fn cmd_countdown(target: String) -> Result<(), AppError> {
    let days = days_until(&target)?;
    let today = dates::today();
    let target_date = dates::parse_date(&target)?;
    if target_date < today {
        println!("{} was {} days ago.", format_date(&target), days);
    } else if days == 0 {
        println!("{} is today.", format_date(&target));
    } else {
        println!("{} days until {}.", days, format_date(&target));
    }
    Ok(())
}

pub fn cmd_format_date(date: String) {
    println!("{}", format_date(&date));
}
