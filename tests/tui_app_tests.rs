use chrono::NaiveDate;
use upsc_prep::catalog::TopicCatalog;
use upsc_prep::models::{Question, StudyConfig};
use upsc_prep::score::PerformanceLevel;
use upsc_prep::tui::app::{App, DisplayItem, InputMode, ViewMode};

fn app(days: u32) -> App {
    let config = StudyConfig {
        goal: "Prelims".into(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        duration_days: days,
        hours_per_day: 3.0,
    };
    let questions = (0..4)
        .map(|i| Question {
            id: format!("q{}", i),
            question: format!("Question {}", i),
            options: vec!["A".into(), "B".into(), "C".into()],
            ans: i % 3,
            explanation: String::new(),
            topic: "polity".into(),
        })
        .collect();
    App::with_data(config, TopicCatalog::default(), questions)
}

#[test]
fn test_first_day_starts_expanded() {
    let app = app(3);
    // Day 1 + its 4 tasks + days 2 and 3
    assert_eq!(app.display_items.len(), 7);
    assert_eq!(app.display_items[0], DisplayItem::Day(0));
    assert_eq!(app.display_items[1], DisplayItem::Task(0, 0));
    assert_eq!(app.display_items[5], DisplayItem::Day(1));
    assert_eq!(app.state.selected(), Some(0));
}

#[test]
fn test_toggle_task_done_updates_progress() {
    let mut app = app(2);
    app.next(); // Day 1 / Read
    app.toggle_selected();
    assert!(app.plan[0].tasks[0].is_done);
    let p = app.progress();
    assert_eq!(p.completed_tasks, 1);
    assert_eq!(p.completed_minutes, 95);

    app.toggle_selected();
    assert!(!app.plan[0].tasks[0].is_done);
}

#[test]
fn test_expand_and_collapse_days() {
    let mut app = app(3);
    app.toggle_selected(); // collapse day 1
    assert_eq!(app.display_items.len(), 3);
    app.toggle_expand_all();
    assert_eq!(app.display_items.len(), 15);
    app.toggle_expand_all();
    assert_eq!(app.display_items.len(), 3);
}

#[test]
fn test_navigation_wraps() {
    let mut app = app(1);
    app.previous();
    assert_eq!(app.state.selected(), Some(4));
    app.next();
    assert_eq!(app.state.selected(), Some(0));
}

#[test]
fn test_mock_answers_and_submit() {
    let mut app = app(1);
    app.toggle_view();
    assert_eq!(app.view_mode, ViewMode::Mock);

    app.answer_selected(0); // q0 correct
    app.next();
    app.answer_selected(0); // q1 wrong
    app.next();
    app.answer_selected(9); // out of range, ignored
    assert_eq!(app.answers.len(), 2);
    assert_eq!(app.selected_answer(), None);

    app.submit();
    assert_eq!(app.input_mode, InputMode::Result);
    let result = app.result.clone().unwrap();
    assert_eq!(result.correct, 1);
    assert_eq!(result.incorrect, 1);
    assert_eq!(result.unattempted, 2);
    assert_eq!(result.score, 0.67);
    assert_eq!(result.accuracy, 25);
    assert_eq!(result.level, PerformanceLevel::NeedsImprovement);

    app.dismiss_result();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.answers.is_empty());
    assert_eq!(app.question_state.selected(), Some(0));
}

#[test]
fn test_negative_marking_toggle_and_clear() {
    let mut app = app(1);
    app.toggle_view();
    app.next();
    app.answer_selected(0); // q1 wrong
    app.toggle_negative_marking();
    assert!(!app.negative_marking);
    app.submit();
    assert_eq!(app.result.as_ref().unwrap().score, 0.0);
    app.dismiss_result();

    app.answer_selected(2);
    app.clear_selected_answer();
    assert!(app.answers.is_empty());
}

#[test]
fn test_wizard_regenerates_plan() {
    let mut app = app(3);
    app.start_wizard();
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.input_buffer, "Prelims");

    app.input_buffer = "Mains".into();
    app.handle_input();
    app.input_buffer = "2026-13-01".into();
    app.handle_input();
    assert!(app.status.is_some());
    assert_eq!(app.wizard.step, 1);

    app.input_buffer = "2026-02-01".into();
    app.handle_input();
    app.input_buffer = "5".into();
    app.handle_input();
    app.input_buffer = "1.5".into();
    app.handle_input();

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.config.goal, "Mains");
    assert_eq!(app.plan.len(), 5);
    assert_eq!(app.plan[0].date.to_string(), "2026-02-01");
    assert_eq!(app.plan[0].tasks[0].duration_mins, 30);
}

#[test]
fn test_wizard_empty_input_keeps_current_values() {
    let mut app = app(4);
    app.start_wizard();
    for _ in 0..4 {
        app.input_buffer.clear();
        app.handle_input();
    }
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.config.goal, "Prelims");
    assert_eq!(app.plan.len(), 4);
    assert_eq!(app.plan[0].date.to_string(), "2026-01-01");
}

#[test]
fn test_zero_day_plan_has_no_rows() {
    let mut app = app(0);
    assert!(app.display_items.is_empty());
    assert_eq!(app.state.selected(), None);
    app.next();
    app.toggle_selected();
    assert_eq!(app.progress().percent, 0);
}

#[test]
fn test_missed_questions_carry_explanations() {
    let mut app = app(1);
    app.questions[1].explanation = "B is the right option".into();
    app.toggle_view();
    app.answer_selected(0); // q0 correct
    app.next();
    app.answer_selected(2); // q1 wrong
    app.submit();

    let missed = app.missed_questions();
    assert_eq!(missed.len(), 1);
    assert_eq!(missed[0].0, 1);
    assert_eq!(missed[0].1.explanation, "B is the right option");

    app.dismiss_result();
    assert!(app.missed_questions().is_empty());
}
