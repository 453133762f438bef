use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use upsc_prep::commands::{build_config, days_until, parse_answer_map, plan_table, score_attempt};
use upsc_prep::dates::{add_days_to_date, get_today_string};
use upsc_prep::error::AppError;
use upsc_prep::plan::generate_study_plan;
use upsc_prep::score::PerformanceLevel;
use upsc_prep::storage::{builtin_questions, data_dir, load_catalog, load_questions};

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_dir<F>(test_name: &str, f: F)
where
    F: FnOnce(PathBuf),
{
    let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let mut dir = env::temp_dir();
    dir.push(format!("upsc_prep_test_{}", test_name));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    env::set_var("UPSC_PREP_DATA", dir.to_str().unwrap());

    f(dir.clone());

    fs::remove_dir_all(&dir).unwrap();
    env::remove_var("UPSC_PREP_DATA");
}

const QUESTIONS: &str = r#"[
  {"id": "x1", "question": "One?", "options": ["a", "b"], "ans": 0, "explanation": "", "topic": "polity"},
  {"id": "x2", "question": "Two?", "options": ["a", "b"], "ans": 1, "explanation": "", "topic": "economy"},
  {"id": "x3", "question": "Three?", "options": ["a", "b", "c"], "ans": 2, "topic": "polity"}
]"#;

#[test]
fn test_parse_answer_map() {
    let a = parse_answer_map("0=2, 1:0 ,5=3").unwrap();
    assert_eq!(a.len(), 3);
    assert_eq!(a.get("0"), Some(&2));
    assert_eq!(a.get("1"), Some(&0));
    assert_eq!(a.get("5"), Some(&3));

    assert!(parse_answer_map("").unwrap().is_empty());
    assert!(parse_answer_map(" , ").unwrap().is_empty());
}

#[test]
fn test_parse_answer_map_rejects_garbage() {
    assert!(matches!(parse_answer_map("0"), Err(AppError::InvalidAnswer(_))));
    assert!(matches!(parse_answer_map("a=1"), Err(AppError::InvalidAnswer(_))));
    assert!(matches!(parse_answer_map("1=-1"), Err(AppError::InvalidAnswer(_))));
}

#[test]
fn test_build_config() {
    let cfg = build_config("Mains".into(), Some("2026-11-01".into()), 10, 2.5).unwrap();
    assert_eq!(cfg.start_date.to_string(), "2026-11-01");
    assert_eq!(cfg.duration_days, 10);

    let cfg = build_config(String::new(), None, 1, 3.0).unwrap();
    assert_eq!(cfg.start_date.to_string(), get_today_string());

    assert!(matches!(
        build_config(String::new(), Some("01/11/2026".into()), 1, 3.0),
        Err(AppError::InvalidDate(_))
    ));
}

#[test]
fn test_days_until() {
    let in_ten = add_days_to_date(&get_today_string(), 10).unwrap();
    assert_eq!(days_until(&in_ten).unwrap(), 10);
    let ago = add_days_to_date(&get_today_string(), -3).unwrap();
    assert_eq!(days_until(&ago).unwrap(), 3);
}

#[test]
fn test_defaults_without_data_files() {
    with_test_dir("defaults", |dir| {
        assert_eq!(data_dir(), dir);
        let catalog = load_catalog().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.topics()[0].id, "polity");
        assert_eq!(load_questions().unwrap(), builtin_questions().unwrap());
    });
}

#[test]
fn test_builtin_bank_is_well_formed() {
    let qs = builtin_questions().unwrap();
    assert!(!qs.is_empty());
    for q in &qs {
        assert!(q.ans < q.options.len(), "{} has an out-of-range answer", q.id);
    }
}

#[test]
fn test_custom_catalog_drives_plan() {
    with_test_dir("catalog", |dir| {
        fs::write(
            dir.join("topics.json"),
            r#"[{"id": "csat", "name": "CSAT"}, {"id": "essay", "name": "Essay"}]"#,
        )
        .unwrap();
        let catalog = load_catalog().unwrap();
        let cfg = build_config(String::new(), Some("2026-01-01".into()), 3, 3.0).unwrap();
        let plan = generate_study_plan(&cfg, &catalog);
        let topics: Vec<&str> = plan.iter().map(|d| d.topic_id().unwrap()).collect();
        assert_eq!(topics, vec!["csat", "essay", "csat"]);

        let rendered = plan_table(&plan, &catalog).to_string();
        assert!(rendered.contains("CSAT"));
        assert!(rendered.contains("Thu, 1 Jan"));
    });
}

#[test]
fn test_empty_custom_catalog_is_an_error() {
    with_test_dir("empty_catalog", |dir| {
        fs::write(dir.join("topics.json"), "[]").unwrap();
        assert!(matches!(load_catalog(), Err(AppError::EmptyCatalog)));
    });
}

#[test]
fn test_score_attempt_with_topic_filter() {
    with_test_dir("score_topic", |dir| {
        fs::write(dir.join("questions.json"), QUESTIONS).unwrap();

        // Positions refer to the filtered list: x1, x3
        let (questions, result) = score_attempt("0=0,1=1", true, Some("polity"), None).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].id, "x3");
        assert_eq!(result.correct, 1);
        assert_eq!(result.incorrect, 1);
        assert_eq!(result.score, 0.67);
        assert_eq!(result.accuracy, 50);
        assert_eq!(result.level, PerformanceLevel::Average);
    });
}

#[test]
fn test_score_attempt_from_explicit_file() {
    with_test_dir("score_file", |dir| {
        let path = dir.join("custom.json");
        fs::write(&path, QUESTIONS).unwrap();
        let (questions, result) = score_attempt("0=0,1=1,2=2", false, None, Some(&path)).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(result.score, 3.0);
        assert_eq!(result.level, PerformanceLevel::Excellent);
    });
}

#[test]
fn test_score_attempt_bad_bank() {
    with_test_dir("bad_bank", |dir| {
        fs::write(dir.join("questions.json"), "{not json").unwrap();
        assert!(matches!(score_attempt("", false, None, None), Err(AppError::Json(_))));
        let missing = dir.join("missing.json");
        assert!(matches!(score_attempt("", false, None, Some(&missing)), Err(AppError::Io(_))));
    });
}

#[test]
fn test_build_config_rejects_plan_past_max_date() {
    assert!(matches!(
        build_config(String::new(), None, u32::MAX, 3.0),
        Err(AppError::DateOutOfRange(_, _))
    ));
    assert!(build_config(String::new(), Some("2026-01-01".into()), 0, 3.0).is_ok());
}

#[test]
fn test_level_colors() {
    use comfy_table::Color;
    use upsc_prep::commands::level_color;
    assert_eq!(level_color(PerformanceLevel::Excellent), Color::Green);
    assert_eq!(level_color(PerformanceLevel::Good), Color::Cyan);
    assert_eq!(level_color(PerformanceLevel::Average), Color::Yellow);
    assert_eq!(level_color(PerformanceLevel::NeedsImprovement), Color::Red);
}
