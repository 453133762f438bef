use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::TopicCatalog;
use crate::error::AppError;
use crate::models::{Question, Topic};

/// Sample question bank shipped with the binary.
const BUILTIN_QUESTIONS: &str = include_str!("../data/questions.json");

/// Returns the data directory.
///
/// The path is determined in the following order:
/// 1. `UPSC_PREP_DATA` environment variable.
/// 2. `~/.local/share/upsc-prep` (on Linux).
/// 3. `./upsc-prep` (fallback).
pub fn data_dir() -> PathBuf {
    std::env::var("UPSC_PREP_DATA").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("upsc-prep");
        p
    })
}

/// Path of the optional custom topic catalog (`topics.json`).
pub fn catalog_path() -> PathBuf {
    data_dir().join("topics.json")
}

/// Path of the optional custom question bank (`questions.json`).
pub fn questions_path() -> PathBuf {
    data_dir().join("questions.json")
}

/// Loads the topic catalog.
///
/// Falls back to the default catalog if `topics.json` does not exist.
pub fn load_catalog() -> Result<TopicCatalog, AppError> {
    let path = catalog_path();
    if !path.exists() {
        debug!(path = %path.display(), "no custom catalog, using default");
        return Ok(TopicCatalog::default());
    }
    load_catalog_from(&path)
}

/// Loads a topic catalog from a JSON array of `{id, name}`.
pub fn load_catalog_from(path: &Path) -> Result<TopicCatalog, AppError> {
    let s = fs::read_to_string(path)?;
    let topics: Vec<Topic> = serde_json::from_str(&s)?;
    debug!(path = %path.display(), count = topics.len(), "loaded topic catalog");
    TopicCatalog::new(topics)
}

/// Loads the question bank.
///
/// Falls back to the built-in sample bank if `questions.json` does not exist.
pub fn load_questions() -> Result<Vec<Question>, AppError> {
    let path = questions_path();
    if !path.exists() {
        debug!(path = %path.display(), "no custom question bank, using built-in");
        return builtin_questions();
    }
    load_questions_from(&path)
}

pub fn load_questions_from(path: &Path) -> Result<Vec<Question>, AppError> {
    let s = fs::read_to_string(path)?;
    let questions: Vec<Question> = serde_json::from_str(&s)?;
    debug!(path = %path.display(), count = questions.len(), "loaded question bank");
    Ok(questions)
}

pub fn builtin_questions() -> Result<Vec<Question>, AppError> {
    Ok(serde_json::from_str(BUILTIN_QUESTIONS)?)
}

/// Keeps the questions tagged with `topic`, preserving bank order.
///
/// Positions in the returned list are the keys the answer map must use.
pub fn filter_by_topic(questions: Vec<Question>, topic: Option<&str>) -> Vec<Question> {
    match topic {
        Some(topic) => questions.into_iter().filter(|q| q.topic == topic).collect(),
        None => questions,
    }
}
