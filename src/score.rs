use std::fmt;

use serde::Serialize;

use crate::models::{AnswerMap, Question};

/// Marks for a correct answer.
pub const CORRECT_MARK: f64 = 1.0;
/// Deducted for an attempted wrong answer when negative marking is on.
pub const NEGATIVE_MARK: f64 = 0.33;

/// Qualitative tier for an accuracy percentage.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PerformanceLevel {
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Average,
    Good,
    Excellent,
}

impl PerformanceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Average => "Average",
            PerformanceLevel::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a single question was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Unattempted,
}

/// Classifies the question at position `idx` against the answer map.
pub fn outcome(idx: usize, question: &Question, answers: &AnswerMap) -> Outcome {
    match answers.get(&idx.to_string()) {
        None => Outcome::Unattempted,
        Some(&a) if a == question.ans => Outcome::Correct,
        Some(_) => Outcome::Incorrect,
    }
}

/// Scores a mock test.
///
/// `answers` is keyed by the question's position in `questions`. Correct
/// answers earn [`CORRECT_MARK`]; wrong ones cost [`NEGATIVE_MARK`] only when
/// `use_negative_marking` is set; unattempted questions never cost anything.
/// The result is rounded to two decimals and never below zero.
pub fn calculate_mock_score(
    questions: &[Question],
    answers: &AnswerMap,
    use_negative_marking: bool,
) -> f64 {
    let raw: f64 = questions
        .iter()
        .enumerate()
        .map(|(i, q)| match outcome(i, q, answers) {
            Outcome::Correct => CORRECT_MARK,
            Outcome::Incorrect if use_negative_marking => -NEGATIVE_MARK,
            Outcome::Incorrect | Outcome::Unattempted => 0.0,
        })
        .sum();
    round2(raw).max(0.0)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Whole percentage of `correct` over `total`; `0` when `total` is zero.
pub fn calculate_accuracy(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// Maps accuracy to a tier. Thresholds are inclusive at the lower bound.
pub fn get_performance_level(accuracy: u32) -> PerformanceLevel {
    match accuracy {
        80.. => PerformanceLevel::Excellent,
        65..=79 => PerformanceLevel::Good,
        50..=64 => PerformanceLevel::Average,
        _ => PerformanceLevel::NeedsImprovement,
    }
}

/// Positions of the attempted questions that were answered wrong.
pub fn incorrect_positions(questions: &[Question], answers: &AnswerMap) -> Vec<usize> {
    questions
        .iter()
        .enumerate()
        .filter(|&(i, q)| outcome(i, q, answers) == Outcome::Incorrect)
        .map(|(i, _)| i)
        .collect()
}

/// Full breakdown of a mock test attempt.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MockResult {
    pub score: f64,
    pub correct: usize,
    pub incorrect: usize,
    pub unattempted: usize,
    pub total: usize,
    pub accuracy: u32,
    pub level: PerformanceLevel,
    pub negative_marking: bool,
}

pub fn evaluate_mock(
    questions: &[Question],
    answers: &AnswerMap,
    use_negative_marking: bool,
) -> MockResult {
    let (mut correct, mut incorrect, mut unattempted) = (0, 0, 0);
    for (i, q) in questions.iter().enumerate() {
        match outcome(i, q, answers) {
            Outcome::Correct => correct += 1,
            Outcome::Incorrect => incorrect += 1,
            Outcome::Unattempted => unattempted += 1,
        }
    }
    let accuracy = calculate_accuracy(correct, questions.len());
    MockResult {
        score: calculate_mock_score(questions, answers, use_negative_marking),
        correct,
        incorrect,
        unattempted,
        total: questions.len(),
        accuracy,
        level: get_performance_level(accuracy),
        negative_marking: use_negative_marking,
    }
}
