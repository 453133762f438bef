//! # upsc-prep
//!
//! Study-plan generation and mock-test scoring for UPSC civil-services preparation,
//! with a CLI for quick use and a TUI (Terminal User Interface) for browsing a plan
//! and taking a mock test.
//!
//! ## Features
//!
//! *   **Study Plans**: A config (goal, start date, days, hours per day) expands into one
//!     entry per day, cycling through the topic catalog. Every day follows the same
//!     ritual: Read, Practice (60m), Explain (15m), Recall (10m). Read gets the rest of
//!     the daily budget, never less than 30 minutes.
//! *   **Mock Tests**: Scores answers with optional negative marking (-0.33 per wrong
//!     answer), reports accuracy and a performance tier.
//! *   **Dates**: Calendar-correct day arithmetic and short display formatting.
//!
//! ## Usage
//!
//! ```bash
//! # 30-day plan starting today, 3 hours a day
//! upsc-prep plan --goal "Prelims 2027"
//!
//! # 7 days from a given date, 1.5 hours a day, as JSON
//! upsc-prep plan --start 2026-11-01 --days 7 --hours 1.5 --json
//!
//! # Score answers (question position = option index) with negative marking
//! upsc-prep score --answers "0=2,1=1,2=0" --negative
//!
//! # Days until the exam
//! upsc-prep countdown 2027-05-23
//!
//! # Interactive mode
//! upsc-prep ui
//! ```
//!
//! ## Data
//!
//! Custom `topics.json` and `questions.json` are read from your local data directory:
//! *   Linux: `~/.local/share/upsc-prep/`
//! *   macOS: `~/Library/Application Support/upsc-prep/`
//! *   Windows: `%APPDATA%\upsc-prep\`
//!
//! You can override this by setting the `UPSC_PREP_DATA` environment variable. When
//! the files are absent, a default catalog and a built-in sample bank are used.

pub mod catalog;
pub mod commands;
pub mod dates;
pub mod error;
pub mod logging;
pub mod models;
pub mod plan;
pub mod score;
pub mod storage;
pub mod tui;

pub use catalog::TopicCatalog;
pub use error::AppError;
pub use plan::generate_study_plan;
pub use score::{calculate_accuracy, calculate_mock_score, get_performance_level};
