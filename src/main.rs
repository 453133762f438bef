use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use upsc_prep::commands::*;
use upsc_prep::error::AppError;
use upsc_prep::logging::init_tracing;
use upsc_prep::tui::run_tui;

#[derive(Parser)]
#[command(name = "upsc-prep")]
#[command(about = "UPSC study planner and mock test scorer", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a study plan
    Plan {
        /// Study goal
        #[arg(short, long, default_value = "")]
        goal: String,
        /// Start date in YYYY-MM-DD (default: today)
        #[arg(short, long)]
        start: Option<String>,
        /// Number of study days
        #[arg(short, long, default_value_t = DEFAULT_DURATION_DAYS)]
        days: u32,
        /// Hours per day (float), e.g. 1.5
        #[arg(short = 'H', long, default_value_t = DEFAULT_HOURS_PER_DAY)]
        hours: f64,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score a mock test
    Score {
        /// Answers as <question>=<option> pairs, e.g. "0=2,1=0"
        #[arg(short, long, default_value = "")]
        answers: String,
        /// Deduct 0.33 per wrong answer
        #[arg(short, long)]
        negative: bool,
        /// Only use questions tagged with this topic
        #[arg(short, long)]
        topic: Option<String>,
        /// Question bank JSON file (default: data directory or built-in)
        #[arg(short, long)]
        questions: Option<PathBuf>,
    },
    /// List the topic catalog
    Topics,
    /// List the question bank
    Questions {
        /// Only show questions tagged with this topic
        #[arg(short, long)]
        topic: Option<String>,
    },
    /// Show days remaining until a date
    Countdown {
        /// Target date in YYYY-MM-DD
        date: String,
    },
    /// Format a date for display
    FormatDate {
        /// Date or datetime in ISO 8601
        date: String,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Some(Commands::Plan { goal, start, days, hours, json }) => cmd_plan(goal, start, days, hours, json),
        Some(Commands::Score { answers, negative, topic, questions }) => cmd_score(answers, negative, topic, questions),
        Some(Commands::Topics) => cmd_topics(),
        Some(Commands::Questions { topic }) => cmd_questions(topic),
        Some(Commands::Countdown { date }) => cmd_countdown(date),
        Some(Commands::FormatDate { date }) => {
            cmd_format_date(date);
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => return Err(AppError::UnsupportedShell(shell)),
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "upsc-prep", &mut io::stdout());
            Ok(())
        }
        Some(Commands::Ui) | None => run_tui(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let is_tui = matches!(cli.command, Some(Commands::Ui) | None);
    init_tracing(cli.verbose, is_tui);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
