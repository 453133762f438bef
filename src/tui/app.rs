use std::collections::HashSet;

use ratatui::widgets::TableState;

use crate::catalog::TopicCatalog;
use crate::commands::{build_config, DEFAULT_DURATION_DAYS, DEFAULT_HOURS_PER_DAY};
use crate::error::AppError;
use crate::models::{AnswerMap, PlanDay, Question, StudyConfig};
use crate::plan::{generate_study_plan, plan_progress, PlanProgress};
use crate::score::{evaluate_mock, incorrect_positions, MockResult};
use crate::storage::{load_catalog, load_questions};

#[derive(PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
    Result,
}

#[derive(PartialEq, Debug)]
pub enum ViewMode {
    Plan,
    Mock,
}

/// A row of the plan table.
#[derive(PartialEq, Debug)]
pub enum DisplayItem {
    /// Index into `App::plan`.
    Day(usize),
    /// Day index, task index.
    Task(usize, usize),
}

/// State for the multi-step "New Plan" wizard.
#[derive(Default)]
pub struct PlanWizard {
    pub goal: String,
    pub start: Option<String>,
    pub days: u32,
    pub step: usize, // 0: Goal, 1: Start, 2: Days, 3: Hours
}

pub struct App {
    pub config: StudyConfig,
    pub catalog: TopicCatalog,
    pub plan: Vec<PlanDay>,
    pub display_items: Vec<DisplayItem>,
    pub expanded_days: HashSet<usize>,
    pub state: TableState,
    pub questions: Vec<Question>,
    pub answers: AnswerMap,
    pub question_state: TableState,
    pub negative_marking: bool,
    pub result: Option<MockResult>,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub wizard: PlanWizard,
    /// Last validation message from the wizard.
    pub status: Option<String>,
}

impl App {
    /// Creates a new App with a default plan starting today.
    pub fn new() -> Result<App, AppError> {
        let config = build_config(String::new(), None, DEFAULT_DURATION_DAYS, DEFAULT_HOURS_PER_DAY)?;
        Ok(App::with_data(config, load_catalog()?, load_questions()?))
    }

    pub fn with_data(config: StudyConfig, catalog: TopicCatalog, questions: Vec<Question>) -> App {
        let mut question_state = TableState::default();
        if !questions.is_empty() {
            question_state.select(Some(0));
        }
        let mut app = App {
            plan: generate_study_plan(&config, &catalog),
            config,
            catalog,
            display_items: Vec::new(),
            expanded_days: HashSet::new(),
            state: TableState::default(),
            questions,
            answers: AnswerMap::new(),
            question_state,
            negative_marking: true,
            result: None,
            view_mode: ViewMode::Plan,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            wizard: PlanWizard::default(),
            status: None,
        };
        app.expanded_days.insert(0);
        app.reload();
        app
    }

    fn list_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Plan => self.display_items.len(),
            ViewMode::Mock => self.questions.len(),
        }
    }

    fn current_state(&mut self) -> &mut TableState {
        match self.view_mode {
            ViewMode::Plan => &mut self.state,
            ViewMode::Mock => &mut self.question_state,
        }
    }

    /// Selects the next item in the current list.
    pub fn next(&mut self) {
        let len = self.list_len();
        if len == 0 { return; }
        let state = self.current_state();
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    /// Selects the previous item in the current list.
    pub fn previous(&mut self) {
        let len = self.list_len();
        if len == 0 { return; }
        let state = self.current_state();
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    /// Rebuilds the plan rows from the expanded days.
    pub fn reload(&mut self) {
        self.display_items.clear();
        for (di, day) in self.plan.iter().enumerate() {
            self.display_items.push(DisplayItem::Day(di));
            if self.expanded_days.contains(&di) {
                for ti in 0..day.tasks.len() {
                    self.display_items.push(DisplayItem::Task(di, ti));
                }
            }
        }

        if self.display_items.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.display_items.len() {
                self.state.select(Some(self.display_items.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Toggles the selected task's done flag, or expands/collapses the selected day.
    ///
    /// Completion lives in memory only.
    pub fn toggle_selected(&mut self) {
        if self.view_mode != ViewMode::Plan { return; }
        let Some(i) = self.state.selected() else { return; };
        match self.display_items.get(i) {
            Some(&DisplayItem::Task(di, ti)) => {
                let task = &mut self.plan[di].tasks[ti];
                task.is_done = !task.is_done;
            }
            Some(&DisplayItem::Day(di)) => {
                if !self.expanded_days.remove(&di) {
                    self.expanded_days.insert(di);
                }
                self.reload();
                self.state.select(Some(i));
            }
            None => {}
        }
    }

    /// Expands every day, or collapses all of them if all are expanded.
    pub fn toggle_expand_all(&mut self) {
        if self.expanded_days.len() == self.plan.len() {
            self.expanded_days.clear();
        } else {
            self.expanded_days = (0..self.plan.len()).collect();
        }
        self.reload();
    }

    pub fn progress(&self) -> PlanProgress {
        plan_progress(&self.plan)
    }

    /// Toggles between Plan and Mock Test views.
    pub fn toggle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Plan => ViewMode::Mock,
            ViewMode::Mock => ViewMode::Plan,
        };
    }

    /// Records `option` as the answer to the selected question.
    ///
    /// Out-of-range options are ignored.
    pub fn answer_selected(&mut self, option: usize) {
        if self.view_mode != ViewMode::Mock { return; }
        if let Some(i) = self.question_state.selected() {
            if self.questions.get(i).is_some_and(|q| option < q.options.len()) {
                self.answers.insert(i.to_string(), option);
            }
        }
    }

    pub fn clear_selected_answer(&mut self) {
        if self.view_mode != ViewMode::Mock { return; }
        if let Some(i) = self.question_state.selected() {
            self.answers.remove(&i.to_string());
        }
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.question_state.selected().and_then(|i| self.answers.get(&i.to_string()).copied())
    }

    pub fn toggle_negative_marking(&mut self) {
        self.negative_marking = !self.negative_marking;
    }

    /// Scores the current answers and shows the result.
    pub fn submit(&mut self) {
        if self.view_mode != ViewMode::Mock { return; }
        self.result = Some(evaluate_mock(&self.questions, &self.answers, self.negative_marking));
        self.input_mode = InputMode::Result;
    }

    /// Wrongly answered questions of the current attempt, with their positions.
    pub fn missed_questions(&self) -> Vec<(usize, &Question)> {
        incorrect_positions(&self.questions, &self.answers)
            .into_iter()
            .map(|i| (i, &self.questions[i]))
            .collect()
    }

    /// Closes the result popup and starts a fresh attempt.
    pub fn dismiss_result(&mut self) {
        self.input_mode = InputMode::Normal;
        self.result = None;
        self.answers.clear();
        if !self.questions.is_empty() {
            self.question_state.select(Some(0));
        }
    }

    /// Initiates the "New Plan" wizard.
    pub fn start_wizard(&mut self) {
        self.input_mode = InputMode::Editing;
        self.wizard = PlanWizard::default();
        self.input_buffer = self.config.goal.clone();
        self.status = None;
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.status = None;
    }

    /// Handles Enter in the wizard. Empty input keeps the current value.
    pub fn handle_input(&mut self) {
        if self.input_mode != InputMode::Editing { return; }
        let input = self.input_buffer.trim().to_string();
        match self.wizard.step {
            0 => {
                self.wizard.goal = if input.is_empty() { self.config.goal.clone() } else { input };
                self.advance();
            }
            1 => {
                if input.is_empty() {
                    self.wizard.start = Some(self.config.start_date.to_string());
                    self.advance();
                } else if crate::dates::parse_date(&input).is_ok() {
                    self.wizard.start = Some(input);
                    self.advance();
                } else {
                    self.status = Some(format!("Invalid date '{}'. Use YYYY-MM-DD.", input));
                }
            }
            2 => {
                if input.is_empty() {
                    self.wizard.days = self.config.duration_days;
                    self.advance();
                } else if let Ok(d) = input.parse::<u32>() {
                    self.wizard.days = d;
                    self.advance();
                } else {
                    self.status = Some(format!("Invalid number of days '{}'.", input));
                }
            }
            3 => {
                let hours = if input.is_empty() {
                    Some(self.config.hours_per_day)
                } else {
                    input.parse::<f64>().ok().filter(|h| h.is_finite())
                };
                match hours {
                    Some(h) => self.finish_wizard(h),
                    None => self.status = Some(format!("Invalid hours '{}'.", input)),
                }
            }
            _ => {}
        }
    }

    fn advance(&mut self) {
        self.wizard.step += 1;
        self.status = None;
        self.input_buffer.clear();
    }

    fn finish_wizard(&mut self, hours: f64) {
        let goal = std::mem::take(&mut self.wizard.goal);
        match build_config(goal, self.wizard.start.take(), self.wizard.days, hours) {
            Ok(config) => {
                self.plan = generate_study_plan(&config, &self.catalog);
                self.config = config;
                self.expanded_days.clear();
                self.expanded_days.insert(0);
                self.state.select(None);
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.status = None;
                self.reload();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }
}
