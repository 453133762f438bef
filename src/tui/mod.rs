pub mod app;
pub mod ui;

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::error;
use app::{App, InputMode, ViewMode};
use ui::ui;

use crate::error::AppError;

pub fn run_tui() -> Result<(), AppError> {
    // Load before touching the terminal so errors print normally
    let mut app = App::new()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "tui loop failed");
    }
    Ok(res?)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else { continue; };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char('v') | KeyCode::Tab => app.toggle_view(),
                _ => match app.view_mode {
                    ViewMode::Plan => match key.code {
                        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
                        KeyCode::Char('e') => app.toggle_expand_all(),
                        KeyCode::Char('g') => app.start_wizard(),
                        _ => {}
                    },
                    ViewMode::Mock => match key.code {
                        // Options are numbered from 1 on screen
                        KeyCode::Char(c @ '1'..='9') => app.answer_selected(c as usize - '1' as usize),
                        KeyCode::Char('x') | KeyCode::Backspace => app.clear_selected_answer(),
                        KeyCode::Char('n') => app.toggle_negative_marking(),
                        KeyCode::Char('s') => app.submit(),
                        _ => {}
                    },
                },
            },
            InputMode::Result => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Enter | KeyCode::Esc => app.dismiss_result(),
                _ => {}
            },
            InputMode::Editing => match key.code {
                KeyCode::Enter => app.handle_input(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Char(c) => {
                    app.input_buffer.push(c);
                }
                KeyCode::Backspace => {
                    app.input_buffer.pop();
                }
                _ => {}
            },
        }
    }
}
