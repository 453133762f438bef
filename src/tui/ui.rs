use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};
use crate::dates::format_date;
use crate::commands::level_color;
use super::app::{App, DisplayItem, InputMode, ViewMode};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ].as_ref())
        .split(f.area());

    match app.view_mode {
        ViewMode::Plan => render_plan(f, app, chunks[0], chunks[1]),
        ViewMode::Mock => render_mock(f, app, chunks[0], chunks[1]),
    }

    let help_text = match app.input_mode {
        InputMode::Normal => match app.view_mode {
            ViewMode::Plan => "q: Quit | j/k: Move | Space: Done/Expand | e: Expand All | g: New Plan | v: Mock Test",
            ViewMode::Mock => "q: Quit | j/k: Move | 1-9: Answer | x: Clear | n: Negative Marking | s: Submit | v: Plan",
        },
        InputMode::Editing => "Enter: Next Step (empty keeps current) | Esc: Cancel",
        InputMode::Result => "Enter/Esc: New Attempt | q: Quit",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[2]);

    match app.input_mode {
        InputMode::Editing => render_wizard(f, app),
        InputMode::Result => render_result(f, app),
        InputMode::Normal => {}
    }
}

fn render_plan(f: &mut Frame, app: &mut App, area: Rect, status_area: Rect) {
    let rows: Vec<Row> = app
        .display_items
        .iter()
        .map(|item| match *item {
            DisplayItem::Day(di) => {
                let day = &app.plan[di];
                let done = day.tasks.iter().filter(|t| t.is_done).count();
                let marker = if app.expanded_days.contains(&di) { "v" } else { ">" };
                let style = if done == day.tasks.len() {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                Row::new(vec![
                    Cell::from(format!("{} {}", marker, day.day)),
                    Cell::from(format_date(&day.date.to_string())),
                    Cell::from(app.catalog.name_of(day.topic_id().unwrap_or_default()).to_string()),
                    Cell::from(format!("{}m", day.total_minutes())),
                    Cell::from(format!("{}/{}", done, day.tasks.len())),
                ]).style(style)
            }
            DisplayItem::Task(di, ti) => {
                let task = &app.plan[di].tasks[ti];
                let style = if task.is_done {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(""),
                    Cell::from(""),
                    Cell::from(format!("  {}", task.kind)),
                    Cell::from(format!("{}m", task.duration_mins)),
                    Cell::from(if task.is_done { "[x]" } else { "[ ]" }),
                ]).style(style)
            }
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Length(13),
        Constraint::Min(24),
        Constraint::Length(7),
        Constraint::Length(6),
    ];

    let title = if app.config.goal.is_empty() {
        "UPSC Prep - Study Plan".to_string()
    } else {
        format!("UPSC Prep - {}", app.config.goal)
    };

    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Day", "Date", "Topic / Task", "Time", "Done"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);

    let progress = app.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(progress.percent.min(100) as u16)
        .label(format!(
            "{}/{} tasks | {:.1}h of {:.1}h",
            progress.completed_tasks,
            progress.total_tasks,
            progress.completed_minutes as f64 / 60.0,
            progress.total_minutes as f64 / 60.0,
        ));
    f.render_widget(gauge, status_area);
}

fn render_mock(f: &mut Frame, app: &mut App, area: Rect, status_area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
        .split(area);

    let rows: Vec<Row> = app
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answered = app.answers.contains_key(&i.to_string());
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(q.topic.clone()),
                Cell::from(if answered { "*" } else { "" }),
            ]).style(if answered { Style::default().fg(Color::Yellow) } else { Style::default() })
        })
        .collect();

    let widths = [Constraint::Length(4), Constraint::Min(12), Constraint::Length(3)];
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["#", "Topic", ""])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title("UPSC Prep - Mock Test"))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, cols[0], &mut app.question_state);

    let selected = app.question_state.selected().and_then(|i| app.questions.get(i).map(|q| (i, q)));
    let body = match selected {
        Some((i, q)) => {
            let chosen = app.selected_answer();
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("Q{}. {}", i + 1, q.question),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            for (j, opt) in q.options.iter().enumerate() {
                let style = if chosen == Some(j) {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(format!("  {}. {}", j + 1, opt), style)));
            }
            lines
        }
        None => vec![Line::from("No questions available.")],
    };
    let question = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, cols[1]);

    let status = Paragraph::new(format!(
        "Answered {}/{} | Negative marking: {}",
        app.answers.len(),
        app.questions.len(),
        if app.negative_marking { "On (-0.33)" } else { "Off" },
    ))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, status_area);
}

fn render_wizard(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 4, f.area());
    f.render_widget(Clear, area);

    let title = match app.wizard.step {
        0 => "New Plan: Enter Goal".to_string(),
        1 => format!("New Plan: Start Date (YYYY-MM-DD) [{}]", app.config.start_date),
        2 => format!("New Plan: Number of Days [{}]", app.config.duration_days),
        3 => format!("New Plan: Hours per Day [{}]", app.config.hours_per_day),
        _ => "New Plan".to_string(),
    };

    let mut lines = vec![Line::from(Span::styled(
        app.input_buffer.as_str(),
        Style::default().fg(Color::Yellow),
    ))];
    if let Some(msg) = &app.status {
        lines.push(Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Red))));
    }

    let input = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);
}

fn render_result(f: &mut Frame, app: &App) {
    let Some(result) = &app.result else { return; };
    let missed = app.missed_questions();
    let extra = u16::try_from(missed.len()).unwrap_or(u16::MAX).saturating_mul(2);
    let height = 8u16.saturating_add(extra).min(f.area().height);
    let area = centered_rect(60, height, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(format!("Score:     {:.2} / {}", result.score, result.total)),
        Line::from(format!("Correct:   {}", result.correct)),
        Line::from(format!("Wrong:     {}", result.incorrect)),
        Line::from(format!("Skipped:   {}", result.unattempted)),
        Line::from(format!("Accuracy:  {}%", result.accuracy)),
        Line::from(Span::styled(
            format!("Level:     {}", result.level),
            Style::default().fg(tui_color(level_color(result.level))).add_modifier(Modifier::BOLD),
        )),
    ];
    for (i, q) in missed {
        lines.push(Line::from(Span::styled(
            format!("Q{}: correct is {}", i + 1, q.ans + 1),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(format!("  {}", q.explanation)));
    }
    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Result"));
    f.render_widget(popup, area);
}

/// Bridges comfy-table's palette to ratatui's for the colors the CLI uses.
fn tui_color(c: comfy_table::Color) -> Color {
    match c {
        comfy_table::Color::Green => Color::Green,
        comfy_table::Color::Cyan => Color::Cyan,
        comfy_table::Color::Yellow => Color::Yellow,
        comfy_table::Color::Red => Color::Red,
        comfy_table::Color::Grey => Color::Gray,
        _ => Color::Reset,
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Length(margin),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
