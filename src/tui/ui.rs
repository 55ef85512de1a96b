use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::state::{AppScreen, AppState, InputField, NameInputMode};

/// Main render function that dispatches to the appropriate screen renderer.
pub fn render(f: &mut Frame, state: &AppState) {
    match state.screen {
        AppScreen::ProjectInput => render_project_input(f, state),
        AppScreen::LoadingSections => render_loading(f, state, "Loading sections"),
        AppScreen::SectionTable => render_section_table(f, state),
        AppScreen::NameInput => render_name_input(f, state),
        AppScreen::ConfirmDelete => render_confirm_delete(f, state),
        AppScreen::Working => {
            let message = state
                .pending
                .as_ref()
                .map(|p| p.describe())
                .unwrap_or("Working");
            render_loading(f, state, message)
        }
    }
}

fn title_paragraph(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn help_paragraph(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
}

/// Render a bordered text input and place the cursor inside it.
fn render_input(f: &mut Frame, area: Rect, title: &str, field: &InputField) {
    let input_block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let input_text = Paragraph::new(field.value.as_str())
        .style(Style::default().fg(Color::White))
        .block(input_block);
    f.render_widget(input_text, area);

    let cursor_x = area.x + field.cursor as u16 + 1;
    let cursor_y = area.y + 1;
    f.set_cursor_position((cursor_x, cursor_y));
}

/// Render the project id input screen.
fn render_project_input(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    f.render_widget(title_paragraph("Asana Board Sections".to_string()), chunks[0]);
    render_input(f, chunks[1], "Project ID", &state.project_input);
    f.render_widget(
        help_paragraph("Enter: Load sections | Esc: Quit"),
        chunks[2],
    );
    render_status_bar(f, chunks[4], state);
}

/// Render the loading screen.
fn render_loading(f: &mut Frame, state: &AppState, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    f.render_widget(title_paragraph("Asana Board Sections".to_string()), chunks[0]);

    let loading = Paragraph::new(format!("{message}..."))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, chunks[1]);

    render_status_bar(f, chunks[3], state);
}

/// Render the section table screen.
fn render_section_table(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    f.render_widget(
        title_paragraph(format!(
            "Project {} | {} sections",
            state.project,
            state.sections.len()
        )),
        chunks[0],
    );

    let rows: Vec<Row> = state
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = if i == state.selected_row {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate(&s.name, 48)),
                Cell::from(s.gid.clone()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(20),
            Constraint::Length(20),
        ],
    )
    .header(
        Row::new(vec!["#", "Name", "GID"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1),
    )
    .block(Block::default().borders(Borders::ALL).title(" Sections "));
    f.render_widget(table, chunks[1]);

    f.render_widget(
        help_paragraph(
            "n: New | r: Rename | d: Delete | K/J: Move up/down | R: Reload | Esc: Back | q: Quit",
        ),
        chunks[2],
    );
    render_status_bar(f, chunks[3], state);
}

/// Render the section name input screen.
fn render_name_input(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    let title = match state.name_mode {
        NameInputMode::Create => "New Section".to_string(),
        NameInputMode::Rename => format!(
            "Rename Section {}",
            state
                .selected_section()
                .map(|s| s.gid.as_str())
                .unwrap_or("")
        ),
    };
    f.render_widget(title_paragraph(title), chunks[0]);
    render_input(f, chunks[1], "Name", &state.name_input);
    f.render_widget(help_paragraph("Enter: Save | Esc: Cancel"), chunks[2]);
    render_status_bar(f, chunks[4], state);
}

/// Render the delete confirmation screen.
fn render_confirm_delete(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    f.render_widget(title_paragraph("Delete Section".to_string()), chunks[0]);

    let name = state
        .selected_section()
        .map(|s| s.name.as_str())
        .unwrap_or("");
    let question = Paragraph::new(format!("Delete section \"{name}\"? Sections must be empty."))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(question, chunks[1]);

    f.render_widget(help_paragraph("y: Delete | n/Esc: Cancel"), chunks[2]);
    render_status_bar(f, chunks[4], state);
}

/// Render the status bar at the bottom.
fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let status_text = if let Some(ref error) = state.error_message {
        format!(" Error: {error}")
    } else if state.api_url.is_empty() {
        " Not connected".to_string()
    } else {
        format!(" Connected to: {}", state.api_url)
    };

    let style = if state.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}
