use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppScreen, AppState, InputField, NameInputMode, PendingAction};
use crate::InsertSectionParams;

/// Main event handler that dispatches to the appropriate screen handler.
pub fn handle_event(event: Event, state: &mut AppState) {
    if let Event::Key(key_event) = event {
        // 'q' quits everywhere except where it can be typed.
        if key_event.code == KeyCode::Char('q')
            && !matches!(state.screen, AppScreen::ProjectInput | AppScreen::NameInput)
            && key_event.modifiers == KeyModifiers::NONE
        {
            state.should_quit = true;
            return;
        }

        match state.screen {
            AppScreen::ProjectInput => handle_project_input(key_event, state),
            AppScreen::SectionTable => handle_section_table(key_event, state),
            AppScreen::NameInput => handle_name_input(key_event, state),
            AppScreen::ConfirmDelete => handle_confirm_delete(key_event, state),
            _ => {} // Loading screens don't handle input
        }
    }
}

/// Apply an editing key to a text field. Returns `true` if the key was consumed.
fn edit_field(field: &mut InputField, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => field.insert(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.left(),
        KeyCode::Right => field.right(),
        KeyCode::Home => field.home(),
        KeyCode::End => field.end(),
        _ => return false,
    }
    true
}

fn handle_project_input(event: KeyEvent, state: &mut AppState) {
    if edit_field(&mut state.project_input, event.code) {
        state.clear_error();
        return;
    }
    match event.code {
        KeyCode::Enter => {
            let project = state.project_input.value.trim().to_string();
            if project.is_empty() {
                state.set_error("Enter a project id".to_string());
                return;
            }
            if let Err(e) = state.init_client() {
                state.set_error(e);
            } else {
                state.project = project;
                state.sections.clear();
                state.selected_row = 0;
                state.start_loading(AppScreen::ProjectInput);
            }
        }
        KeyCode::Esc => {
            state.should_quit = true;
        }
        _ => {}
    }
}

fn handle_section_table(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up => {
            if state.selected_row > 0 {
                state.selected_row -= 1;
            }
        }
        KeyCode::Down => {
            if state.selected_row < state.sections.len().saturating_sub(1) {
                state.selected_row += 1;
            }
        }
        KeyCode::Char('n') => {
            state.name_input.clear();
            state.name_mode = NameInputMode::Create;
            state.screen = AppScreen::NameInput;
            state.clear_error();
        }
        KeyCode::Char('r') => {
            if let Some(name) = state.selected_section().map(|s| s.name.clone()) {
                state.name_input.set(&name);
                state.name_mode = NameInputMode::Rename;
                state.screen = AppScreen::NameInput;
                state.clear_error();
            }
        }
        KeyCode::Char('d') => {
            if state.selected_section().is_some() {
                state.screen = AppScreen::ConfirmDelete;
                state.clear_error();
            }
        }
        KeyCode::Char('K') => move_selected(state, -1),
        KeyCode::Char('J') => move_selected(state, 1),
        KeyCode::Char('R') => {
            state.clear_error();
            state.start_loading(AppScreen::SectionTable);
        }
        KeyCode::Esc => {
            state.clear_error();
            state.screen = AppScreen::ProjectInput;
        }
        _ => {}
    }
}

/// Queue a move of the selected section one slot up (`-1`) or down (`1`).
fn move_selected(state: &mut AppState, offset: isize) {
    let row = state.selected_row;
    let Some(target) = row.checked_add_signed(offset) else {
        return;
    };
    let (Some(section), Some(neighbour)) = (state.sections.get(row), state.sections.get(target))
    else {
        return;
    };

    let insert = if offset < 0 {
        InsertSectionParams::before(section.gid.as_str(), neighbour.gid.as_str())
    } else {
        InsertSectionParams::after(section.gid.as_str(), neighbour.gid.as_str())
    };
    state.pending = Some(PendingAction::Move {
        insert,
        to_row: target,
    });
    state.clear_error();
    state.screen = AppScreen::Working;
}

fn handle_name_input(event: KeyEvent, state: &mut AppState) {
    if edit_field(&mut state.name_input, event.code) {
        state.clear_error();
        return;
    }
    match event.code {
        KeyCode::Enter => {
            let name = state.name_input.value.trim().to_string();
            if name.is_empty() {
                state.set_error("Section name cannot be empty".to_string());
                return;
            }
            let action = match state.name_mode {
                NameInputMode::Create => Some(PendingAction::Create { name }),
                NameInputMode::Rename => state.selected_section().map(|s| PendingAction::Rename {
                    section: s.gid.clone(),
                    name,
                }),
            };
            if let Some(action) = action {
                state.pending = Some(action);
                state.screen = AppScreen::Working;
            } else {
                state.screen = AppScreen::SectionTable;
            }
        }
        KeyCode::Esc => {
            state.clear_error();
            state.screen = AppScreen::SectionTable;
        }
        _ => {}
    }
}

fn handle_confirm_delete(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(section) = state.selected_section().map(|s| s.gid.clone()) {
                state.pending = Some(PendingAction::Delete { section });
                state.screen = AppScreen::Working;
            } else {
                state.screen = AppScreen::SectionTable;
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            state.screen = AppScreen::SectionTable;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use super::*;
    use crate::transport::testing::RecordingTransport;
    use crate::tui::process_state;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn shifted(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(key(KeyCode::Char(c)), state);
        }
    }

    fn board() -> Value {
        json!([
            { "gid": "1", "resource_type": "section", "name": "To do" },
            { "gid": "2", "resource_type": "section", "name": "Doing" },
            { "gid": "3", "resource_type": "section", "name": "Done" }
        ])
    }

    /// A state that has already loaded the board of project 1331.
    fn loaded_state() -> (Arc<RecordingTransport>, AppState) {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(Ok(board()));
        let mut state =
            AppState::with_transport(Box::new(Arc::clone(&transport)), "http://localhost");

        type_text(&mut state, "1331");
        handle_event(key(KeyCode::Enter), &mut state);
        assert_eq!(state.screen, AppScreen::LoadingSections);
        process_state(&mut state);
        assert_eq!(state.screen, AppScreen::SectionTable);
        (transport, state)
    }

    #[test]
    fn entering_a_project_lists_its_sections() {
        let (transport, state) = loaded_state();

        assert_eq!(state.project, "1331");
        assert_eq!(state.sections.len(), 3);
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].verb, "GET");
        assert_eq!(calls[0].path, "/projects/1331/sections");
        assert_eq!(calls[0].options.fields, vec!["name"]);
    }

    #[test]
    fn empty_project_id_is_rejected() {
        let mut state = AppState::with_transport(
            Box::new(RecordingTransport::new()),
            "http://localhost",
        );
        handle_event(key(KeyCode::Enter), &mut state);
        assert_eq!(state.screen, AppScreen::ProjectInput);
        assert!(state.error_message.is_some());
    }

    #[test]
    fn q_is_typed_into_inputs_but_quits_tables() {
        let (_transport, mut state) = loaded_state();
        handle_event(key(KeyCode::Char('n')), &mut state);
        type_text(&mut state, "qa");
        assert!(!state.should_quit);
        assert_eq!(state.name_input.value, "qa");

        handle_event(key(KeyCode::Esc), &mut state);
        handle_event(key(KeyCode::Char('q')), &mut state);
        assert!(state.should_quit);
    }

    #[test]
    fn move_up_inserts_before_previous_section() {
        let (transport, mut state) = loaded_state();
        transport.respond_with(Ok(json!({})));
        transport.respond_with(Ok(board()));

        handle_event(key(KeyCode::Down), &mut state);
        handle_event(shifted('K'), &mut state);
        assert_eq!(state.screen, AppScreen::Working);

        process_state(&mut state);
        assert_eq!(state.screen, AppScreen::LoadingSections);
        process_state(&mut state);
        assert_eq!(state.screen, AppScreen::SectionTable);
        assert_eq!(state.selected_row, 0);

        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1].verb, "POST");
        assert_eq!(calls[1].path, "/projects/1331/sections/insert");
        assert_eq!(
            Value::Object(calls[1].params.clone()),
            json!({ "section": "2", "before_section": "1" })
        );
    }

    #[test]
    fn rejected_move_keeps_the_selection() {
        let (transport, mut state) = loaded_state();
        transport.respond_with(Err(crate::AsanaError::InvalidRequest {
            message: "Project is not a board".into(),
            errors: None,
        }));

        handle_event(shifted('J'), &mut state);
        assert_eq!(state.selected_row, 0);
        process_state(&mut state);

        assert_eq!(state.screen, AppScreen::SectionTable);
        assert_eq!(state.selected_row, 0);
        assert_eq!(
            state.selected_section().map(|s| s.name.as_str()),
            Some("To do")
        );
        assert!(state.error_message.is_some());
    }

    #[test]
    fn failed_reload_stays_on_the_board() {
        let (transport, mut state) = loaded_state();
        transport.respond_with(Err(crate::AsanaError::ServerError {
            status: 503,
            message: "Service unavailable".into(),
        }));

        handle_event(shifted('R'), &mut state);
        assert_eq!(state.screen, AppScreen::LoadingSections);
        process_state(&mut state);

        assert_eq!(state.screen, AppScreen::SectionTable);
        assert_eq!(state.sections.len(), 3);
        let error = state.error_message.clone().unwrap_or_default();
        assert!(error.contains("Service unavailable"), "{error}");
    }

    #[test]
    fn failed_refresh_after_a_change_stays_on_the_board() {
        let (transport, mut state) = loaded_state();
        transport.respond_with(Ok(json!({ "gid": "4", "name": "Blocked" })));
        transport.respond_with(Err(crate::AsanaError::ServerError {
            status: 502,
            message: "Bad gateway".into(),
        }));

        handle_event(key(KeyCode::Char('n')), &mut state);
        type_text(&mut state, "Blocked");
        handle_event(key(KeyCode::Enter), &mut state);
        process_state(&mut state);
        process_state(&mut state);

        assert_eq!(state.screen, AppScreen::SectionTable);
        assert!(state.error_message.is_some());
    }

    #[test]
    fn failed_first_load_returns_to_project_input() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(Err(crate::AsanaError::NotFound {
            message: "project: Not a recognized ID".into(),
        }));
        let mut state =
            AppState::with_transport(Box::new(Arc::clone(&transport)), "http://localhost");

        type_text(&mut state, "999");
        handle_event(key(KeyCode::Enter), &mut state);
        process_state(&mut state);

        assert_eq!(state.screen, AppScreen::ProjectInput);
        assert!(state.error_message.is_some());
    }

    #[test]
    fn move_down_past_the_end_does_nothing() {
        let (transport, mut state) = loaded_state();
        state.selected_row = 2;

        handle_event(shifted('J'), &mut state);

        assert_eq!(state.screen, AppScreen::SectionTable);
        assert!(state.pending.is_none());
        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn rename_updates_only_the_name() {
        let (transport, mut state) = loaded_state();
        transport.respond_with(Ok(json!({ "gid": "1", "name": "Backlog" })));
        transport.respond_with(Ok(board()));

        handle_event(key(KeyCode::Char('r')), &mut state);
        assert_eq!(state.name_input.value, "To do");
        for _ in 0..5 {
            handle_event(key(KeyCode::Backspace), &mut state);
        }
        type_text(&mut state, "Backlog");
        handle_event(key(KeyCode::Enter), &mut state);
        process_state(&mut state);

        let calls = transport.calls();
        assert_eq!(calls[1].verb, "PUT");
        assert_eq!(calls[1].path, "/sections/1");
        assert_eq!(
            Value::Object(calls[1].params.clone()),
            json!({ "name": "Backlog" })
        );
    }

    #[test]
    fn create_posts_new_section_name() {
        let (transport, mut state) = loaded_state();
        transport.respond_with(Ok(json!({ "gid": "4", "name": "Blocked" })));
        transport.respond_with(Ok(board()));

        handle_event(key(KeyCode::Char('n')), &mut state);
        type_text(&mut state, "Blocked");
        handle_event(key(KeyCode::Enter), &mut state);
        process_state(&mut state);

        let calls = transport.calls();
        assert_eq!(calls[1].verb, "POST");
        assert_eq!(calls[1].path, "/projects/1331/sections");
        assert_eq!(
            Value::Object(calls[1].params.clone()),
            json!({ "name": "Blocked" })
        );
    }

    #[test]
    fn delete_requires_confirmation_and_surfaces_errors() {
        let (transport, mut state) = loaded_state();
        transport.respond_with(Err(crate::AsanaError::InvalidRequest {
            message: "Section must be empty".into(),
            errors: None,
        }));

        handle_event(key(KeyCode::Char('d')), &mut state);
        assert_eq!(state.screen, AppScreen::ConfirmDelete);
        handle_event(key(KeyCode::Char('n')), &mut state);
        assert_eq!(state.screen, AppScreen::SectionTable);

        handle_event(key(KeyCode::Char('d')), &mut state);
        handle_event(key(KeyCode::Char('y')), &mut state);
        process_state(&mut state);

        assert_eq!(state.screen, AppScreen::SectionTable);
        let error = state.error_message.clone().unwrap_or_default();
        assert!(error.contains("Section must be empty"), "{error}");
        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].verb, "DELETE");
        assert_eq!(calls[1].path, "/sections/1");
    }
}
