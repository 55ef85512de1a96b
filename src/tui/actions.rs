use super::state::{AppScreen, AppState};

/// Process the current state (e.g., fetch data during loading screens).
pub fn process_state(state: &mut AppState) {
    match state.screen {
        AppScreen::LoadingSections => match state.fetch_sections() {
            Ok(()) => {
                state.screen = AppScreen::SectionTable;
            }
            Err(e) => {
                state.set_error(e);
                state.screen = state.return_to.clone();
            }
        },
        AppScreen::Working => match state.run_pending() {
            Ok(()) => {
                state.start_loading(AppScreen::SectionTable);
            }
            Err(e) => {
                state.set_error(e);
                state.screen = AppScreen::SectionTable;
            }
        },
        _ => {}
    }
}
