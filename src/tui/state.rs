use crate::models::{decode, SectionCompact};
use crate::{
    AsanaClient, CreateSectionParams, InsertSectionParams, Params, RequestOptions, Sections,
    Transport, UpdateSectionParams,
};

/// Represents the current screen being displayed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppScreen {
    /// Project id input screen.
    ProjectInput,
    /// Loading sections from API.
    LoadingSections,
    /// Section table for the current project.
    SectionTable,
    /// Name input for creating or renaming a section.
    NameInput,
    /// Delete confirmation for the selected section.
    ConfirmDelete,
    /// Sending a pending change to the API.
    Working,
}

/// What the name input screen is collecting a name for.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NameInputMode {
    Create,
    Rename,
}

/// A change waiting to be sent on the next tick.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    Create { name: String },
    Rename { section: String, name: String },
    Delete { section: String },
    /// Move a section; the selection follows it to `to_row` once the
    /// service accepts the move.
    Move {
        insert: InsertSectionParams,
        to_row: usize,
    },
}

impl PendingAction {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            PendingAction::Create { .. } => "Creating section",
            PendingAction::Rename { .. } => "Renaming section",
            PendingAction::Delete { .. } => "Deleting section",
            PendingAction::Move { .. } => "Moving section",
        }
    }
}

/// A single-line text input with a cursor counted in characters.
#[derive(Debug, Clone, Default)]
pub(crate) struct InputField {
    pub(crate) value: String,
    pub(crate) cursor: usize,
}

impl InputField {
    pub(crate) fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    pub(crate) fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub(crate) fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub(crate) fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub(crate) fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub(crate) fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(crate) fn right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub(crate) fn home(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}

/// Main application state.
pub struct AppState {
    /// Current screen being displayed.
    pub(crate) screen: AppScreen,
    /// API root shown in the status bar.
    pub(crate) api_url: String,
    /// Initialized API transport.
    pub(crate) client: Option<Box<dyn Transport>>,
    /// Project id being typed.
    pub(crate) project_input: InputField,
    /// Project whose sections are shown.
    pub(crate) project: String,
    /// Sections of the current project, in board order.
    pub(crate) sections: Vec<SectionCompact>,
    /// Screen to fall back to when loading sections fails.
    pub(crate) return_to: AppScreen,
    /// Currently selected row in table.
    pub(crate) selected_row: usize,
    /// Section name being typed.
    pub(crate) name_input: InputField,
    pub(crate) name_mode: NameInputMode,
    /// Change to send while on the working screen.
    pub(crate) pending: Option<PendingAction>,
    /// Error message to display.
    pub(crate) error_message: Option<String>,
    /// Should the application quit?
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: AppScreen::ProjectInput,
            api_url: String::new(),
            client: None,
            project_input: InputField::default(),
            project: String::new(),
            sections: Vec::new(),
            return_to: AppScreen::ProjectInput,
            selected_row: 0,
            name_input: InputField::default(),
            name_mode: NameInputMode::Create,
            pending: None,
            error_message: None,
            should_quit: false,
        }
    }
}

impl AppState {
    /// Create a new application state with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state that talks to the given transport instead of building
    /// one from the environment.
    pub fn with_transport(transport: Box<dyn Transport>, api_url: &str) -> Self {
        Self {
            client: Some(transport),
            api_url: api_url.to_string(),
            ..Self::default()
        }
    }

    /// Initialize the API client from the environment, once.
    pub(crate) fn init_client(&mut self) -> Result<(), String> {
        if self.client.is_some() {
            return Ok(());
        }
        match AsanaClient::from_env() {
            Ok(client) => {
                self.api_url = client.base_url().to_string();
                self.client = Some(Box::new(client));
                Ok(())
            }
            Err(e) => Err(format!("Failed to create client: {e}")),
        }
    }

    fn sections_api(&self) -> Result<Sections<'_, dyn Transport>, String> {
        let client = self.client.as_deref().ok_or("Client not initialized")?;
        Ok(Sections::new(client))
    }

    pub(crate) fn selected_section(&self) -> Option<&SectionCompact> {
        self.sections.get(self.selected_row)
    }

    /// Fetch the sections of the current project.
    pub(crate) fn fetch_sections(&mut self) -> Result<(), String> {
        let options = RequestOptions::new().with_fields(["name"]);
        let value = self
            .sections_api()?
            .list_by_project(&self.project, &Params::new(), &options)
            .map_err(|e| format!("Failed to fetch sections: {e}"))?;
        let sections: Vec<SectionCompact> =
            decode(value).map_err(|e| format!("Failed to fetch sections: {e}"))?;

        self.sections = sections;
        self.selected_row = self.selected_row.min(self.sections.len().saturating_sub(1));
        Ok(())
    }

    /// Send the pending change, if any.
    pub(crate) fn run_pending(&mut self) -> Result<(), String> {
        let Some(action) = self.pending.take() else {
            return Ok(());
        };
        let sections = self.sections_api()?;
        let options = RequestOptions::default();

        let result = match &action {
            PendingAction::Create { name } => sections.create_in_project(
                &self.project,
                &CreateSectionParams::new(name.as_str()).to_params(),
                &options,
            ),
            PendingAction::Rename { section, name } => sections.update(
                section,
                &UpdateSectionParams {
                    name: Some(name.clone()),
                }
                .to_params(),
                &options,
            ),
            PendingAction::Delete { section } => {
                sections.delete(section, &Params::new(), &options)
            }
            PendingAction::Move { insert, .. } => {
                sections.insert_in_project(&self.project, &insert.to_params(), &options)
            }
        };

        result.map_err(|e| format!("{} failed: {e}", action.describe()))?;
        if let PendingAction::Move { to_row, .. } = action {
            self.selected_row = to_row;
        }
        Ok(())
    }

    /// Start loading the sections, returning to `from` if the load fails.
    pub(crate) fn start_loading(&mut self, from: AppScreen) {
        self.return_to = from;
        self.screen = AppScreen::LoadingSections;
    }

    /// Clear any error message.
    pub(crate) fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set an error message.
    pub(crate) fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }
}
