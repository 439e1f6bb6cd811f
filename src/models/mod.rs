mod form;
mod generate;
mod vendors;

pub use form::*;
pub use generate::*;
pub use vendors::*;

use serde::Serialize;

/// Lifecycle of one submission attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    InFlight,
    Success,
    Failed,
}

/// Credential indicator shown next to the API key input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStatus {
    Saved,
    #[default]
    Absent,
}

pub const DEFAULT_LOADING_MESSAGE: &str = "Generating configuration script...";
pub const REQUIREMENTS_LOADING_MESSAGE: &str =
    "Analyzing requirements and generating IP information...";
pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";

/// UiState is everything the user can see besides the form inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiState {
    pub phase: SubmitPhase,
    /// Outcome of the most recent attempt (Success or Failed)
    pub last_outcome: Option<SubmitPhase>,
    pub submit_enabled: bool,
    pub loading: bool,
    pub loading_message: String,
    pub error_message: Option<String>,
    pub focus: Option<FormField>,
    pub result_visible: bool,
    pub key_status: KeyStatus,
    pub copy_label: String,
    /// Bumped on every successful copy; only the latest revert timer applies
    #[serde(skip)]
    pub copy_seq: u64,
    pub alert: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            phase: SubmitPhase::Idle,
            last_outcome: None,
            submit_enabled: true,
            loading: false,
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            error_message: None,
            focus: None,
            result_visible: false,
            key_status: KeyStatus::Absent,
            copy_label: COPY_LABEL.to_string(),
            copy_seq: 0,
            alert: None,
        }
    }
}

impl UiState {
    /// Show a message in the error area
    pub fn show_error(&mut self, message: impl std::fmt::Display) {
        self.error_message = Some(format!("Error: {}", message));
    }
}
