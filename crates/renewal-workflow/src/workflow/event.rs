use renewal_adapter::{AccountOption, LabelPair, Record, RenewOption};

/// All events the transition function understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// Screen became active or inactive
    SetVisible(bool),

    /// Initial list arrived (records, list labels, error message for later use)
    LoadSucceeded {
        records: Vec<Record>,
        labels: LabelPair,
        error_message: String,
    },

    /// Initial list could not be fetched
    LoadFailed(String),

    /// User picked a record and the form options arrived
    BeginRenewal {
        record: Record,
        renew_options: Vec<RenewOption>,
        account_options: Vec<AccountOption>,
    },

    UpdateRenewOption(String),

    UpdateAccountOption(String),

    UpdateNote(String),

    /// Submit attempted with a blank required note
    ValidationFailed,

    /// Existing preferences found; ask before overwriting
    ShowPopup(LabelPair),

    ClosePopup,

    SubmitSucceeded,

    Cancel,
}

impl WorkflowEvent {
    /// Short name used in logs and transition errors
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowEvent::SetVisible(_) => "SetVisible",
            WorkflowEvent::LoadSucceeded { .. } => "LoadSucceeded",
            WorkflowEvent::LoadFailed(_) => "LoadFailed",
            WorkflowEvent::BeginRenewal { .. } => "BeginRenewal",
            WorkflowEvent::UpdateRenewOption(_) => "UpdateRenewOption",
            WorkflowEvent::UpdateAccountOption(_) => "UpdateAccountOption",
            WorkflowEvent::UpdateNote(_) => "UpdateNote",
            WorkflowEvent::ValidationFailed => "ValidationFailed",
            WorkflowEvent::ShowPopup(_) => "ShowPopup",
            WorkflowEvent::ClosePopup => "ClosePopup",
            WorkflowEvent::SubmitSucceeded => "SubmitSucceeded",
            WorkflowEvent::Cancel => "Cancel",
        }
    }
}

/// Form field edits coming from the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    RenewOption(String),
    AccountOption(String),
    Note(String),
}

impl From<FieldChange> for WorkflowEvent {
    fn from(change: FieldChange) -> Self {
        match change {
            FieldChange::RenewOption(value) => WorkflowEvent::UpdateRenewOption(value),
            FieldChange::AccountOption(value) => WorkflowEvent::UpdateAccountOption(value),
            FieldChange::Note(text) => WorkflowEvent::UpdateNote(text),
        }
    }
}
