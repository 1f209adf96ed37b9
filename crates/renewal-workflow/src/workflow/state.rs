/*
[INPUT]:  Records, options and labels fetched from the renewal service
[OUTPUT]: Immutable WorkflowState value read by the screen
[POS]:    Workflow domain - state model
[UPDATE]: When adding workflow fields or derived flags
*/

use renewal_adapter::{AccountOption, LabelPair, Record, RenewOption, SubmissionPayload};

/// Named phase of the renewal workflow; exactly one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Loading,
    List,
    Form,
    Popup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pub list: LabelPair,
    pub popup: LabelPair,
}

/// What the user has entered on the renewal form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormModel {
    pub selected_renew_option: Option<String>,
    pub selected_account_option: Option<String>,
    pub note_text: String,
}

/// Flags computed from the form and the captured option list.
/// Only the transition function writes these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Derived {
    pub show_account_field: bool,
    pub show_note_field: bool,
    pub note_validation_failed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    pub step: Step,
    pub visible: bool,
    pub records: Vec<Record>,
    pub original_records: Vec<Record>,
    pub selected_record: Option<Record>,
    pub labels: Labels,
    /// Message delivered with the initial list, shown when a submission is refused
    pub error_message: Option<String>,
    pub renew_options: Vec<RenewOption>,
    pub account_options: Vec<AccountOption>,
    pub form: FormModel,
    pub derived: Derived,
    pub last_error: Option<String>,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowState {
    pub fn new() -> Self {
        Self {
            step: Step::Loading,
            visible: false,
            records: Vec::new(),
            original_records: Vec::new(),
            selected_record: None,
            labels: Labels::default(),
            error_message: None,
            renew_options: Vec::new(),
            account_options: Vec::new(),
            form: FormModel::default(),
            derived: Derived::default(),
            last_error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.step, Step::Form | Step::Popup)
    }

    /// True when the note field is shown but holds only whitespace
    pub fn note_missing(&self) -> bool {
        self.derived.show_note_field && self.form.note_text.trim().is_empty()
    }

    pub fn selected_renew_option(&self) -> Option<&RenewOption> {
        let value = self.form.selected_renew_option.as_deref()?;
        self.renew_options.iter().find(|option| option.value == value)
    }

    /// Position of the selected renew option within the list captured at BeginRenewal
    pub fn selected_renew_index(&self) -> Option<usize> {
        let value = self.form.selected_renew_option.as_deref()?;
        self.renew_options.iter().position(|option| option.value == value)
    }

    pub fn selected_account_index(&self) -> Option<usize> {
        let value = self.form.selected_account_option.as_deref()?;
        self.account_options
            .iter()
            .position(|option| option.value == value)
    }

    /// Payload for the submission service, if a record and a renew option are chosen
    pub fn submission_payload(&self) -> Option<SubmissionPayload> {
        let record = self.selected_record.as_ref()?;
        let renew_option = self.form.selected_renew_option.clone()?;
        Some(SubmissionPayload {
            record_id: record.suffix.clone(),
            renew_option,
            account_option: self.form.selected_account_option.clone(),
            note_text: self.form.note_text.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renewal_adapter::RecordStatus;

    #[test]
    fn test_new_state_is_loading_and_hidden() {
        let state = WorkflowState::new();
        assert_eq!(state.step, Step::Loading);
        assert!(!state.visible);
        assert!(state.submission_payload().is_none());
    }

    #[test]
    fn test_payload_requires_record_and_option() {
        let mut state = WorkflowState::new();
        state.selected_record = Some(Record::new("0007", RecordStatus::Expiring));
        assert!(state.submission_payload().is_none());

        state.form.selected_renew_option = Some("keep".to_string());
        state.form.note_text = "see ticket".to_string();
        let payload = state.submission_payload().expect("payload");
        assert_eq!(payload.record_id, "0007");
        assert_eq!(payload.renew_option, "keep");
        assert_eq!(payload.account_option, None);
        assert_eq!(payload.note_text, "see ticket");
    }

    #[test]
    fn test_note_missing_only_when_field_shown() {
        let mut state = WorkflowState::new();
        assert!(!state.note_missing());
        state.derived.show_note_field = true;
        state.form.note_text = "   ".to_string();
        assert!(state.note_missing());
    }
}
