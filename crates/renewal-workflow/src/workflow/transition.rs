/*
[INPUT]:  Current WorkflowState and a WorkflowEvent
[OUTPUT]: Next WorkflowState or a TransitionError
[POS]:    Workflow domain - pure transition function, no I/O
[UPDATE]: When adding events or changing renew-option branching
*/

use thiserror::Error;

use super::event::WorkflowEvent;
use super::state::{Derived, FormModel, Step, WorkflowState};

/// Errors occurring during state transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Invalid transition: {from:?} -> {event}")]
    InvalidTransition { from: Step, event: &'static str },

    #[error("Unknown option value: {0}")]
    UnknownOption(String),
}

/// Which extra form field an option position unlocks: (account, note).
/// Positions 1 and 3 need an account, position 2 needs a note.
fn field_visibility(index: usize) -> (bool, bool) {
    match index {
        1 | 3 => (true, false),
        2 => (false, true),
        _ => (false, false),
    }
}

/// Check whether the event's precondition holds for the state
pub fn can_transition(state: &WorkflowState, event: &WorkflowEvent) -> bool {
    match (state.step, event) {
        (_, WorkflowEvent::SetVisible(_)) => true,
        (Step::Loading, WorkflowEvent::LoadSucceeded { .. }) => true,
        (Step::Loading, WorkflowEvent::LoadFailed(_)) => true,
        (Step::List, WorkflowEvent::BeginRenewal { .. }) => true,
        (Step::Form, WorkflowEvent::UpdateRenewOption(_)) => true,
        (Step::Form, WorkflowEvent::UpdateAccountOption(_)) => state.derived.show_account_field,
        (Step::Form, WorkflowEvent::UpdateNote(_)) => state.derived.show_note_field,
        (Step::Form, WorkflowEvent::ValidationFailed) => state.note_missing(),
        (Step::Form, WorkflowEvent::ShowPopup(_)) => true,
        (Step::Popup, WorkflowEvent::ClosePopup) => true,
        (Step::Form | Step::Popup, WorkflowEvent::SubmitSucceeded | WorkflowEvent::Cancel) => true,
        _ => false,
    }
}

/// Compute the next state, rejecting events whose precondition does not hold
pub fn try_transition(
    state: &WorkflowState,
    event: WorkflowEvent,
) -> Result<WorkflowState, TransitionError> {
    if !can_transition(state, &event) {
        return Err(TransitionError::InvalidTransition {
            from: state.step,
            event: event.name(),
        });
    }

    let mut next = state.clone();
    match event {
        WorkflowEvent::SetVisible(visible) => {
            next.visible = visible;
        }
        WorkflowEvent::LoadSucceeded {
            records,
            labels,
            error_message,
        } => {
            next.step = Step::List;
            next.original_records = records.clone();
            next.records = records;
            next.labels.list = labels;
            next.error_message = Some(error_message).filter(|message| !message.is_empty());
            next.last_error = None;
        }
        WorkflowEvent::LoadFailed(message) => {
            next.last_error = Some(message);
        }
        WorkflowEvent::BeginRenewal {
            record,
            renew_options,
            account_options,
        } => {
            next.step = Step::Form;
            next.selected_record = Some(record);
            next.form = FormModel {
                selected_renew_option: renew_options.first().map(|option| option.value.clone()),
                ..FormModel::default()
            };
            next.renew_options = renew_options;
            next.account_options = account_options;
            next.derived = Derived::default();
        }
        WorkflowEvent::UpdateRenewOption(value) => {
            let index = next
                .renew_options
                .iter()
                .position(|option| option.value == value)
                .ok_or_else(|| TransitionError::UnknownOption(value.clone()))?;
            let (show_account, show_note) = field_visibility(index);
            let account_was_shown = next.derived.show_account_field;

            next.form.selected_renew_option = Some(value);
            next.derived = Derived {
                show_account_field: show_account,
                show_note_field: show_note,
                note_validation_failed: false,
            };

            if !show_note {
                next.form.note_text.clear();
            }
            if !show_account {
                next.form.selected_account_option = None;
            } else if !account_was_shown || next.form.selected_account_option.is_none() {
                next.form.selected_account_option =
                    next.account_options.first().map(|option| option.value.clone());
            }
        }
        WorkflowEvent::UpdateAccountOption(value) => {
            if !next.account_options.iter().any(|option| option.value == value) {
                return Err(TransitionError::UnknownOption(value));
            }
            next.form.selected_account_option = Some(value);
        }
        WorkflowEvent::UpdateNote(text) => {
            if !text.trim().is_empty() {
                next.derived.note_validation_failed = false;
            }
            next.form.note_text = text;
        }
        WorkflowEvent::ValidationFailed => {
            next.derived.note_validation_failed = true;
        }
        WorkflowEvent::ShowPopup(labels) => {
            next.step = Step::Popup;
            next.labels.popup = labels;
        }
        WorkflowEvent::ClosePopup => {
            next.step = Step::Form;
        }
        WorkflowEvent::SubmitSucceeded | WorkflowEvent::Cancel => {
            reset_to_list(&mut next);
        }
    }

    Ok(next)
}

/// Infallible variant: a rejected event leaves the state unchanged
pub fn transition(state: &WorkflowState, event: WorkflowEvent) -> WorkflowState {
    try_transition(state, event).unwrap_or_else(|_| state.clone())
}

fn reset_to_list(state: &mut WorkflowState) {
    state.step = Step::List;
    state.records = state.original_records.clone();
    state.selected_record = None;
    state.renew_options.clear();
    state.account_options.clear();
    state.form = FormModel::default();
    state.derived = Derived::default();
}
