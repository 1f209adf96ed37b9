/*
[INPUT]:  Screen events, lifecycle callbacks and collaborator results
[OUTPUT]: WorkflowState replaced per event, notifications, remote calls
[POS]:    Workflow runtime - owns the live state and drives collaborators
[UPDATE]: When adding user operations or changing failure handling
*/

use std::sync::Arc;

use async_trait::async_trait;
use renewal_adapter::Record;
use tracing::{debug, info, warn};

use super::event::{FieldChange, WorkflowEvent};
use super::state::{Step, WorkflowState};
use super::transition::try_transition;
use crate::busy::BusyGate;
use crate::notify::Severity;
use crate::ports::{
    DataFetch, Navigator, NotificationSink, ScreenLifecycle, ServiceError, SubmissionService,
};

/// Everything the Orchestrator talks to
#[derive(Clone)]
pub struct Collaborators {
    pub data: Arc<dyn DataFetch>,
    pub submission: Arc<dyn SubmissionService>,
    pub notifier: Arc<dyn NotificationSink>,
    pub busy: BusyGate,
}

/// Where cancel sends the user instead of resetting the screen in place
#[derive(Clone)]
pub struct ReturnRoute {
    pub target: String,
    pub navigator: Arc<dyn Navigator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// Screen re-entered with state already past Loading
    Resumed,
    Failed,
    Busy,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    ValidationFailed,
    AwaitingConfirmation,
    Submitted,
    Failed,
    Busy,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Reset,
    Navigated,
    Ignored,
}

pub struct Orchestrator {
    state: WorkflowState,
    data: Arc<dyn DataFetch>,
    submission: Arc<dyn SubmissionService>,
    notifier: Arc<dyn NotificationSink>,
    busy: BusyGate,
    return_route: Option<ReturnRoute>,
}

impl Orchestrator {
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            state: WorkflowState::new(),
            data: collaborators.data,
            submission: collaborators.submission,
            notifier: collaborators.notifier,
            busy: collaborators.busy,
            return_route: None,
        }
    }

    pub fn with_return_route(mut self, route: ReturnRoute) -> Self {
        self.return_route = Some(route);
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn busy(&self) -> &BusyGate {
        &self.busy
    }

    /// Apply one event, replacing the state wholesale. Returns false if rejected.
    pub fn dispatch(&mut self, event: WorkflowEvent) -> bool {
        let name = event.name();
        match try_transition(&self.state, event) {
            Ok(next) => {
                debug!(
                    event = name,
                    from = ?self.state.step,
                    to = ?next.step,
                    "transition applied"
                );
                self.state = next;
                true
            }
            Err(err) => {
                debug!(event = name, error = %err, "transition rejected");
                false
            }
        }
    }

    /// Screen shown: fetch the initial list unless a previous visit already did
    pub async fn enter(&mut self) -> LoadOutcome {
        self.dispatch(WorkflowEvent::SetVisible(true));
        if self.state.step != Step::Loading {
            debug!(step = ?self.state.step, "resuming renewal workflow");
            return LoadOutcome::Resumed;
        }

        let result = match self.busy.run_exclusive(self.data.fetch_initial_list()).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "initial load skipped");
                return LoadOutcome::Busy;
            }
        };

        match result {
            Ok(list) => {
                info!(records = list.records.len(), "renewable records loaded");
                self.dispatch(WorkflowEvent::LoadSucceeded {
                    records: list.records,
                    labels: list.labels,
                    error_message: list.error_message,
                });
                LoadOutcome::Loaded
            }
            Err(err) => {
                let message = describe("Could not load renewable records", &err);
                warn!(error = %err, "initial load failed");
                self.dispatch(WorkflowEvent::LoadFailed(message.clone()));
                self.notifier.enqueue(&message, Severity::Error);
                LoadOutcome::Failed
            }
        }
    }

    /// Screen hidden. Records and form edits are kept for the next visit.
    pub fn leave(&mut self) {
        self.dispatch(WorkflowEvent::SetVisible(false));
    }

    pub async fn renew_requested(&mut self, record: Record) -> LoadOutcome {
        if self.state.step != Step::List {
            debug!(step = ?self.state.step, "renew request outside list step");
            return LoadOutcome::Ignored;
        }

        let result = match self.busy.run_exclusive(self.data.fetch_form_options()).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, record = %record.suffix, "renew request skipped");
                return LoadOutcome::Busy;
            }
        };

        match result {
            Ok(options) => {
                info!(
                    record = %record.suffix,
                    renew_options = options.renew_options.len(),
                    "renewal form opened"
                );
                self.dispatch(WorkflowEvent::BeginRenewal {
                    record,
                    renew_options: options.renew_options,
                    account_options: options.account_options,
                });
                LoadOutcome::Loaded
            }
            Err(err) => {
                self.report("Could not load renewal options", &err);
                LoadOutcome::Failed
            }
        }
    }

    pub fn field_changed(&mut self, change: FieldChange) -> bool {
        self.dispatch(change.into())
    }

    /// Submit pressed on the form
    pub async fn submit_requested(&mut self) -> SubmitOutcome {
        if self.state.step != Step::Form {
            return SubmitOutcome::Ignored;
        }
        if self.state.note_missing() {
            self.dispatch(WorkflowEvent::ValidationFailed);
            return SubmitOutcome::ValidationFailed;
        }
        let Some(record_id) = self.state.submission_payload().map(|payload| payload.record_id)
        else {
            warn!("submit requested without a selected record and option");
            self.notifier.enqueue("Choose a renewal option before submitting", Severity::Warning);
            return SubmitOutcome::Ignored;
        };

        let _busy = match self.busy.acquire() {
            Ok(guard) => guard,
            Err(err) => {
                warn!(error = %err, "submit skipped");
                return SubmitOutcome::Busy;
            }
        };

        let count = match self.submission.count_existing(&record_id).await {
            Ok(count) => count,
            Err(err) => {
                self.report("Could not check existing renewal preferences", &err);
                return SubmitOutcome::Failed;
            }
        };
        debug!(record = %record_id, count, "existing submissions counted");

        if count == 0 {
            return self.submit_final().await;
        }

        match self.data.fetch_popup_labels().await {
            Ok(labels) => {
                self.dispatch(WorkflowEvent::ShowPopup(labels));
                SubmitOutcome::AwaitingConfirmation
            }
            Err(err) => {
                self.report("Could not load confirmation texts", &err);
                SubmitOutcome::Failed
            }
        }
    }

    /// Overwrite confirmed in the popup
    pub async fn confirm_submit(&mut self) -> SubmitOutcome {
        if self.state.step != Step::Popup {
            debug!(step = ?self.state.step, "confirm outside popup step");
            return SubmitOutcome::Ignored;
        }
        let _busy = match self.busy.acquire() {
            Ok(guard) => guard,
            Err(err) => {
                warn!(error = %err, "confirm skipped");
                return SubmitOutcome::Busy;
            }
        };
        self.submit_final().await
    }

    /// Overwrite declined in the popup
    pub fn popup_dismissed(&mut self) -> bool {
        self.dispatch(WorkflowEvent::ClosePopup)
    }

    pub fn cancel_requested(&mut self) -> CancelOutcome {
        if !self.state.is_editing() {
            return CancelOutcome::Ignored;
        }
        if let Some(route) = self.return_route.as_ref() {
            info!(route = %route.target, "renewal abandoned, leaving screen");
            route.navigator.navigate(&route.target);
            return CancelOutcome::Navigated;
        }
        self.dispatch(WorkflowEvent::Cancel);
        CancelOutcome::Reset
    }

    // Caller holds the busy guard.
    async fn submit_final(&mut self) -> SubmitOutcome {
        let Some(payload) = self.state.submission_payload() else {
            warn!("submission requested without a selected record and option");
            return SubmitOutcome::Ignored;
        };

        match self.submission.submit(&payload).await {
            Ok(true) => {
                info!(record = %payload.record_id, "renewal preferences saved");
                self.dispatch(WorkflowEvent::SubmitSucceeded);
                self.notifier.enqueue(
                    &format!("Renewal preferences saved for {}", payload.record_id),
                    Severity::Success,
                );
                SubmitOutcome::Submitted
            }
            Ok(false) => {
                let message = self
                    .state
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "The renewal service declined the submission".to_string());
                self.fail_submission(&message);
                SubmitOutcome::Failed
            }
            Err(err) => {
                let message = match self.state.error_message.as_deref() {
                    Some(prefix) => format!("{prefix}: {err}"),
                    None => format!("Renewal submission failed: {err}"),
                };
                self.fail_submission(&message);
                SubmitOutcome::Failed
            }
        }
    }

    fn fail_submission(&mut self, message: &str) {
        if self.state.step == Step::Popup {
            self.dispatch(WorkflowEvent::ClosePopup);
        }
        warn!(reason = message, "renewal submission failed");
        self.notifier.enqueue(message, Severity::Error);
    }

    fn report(&self, context: &str, err: &ServiceError) {
        warn!(
            error = %err,
            retryable = err.is_retryable(),
            auth = err.is_auth_error(),
            "{context}"
        );
        self.notifier.enqueue(&describe(context, err), Severity::Error);
    }
}

fn describe(context: &str, err: &ServiceError) -> String {
    if err.is_auth_error() {
        format!("{context}: {err} (check the configured client certificate)")
    } else {
        format!("{context}: {err}")
    }
}

#[async_trait]
impl ScreenLifecycle for Orchestrator {
    async fn on_enter(&mut self) {
        self.enter().await;
    }

    fn on_leave(&mut self) {
        self.leave();
    }
}
