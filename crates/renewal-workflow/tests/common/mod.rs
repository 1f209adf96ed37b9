/*
[INPUT]:  Scripted collaborator responses
[OUTPUT]: Fake collaborators, fixtures and an Orchestrator harness
[POS]:    Test infrastructure - shared across workflow integration tests
[UPDATE]: When collaborator traits change
*/

//! Common test utilities for renewal-workflow tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use renewal_adapter::{
    AccountOption, LabelPair, Record, RecordStatus, RenewOption, SubmissionPayload,
};
use renewal_workflow::{
    BusyGate, Collaborators, DataFetch, FormOptions, InitialList, Navigator, Notification,
    NotificationSink, Orchestrator, ServiceError, Severity, SubmissionService,
};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    InitialList,
    FormOptions,
    PopupLabels,
    CountExisting(String),
    Submit(SubmissionPayload),
}

/// Scripted data-fetch and submission service.
/// `Err(String)` responses surface as `ServiceError::Unavailable`.
pub struct FakeService {
    pub initial: Mutex<Result<InitialList, String>>,
    pub options: Mutex<Result<FormOptions, String>>,
    pub popup: Mutex<Result<LabelPair, String>>,
    pub count: Mutex<Result<u32, String>>,
    pub submit: Mutex<Result<bool, String>>,
    pub calls: Mutex<Vec<Call>>,
    /// Busy flag observed at each remote call
    pub busy_during_calls: Mutex<Vec<bool>>,
    gate: Mutex<Option<BusyGate>>,
}

impl Default for FakeService {
    fn default() -> Self {
        Self {
            initial: Mutex::new(Ok(initial_list())),
            options: Mutex::new(Ok(form_options())),
            popup: Mutex::new(Ok(LabelPair::new("Preferences exist", "Overwrite them?"))),
            count: Mutex::new(Ok(0)),
            submit: Mutex::new(Ok(true)),
            calls: Mutex::new(Vec::new()),
            busy_during_calls: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        }
    }
}

impl FakeService {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Submit(payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        let busy = self
            .gate
            .lock()
            .unwrap()
            .as_ref()
            .map(BusyGate::is_busy)
            .unwrap_or(false);
        self.busy_during_calls.lock().unwrap().push(busy);
        self.calls.lock().unwrap().push(call);
    }
}

fn scripted<T: Clone>(slot: &Mutex<Result<T, String>>) -> Result<T, ServiceError> {
    slot.lock()
        .unwrap()
        .clone()
        .map_err(ServiceError::Unavailable)
}

#[async_trait]
impl DataFetch for FakeService {
    async fn fetch_initial_list(&self) -> Result<InitialList, ServiceError> {
        self.record(Call::InitialList);
        scripted(&self.initial)
    }

    async fn fetch_form_options(&self) -> Result<FormOptions, ServiceError> {
        self.record(Call::FormOptions);
        scripted(&self.options)
    }

    async fn fetch_popup_labels(&self) -> Result<LabelPair, ServiceError> {
        self.record(Call::PopupLabels);
        scripted(&self.popup)
    }
}

#[async_trait]
impl SubmissionService for FakeService {
    async fn count_existing(&self, record_id: &str) -> Result<u32, ServiceError> {
        self.record(Call::CountExisting(record_id.to_string()));
        scripted(&self.count)
    }

    async fn submit(&self, payload: &SubmissionPayload) -> Result<bool, ServiceError> {
        self.record(Call::Submit(payload.clone()));
        scripted(&self.submit)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.severity == severity)
            .map(|n| n.message)
            .collect()
    }
}

impl NotificationSink for RecordingNotifier {
    fn enqueue(&self, message: &str, severity: Severity) {
        self.notifications.lock().unwrap().push(Notification {
            message: message.to_string(),
            severity,
        });
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

pub fn records() -> Vec<Record> {
    vec![
        Record::new("0001", RecordStatus::Expiring).with_attribute("holder", "svc-web"),
        Record::new("0002", RecordStatus::Active),
    ]
}

pub fn initial_list() -> InitialList {
    InitialList {
        records: records(),
        labels: LabelPair::new("Renewable certificates", "Select one"),
        error_message: "Renewal could not be saved".to_string(),
    }
}

/// Four options so every branch (none, account, note, account) is reachable
pub fn form_options() -> FormOptions {
    FormOptions {
        renew_options: vec![
            RenewOption::new("keep", "Keep current settings"),
            RenewOption::new("move", "Move to another account"),
            RenewOption::new("other", "Other (explain)"),
            RenewOption::new("split", "Split billing"),
        ],
        account_options: vec![
            AccountOption::new("acc-1", "Primary"),
            AccountOption::new("acc-2", "Secondary"),
        ],
    }
}

pub struct Harness {
    pub service: Arc<FakeService>,
    pub notifier: Arc<RecordingNotifier>,
    pub busy_rx: watch::Receiver<bool>,
    pub orchestrator: Orchestrator,
}

pub fn harness(service: FakeService) -> Harness {
    let service = Arc::new(service);
    let notifier = Arc::new(RecordingNotifier::default());
    let (busy_tx, busy_rx) = watch::channel(false);
    let busy = BusyGate::new(Arc::new(busy_tx));
    *service.gate.lock().unwrap() = Some(busy.clone());

    let orchestrator = Orchestrator::new(Collaborators {
        data: service.clone(),
        submission: service.clone(),
        notifier: notifier.clone(),
        busy,
    });

    Harness {
        service,
        notifier,
        busy_rx,
        orchestrator,
    }
}

/// Harness already on the form for the first record
pub async fn harness_in_form(service: FakeService) -> Harness {
    let mut h = harness(service);
    h.orchestrator.enter().await;
    let record = h.orchestrator.state().records[0].clone();
    h.orchestrator.renew_requested(record).await;
    h
}
