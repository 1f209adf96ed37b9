/*
[INPUT]:  Collaborator contracts the workflow depends on
[OUTPUT]: Object-safe async traits injected into the Orchestrator
[POS]:    Workflow boundary - external interfaces
[UPDATE]: When a collaborator gains or changes an operation
*/

use async_trait::async_trait;
use renewal_adapter::{
    AccountOption, LabelPair, Record, RenewOption, RenewalError, SubmissionPayload,
};
use thiserror::Error;

use crate::notify::Severity;

/// Failure reported by a remote collaborator
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Remote(#[from] RenewalError),

    /// The service answered but refused the request
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Remote(err) => err.is_retryable(),
            ServiceError::Rejected(_) => false,
            ServiceError::Unavailable(_) => true,
        }
    }

    /// The service refused the client identity
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ServiceError::Remote(err) if err.is_auth_error())
    }
}

/// Initial list payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialList {
    pub records: Vec<Record>,
    pub labels: LabelPair,
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    pub renew_options: Vec<RenewOption>,
    pub account_options: Vec<AccountOption>,
}

#[async_trait]
pub trait DataFetch: Send + Sync {
    async fn fetch_initial_list(&self) -> Result<InitialList, ServiceError>;

    async fn fetch_form_options(&self) -> Result<FormOptions, ServiceError>;

    async fn fetch_popup_labels(&self) -> Result<LabelPair, ServiceError>;
}

#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Number of stored preferences for the record
    async fn count_existing(&self, record_id: &str) -> Result<u32, ServiceError>;

    /// Store the decision; `Ok(false)` means the service declined it
    async fn submit(&self, payload: &SubmissionPayload) -> Result<bool, ServiceError>;
}

/// Fire-and-forget user notifications
pub trait NotificationSink: Send + Sync {
    fn enqueue(&self, message: &str, severity: Severity);
}

/// External router target used when cancelling leaves the screen
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Entry points an external router invokes when the screen is shown or hidden
#[async_trait]
pub trait ScreenLifecycle: Send {
    async fn on_enter(&mut self);

    fn on_leave(&mut self);
}
