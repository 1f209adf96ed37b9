/*
[INPUT]:  Public API exports for renewal-workflow crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod busy;
pub mod config;
pub mod notify;
pub mod ports;
pub mod remote;
pub mod workflow;

// Re-export main types for convenience
pub use busy::{BusyError, BusyGate, BusyGuard, BusyIndicator};
pub use config::WorkflowConfig;
pub use notify::{ChannelNotifier, Notification, Severity, TracingNotifier};
pub use ports::{
    DataFetch, FormOptions, InitialList, Navigator, NotificationSink, ScreenLifecycle,
    ServiceError, SubmissionService,
};
pub use workflow::{
    CancelOutcome, Collaborators, FieldChange, LoadOutcome, Orchestrator, ReturnRoute, Step,
    SubmitOutcome, TransitionError, WorkflowEvent, WorkflowState, transition, try_transition,
};
