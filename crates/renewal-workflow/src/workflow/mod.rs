/*
[INPUT]:  Workflow state, events, transition function and orchestrator
[OUTPUT]: Renewal workflow public surface
[POS]:    Workflow module wiring
[UPDATE]: When adding workflow submodules
*/

pub mod event;
pub mod orchestrator;
pub mod state;
pub mod transition;

pub use event::{FieldChange, WorkflowEvent};
pub use orchestrator::{
    CancelOutcome, Collaborators, LoadOutcome, Orchestrator, ReturnRoute, SubmitOutcome,
};
pub use state::{Derived, FormModel, Labels, Step, WorkflowState};
pub use transition::{TransitionError, can_transition, transition, try_transition};
