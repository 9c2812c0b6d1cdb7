mod job;
mod types;
mod worker;

pub use job::run_dispatch;
pub use types::{DispatchReport, StepKind, StepOutcome, SubmitError};
pub use worker::JobDispatcher;
