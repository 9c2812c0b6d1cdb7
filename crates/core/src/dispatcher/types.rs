use thiserror::Error;

use crate::ticket::GenerationMode;

/// One step of a dispatch, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Write the generation flag back to its cleared value.
    ClearFlag,
    /// Fetch the ticket's correspondence entries.
    FetchEntries,
    /// Render the document.
    Render,
    /// Upload the document to the originating ticket.
    Upload,
    /// Mail the document to the distribution list.
    Notify,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClearFlag => "clear_flag",
            Self::FetchEntries => "fetch_entries",
            Self::Render => "render",
            Self::Upload => "upload",
            Self::Notify => "notify",
        }
    }
}

/// Result of a single dispatch step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub step: StepKind,
    /// `None` on success, otherwise the error rendered to a string.
    pub error: Option<String>,
}

impl StepOutcome {
    pub fn ok(step: StepKind) -> Self {
        Self { step, error: None }
    }

    pub fn failed(step: StepKind, error: impl ToString) -> Self {
        Self {
            step,
            error: Some(error.to_string()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// What happened during one dispatch, step by step.
///
/// Dispatches are fire-and-forget from the webhook caller's point of view, so
/// this report is the only record of partial failure. Steps that were never
/// reached do not appear.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub ticket_id: u64,
    pub mode: GenerationMode,
    pub steps: Vec<StepOutcome>,
}

impl DispatchReport {
    pub fn new(ticket_id: u64, mode: GenerationMode) -> Self {
        Self {
            ticket_id,
            mode,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: StepOutcome) {
        self.steps.push(outcome);
    }

    /// Whether every executed step succeeded.
    pub fn fully_succeeded(&self) -> bool {
        self.steps.iter().all(StepOutcome::succeeded)
    }

    pub fn outcome_of(&self, step: StepKind) -> Option<&StepOutcome> {
        self.steps.iter().find(|o| o.step == step)
    }
}

/// Why a webhook delivery could not be queued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Dispatch queue is full")]
    QueueFull,

    #[error("Dispatcher is shut down")]
    Closed,
}
