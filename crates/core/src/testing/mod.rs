//! Test utilities: mock service implementations and fixtures.
//!
//! Compiled into the library so integration tests and downstream crates can
//! reuse the same mocks.

pub mod fixtures;
mod mock_notifier;
mod mock_ticketing;

pub use mock_notifier::{MockNotifier, RecordedSend};
pub use mock_ticketing::{MockTicketing, RecordedFlagUpdate};
