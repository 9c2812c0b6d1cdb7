mod event;
mod types;

pub use event::*;
pub use types::*;
