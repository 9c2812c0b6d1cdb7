mod rest;
mod traits;
mod types;

pub use rest::*;
pub use traits::*;
pub use types::*;
