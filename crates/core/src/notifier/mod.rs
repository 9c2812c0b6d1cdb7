mod smtp;
mod traits;

pub use smtp::*;
pub use traits::*;
