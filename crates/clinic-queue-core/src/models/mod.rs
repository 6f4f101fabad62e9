//! Domain models for the clinic queue.

mod patient;
mod registration;
mod summary;
mod token;

pub use patient::*;
pub use registration::*;
pub use summary::*;
pub use token::*;
