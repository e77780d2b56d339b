//! Validity checking and repair under the OGC Simple Features rules.

mod is_simple;
mod is_valid;
mod make_valid;

pub use is_simple::is_simple;
pub use is_valid::{is_valid, validation_error, ValidationError};
pub use make_valid::make_valid;
