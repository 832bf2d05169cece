//! Domain value types that carry their own validation rules.

pub mod cycle_length;

pub use cycle_length::*;
