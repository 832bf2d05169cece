//! # Domain Module
//!
//! Business logic for the cycle tracker, independent of any UI framework.
//!
//! - **calendar**: month grid generation, navigation and selection rules
//! - **cycle_predictor**: next period, ovulation and fertile window dates
//! - **cycle_flow**: the three-step selection wizard
//! - **models**: validated value types such as `CycleLength`
//!
//! Nothing in this module reads the clock; callers pass "today" in.

pub mod calendar;
pub mod cycle_flow;
pub mod cycle_predictor;
pub mod models;

pub use calendar::*;
pub use cycle_flow::*;
pub use cycle_predictor::*;
pub use models::*;
