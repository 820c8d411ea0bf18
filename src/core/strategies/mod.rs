//! Advisory strategies
//!
//! The three migration searches over the instance catalog. Each call is
//! request-scoped and stateless; collaborators are passed in per call and
//! mutable configuration copies never alias the input.

mod greener_region;
mod lift_shift;
mod right_sizing;


pub use greener_region::greener_region;
pub use lift_shift::lift_and_shift;
pub use right_sizing::{TARGET_UTILIZATION, right_size};
