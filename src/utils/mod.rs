//! Utility modules for the advisory engine

pub mod error;
pub mod logging;

pub use error::{AdvisorError, Result};
