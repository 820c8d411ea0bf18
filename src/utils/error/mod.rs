//! Error handling for the advisory engine

mod helpers;
mod types;


pub use types::{AdvisorError, Result};
