//! Integration tests for cloudvisor-rs
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior without mocking the crate's own types.

pub mod cache_tests;
pub mod engine_tests;
