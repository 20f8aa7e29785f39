//! Test helpers module
//!
//! This module provides utilities and helpers for testing the ResQTrack client.
//! It includes a mock API server, sample payloads and test context setup.

#![allow(dead_code)]

pub mod api_mock;
pub mod test_context;
pub mod test_data;

pub use api_mock::*;
pub use test_context::*;
pub use test_data::*;
