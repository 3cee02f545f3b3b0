//! Common test utilities for austral.
//!
//! This module provides shared fixtures and assertions for the integration tests.

pub mod assertions;
pub mod test_data;
