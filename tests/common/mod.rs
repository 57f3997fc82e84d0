//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Database test fixtures
//! - Member and token helpers
//! - An in-process test server with a captured notification queue
//! - Response assertions

pub mod assertions;
pub mod auth_helpers;

// Re-export commonly used utilities
pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;
pub use server::*;
