//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the mobile clients and the backend. These types describe the JSON bodies
//! of the REST endpoints and the payloads pushed to devices.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that compile without
//! the `ssr` feature, so client tooling can depend on them without pulling
//! in the server stack.

/// Push notification payloads
pub mod event;

/// Workflow rejection taxonomy
pub mod error;

/// Contact and chat wire types
pub mod messaging;

/// Re-export commonly used types for convenience
pub use event::PushPayload;
pub use error::{ErrorCategory, ErrorKind};
pub use messaging::{ChatId, MemberId, SYSTEM_MEMBER_ID};
