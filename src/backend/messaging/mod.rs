//! Messaging Module
//!
//! This module handles contact requests and confirmed contacts.
//!
//! - **`db`** - Relationship store queries
//! - **`workflow`** - Contact request state machine
//! - **`handlers`** - HTTP handlers

pub mod db;
pub mod handlers;
pub mod workflow;

pub use handlers::*;
