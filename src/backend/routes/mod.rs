//! Route Configuration Module
//!
//! - **`router`** - Main router creation and layers
//! - **`contact_routes`** - Contact requests, search and contacts
//! - **`chat_routes`** - Chats, membership, typing and device tokens

/// Main router creation
pub mod router;

/// Contact routes
pub mod contact_routes;

/// Chat routes
pub mod chat_routes;

pub use router::create_router;
