//! Authentication Module
//!
//! This module handles member identity: member records and the JWT tokens
//! that identify a caller. Registration and login screens live in a
//! separate account service; this server only needs to create members,
//! flip their verification flag and check bearer tokens.
//!
//! # Architecture
//!
//! - **`members`** - Member model and database operations
//! - **`sessions`** - JWT token management
//!
//! # Security
//!
//! - Tokens are HS256-signed with `JWT_SECRET` and expire after 14 days
//! - The middleware re-checks that the member still exists on every request

/// Member model and database operations
pub mod members;

/// JWT token generation and validation
pub mod sessions;

pub use members::{Member, NewMember};
pub use sessions::{create_token, verify_token, Claims};
