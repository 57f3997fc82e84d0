//! Shared Error Types
//!
//! This module defines the rejection taxonomy of the contact and chat
//! workflows. Every rejection carries the fixed message clients display
//! and the HTTP status the server answers with, so both sides of the wire
//! agree on what a failure means.
//!
//! # Error Categories
//!
//! - `Validation` - missing or malformed input, rejected before the store is touched
//! - `StateConflict` - input is well formed but violates a relationship or
//!   membership invariant, rejected after a read and before any write
//!
//! # Usage
//!
//! ```rust
//! use pocketchat::shared::error::{ErrorKind, ErrorCategory};
//!
//! let error = ErrorKind::SelfReference;
//! assert_eq!(error.category(), ErrorCategory::StateConflict);
//! assert_eq!(error.to_string(), "Can not create contact with oneself");
//! ```
use thiserror::Error;

use crate::shared::messaging::IdentifierType;

/// Broad class of a workflow rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input shape is wrong
    Validation,
    /// Input conflicts with current relationship or membership state
    StateConflict,
}

/// Workflow rejection kinds
///
/// The `Display` text of each variant is the `message` field of the JSON
/// error body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("Missing required information")]
    MissingFields,

    /// Unknown identifier type; also used for an unknown search field
    #[error("Invalid Identifier Type")]
    InvalidIdentifierType,

    #[error("Malformed parameter. {name} must be a number")]
    InvalidParameter {
        /// Name of the offending parameter as the client sent it
        name: &'static str,
    },

    #[error("Can not create contact with oneself")]
    SelfReference,

    #[error("Members are already contacts")]
    AlreadyContacts,

    #[error("Contact request already exists")]
    DuplicateRequest,

    /// More than one member matches a case-insensitive selector
    #[error("Duplicate identifiers exist")]
    AmbiguousSelector,

    #[error("{kind} does not exist")]
    IdentifierNotFound {
        /// Which column the selector was matched against
        kind: IdentifierType,
    },

    #[error("MemberID does not exist")]
    MemberIdNotFound,

    #[error("Contact request does not exist")]
    RequestNotFound,

    #[error("Chat ID not found")]
    ChatNotFound,

    #[error("email not found")]
    EmailNotFound,

    #[error("user not in chat")]
    NotInChat,

    #[error("user already joined")]
    AlreadyJoined,
}

impl ErrorKind {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str) -> Self {
        Self::InvalidParameter { name }
    }

    /// Which class of rejection this is
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingFields | Self::InvalidIdentifierType | Self::InvalidParameter { .. } => {
                ErrorCategory::Validation
            }
            _ => ErrorCategory::StateConflict,
        }
    }

    /// HTTP status code as a plain number
    ///
    /// Missing chats and unknown emails answer 404; every other rejection
    /// answers 400.
    pub fn status(&self) -> u16 {
        match self {
            Self::ChatNotFound | Self::EmailNotFound => 404,
            _ => 400,
        }
    }
}
