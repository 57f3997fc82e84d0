//! Contact Data Structure
//!
//! Represents a member as shown in contact lists, request lists and
//! search results.

use serde::{Deserialize, Serialize};

use super::MemberId;

/// Public contact information of a member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub memberid: MemberId,
    pub first: String,
    pub last: String,
    pub nickname: String,
}

/// Response type for listing contacts or search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactListResponse {
    pub success: bool,
    pub data: Vec<ContactInfo>,
}

/// Plain acknowledgement body: `{"success": true}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
