//! Contact Request Data Structures
//!
//! Wire types for pending, directional proposals between two members to
//! become contacts, and the identifier vocabulary used to address a member.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::contact::ContactInfo;
use super::IdParam;

/// Which member column an identifier is matched against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    Nickname,
    Firstname,
    Lastname,
    Email,
}

impl IdentifierType {
    pub const ALL: [IdentifierType; 4] = [
        IdentifierType::Nickname,
        IdentifierType::Firstname,
        IdentifierType::Lastname,
        IdentifierType::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierType::Nickname => "nickname",
            IdentifierType::Firstname => "firstname",
            IdentifierType::Lastname => "lastname",
            IdentifierType::Email => "email",
        }
    }

    /// Parse the client spelling; anything else is not an identifier type
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Column of the `members` table holding this identifier
    ///
    /// Always one of a fixed set of names, so it can be spliced into SQL.
    pub fn column(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body of `POST /contacts/requests`
///
/// Either `identifier` + `identifierType`, or the legacy `nickname` field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequestBody {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub identifier_type: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Request body of `PUT /contacts/requests`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RespondContactRequestBody {
    /// Member id of the requester being answered
    #[serde(rename = "memberID", default)]
    pub member_id: Option<IdParam>,
    #[serde(rename = "isAccepting", default)]
    pub is_accepting: Option<bool>,
}

/// Response of `GET /contacts/requests`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListContactRequestsResponse {
    pub success: bool,
    /// Members who sent the caller a request
    pub received_requests: Vec<ContactInfo>,
    /// Members the caller sent a request to
    pub sent_requests: Vec<ContactInfo>,
}
