//! Contact Request Workflow
//!
//! Each operation is a fixed sequence of steps: parse the input, open a
//! transaction, re-read the relationship of the pair, apply the
//! transition, commit, then emit notifications. A rejection at any step
//! drops the transaction, so nothing is written.
//!
//! Relationship of a pair `(A, B)`:
//!
//! ```text
//! NoRelation --Create--> Requested(A->B) --Respond(accept)--> Contact
//!                             |  \--Respond(reject)/Withdraw--> NoRelation
//! Contact --DeleteContact--> NoRelation
//! ```

use sqlx::{SqliteConnection, SqlitePool};

use crate::backend::auth::members::{contact_info_for, find_member_ids, member_exists};
use crate::backend::error::BackendError;
use crate::backend::messaging::db;
use crate::backend::middleware::AuthenticatedMember;
use crate::backend::notifications::Notifier;
use crate::backend::server::database::begin_write;
use crate::shared::messaging::{
    is_string_provided, require_id, ContactInfo, CreateContactRequestBody, IdentifierType,
    ListContactRequestsResponse, RespondContactRequestBody,
};
use crate::shared::{ErrorKind, MemberId, PushPayload, SYSTEM_MEMBER_ID};

/// Maximum number of search results
pub const SEARCH_LIMIT: i64 = 20;

/// `identifierType` addressing a member by id rather than by a column
pub const MEMBER_ID_SELECTOR: &str = "memberid";

/// How the target of a new contact request is addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Case-insensitive match on one member column
    Identifier { kind: IdentifierType, value: String },
    /// A member id known to the caller (`identifierType: "memberid"`)
    Member(MemberId),
}

impl Selector {
    /// Parse the body of `POST /contacts/requests`
    ///
    /// `{identifier, identifierType}` takes precedence; a bare `{nickname}`
    /// is the legacy form of a nickname selector.
    pub fn from_body(body: &CreateContactRequestBody) -> Result<Self, ErrorKind> {
        let identifier = body.identifier.as_deref();
        let identifier_type = body.identifier_type.as_deref();

        if is_string_provided(identifier) || is_string_provided(identifier_type) {
            let (Some(value), Some(kind)) = (identifier, identifier_type) else {
                return Err(ErrorKind::MissingFields);
            };
            if !is_string_provided(Some(value)) || !is_string_provided(Some(kind)) {
                return Err(ErrorKind::MissingFields);
            }
            if kind.trim() == MEMBER_ID_SELECTOR {
                return Ok(Self::Member(require_id(value, "identifier")?));
            }
            let kind = IdentifierType::parse(kind.trim()).ok_or(ErrorKind::InvalidIdentifierType)?;
            return Ok(Self::Identifier {
                kind,
                value: value.trim().to_string(),
            });
        }

        match body.nickname.as_deref() {
            Some(nickname) if is_string_provided(Some(nickname)) => Ok(Self::Identifier {
                kind: IdentifierType::Nickname,
                value: nickname.trim().to_string(),
            }),
            _ => Err(ErrorKind::MissingFields),
        }
    }
}

/// Answer to a pending request, as parsed from `PUT /contacts/requests`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub requester: MemberId,
    pub accept: bool,
}

impl Answer {
    pub fn from_body(body: &RespondContactRequestBody) -> Result<Self, ErrorKind> {
        let member_id = match &body.member_id {
            Some(id) if !id.is_blank() => id,
            _ => return Err(ErrorKind::MissingFields),
        };
        let accept = body.is_accepting.ok_or(ErrorKind::MissingFields)?;
        let requester = member_id
            .as_id()
            .ok_or(ErrorKind::invalid_parameter("memberID"))?;
        Ok(Self { requester, accept })
    }
}

/// Parse the path of `GET /contacts/requests/search/:identifier/:identifierType`
pub fn parse_search(prefix: &str, field: &str) -> Result<(IdentifierType, String), ErrorKind> {
    if prefix.trim().is_empty() || field.trim().is_empty() {
        return Err(ErrorKind::MissingFields);
    }
    let field = IdentifierType::parse(field.trim()).ok_or(ErrorKind::InvalidIdentifierType)?;
    Ok((field, prefix.trim().to_string()))
}

async fn resolve(conn: &mut SqliteConnection, selector: &Selector) -> Result<MemberId, BackendError> {
    match selector {
        Selector::Identifier { kind, value } => {
            let ids = find_member_ids(conn, *kind, value).await?;
            match ids.as_slice() {
                [id] => Ok(*id),
                [] => Err(ErrorKind::IdentifierNotFound { kind: *kind }.into()),
                _ => Err(ErrorKind::AmbiguousSelector.into()),
            }
        }
        Selector::Member(id) => {
            if *id != SYSTEM_MEMBER_ID && member_exists(conn, *id).await? {
                Ok(*id)
            } else {
                Err(ErrorKind::MemberIdNotFound.into())
            }
        }
    }
}

/// Create a contact request from the caller to the member `selector` names
///
/// # Returns
/// Id of the member the request was sent to
///
/// # Errors
/// `IdentifierNotFound`/`MemberIdNotFound`, `AmbiguousSelector`,
/// `SelfReference`, `AlreadyContacts`, `DuplicateRequest`, or a store error
pub async fn create_request(
    pool: &SqlitePool,
    notifier: &Notifier,
    caller: &AuthenticatedMember,
    selector: &Selector,
) -> Result<MemberId, BackendError> {
    let mut tx = begin_write(pool).await?;

    let target = resolve(&mut tx, selector).await?;
    if target == caller.member_id {
        return Err(ErrorKind::SelfReference.into());
    }

    let pair = db::pair_state(&mut tx, caller.member_id, target).await?;
    if pair.contact {
        return Err(ErrorKind::AlreadyContacts.into());
    }
    if pair.outgoing {
        return Err(ErrorKind::DuplicateRequest.into());
    }

    db::insert_request(&mut tx, caller.member_id, target).await?;
    tx.commit().await?;

    tracing::info!(from = caller.member_id, to = target, "Contact request created");
    notifier.notify(
        [caller.member_id, target],
        PushPayload::new_contact_request(target, caller.member_id, &caller.nickname),
    );
    Ok(target)
}

/// Pending requests sent to and sent by the caller
pub async fn list_requests(
    pool: &SqlitePool,
    caller: &AuthenticatedMember,
) -> Result<ListContactRequestsResponse, BackendError> {
    let mut conn = pool.acquire().await?;

    let received_ids = db::requesters_of(&mut conn, caller.member_id).await?;
    let sent_ids = db::request_targets_of(&mut conn, caller.member_id).await?;

    Ok(ListContactRequestsResponse {
        success: true,
        received_requests: contact_info_for(&mut conn, &received_ids).await?,
        sent_requests: contact_info_for(&mut conn, &sent_ids).await?,
    })
}

/// Accept or reject the pending request from `answer.requester` to the caller
///
/// Either way, pending requests between the two are removed in both
/// directions. Accepting also records them as contacts.
pub async fn respond_to_request(
    pool: &SqlitePool,
    notifier: &Notifier,
    caller: &AuthenticatedMember,
    answer: Answer,
) -> Result<(), BackendError> {
    let requester = answer.requester;
    let mut tx = begin_write(pool).await?;

    if requester == SYSTEM_MEMBER_ID || !member_exists(&mut tx, requester).await? {
        return Err(ErrorKind::MemberIdNotFound.into());
    }
    if !db::request_exists(&mut tx, requester, caller.member_id).await? {
        return Err(ErrorKind::RequestNotFound.into());
    }

    if answer.accept && !db::contact_exists(&mut tx, requester, caller.member_id).await? {
        db::insert_contact(&mut tx, requester, caller.member_id).await?;
    }
    db::delete_requests_between(&mut tx, requester, caller.member_id).await?;
    tx.commit().await?;

    tracing::info!(
        from = requester,
        to = caller.member_id,
        accepted = answer.accept,
        "Contact request answered"
    );
    notifier.notify(
        [requester, caller.member_id],
        PushPayload::contact_request_response(
            requester,
            caller.member_id,
            &caller.nickname,
            answer.accept,
        ),
    );
    Ok(())
}

/// Withdraw the caller's pending request to `target`
///
/// Succeeds whether or not such a request exists.
pub async fn withdraw_request(
    pool: &SqlitePool,
    notifier: &Notifier,
    caller: &AuthenticatedMember,
    target: MemberId,
) -> Result<(), BackendError> {
    let removed = {
        let mut conn = pool.acquire().await?;
        db::delete_request(&mut conn, caller.member_id, target).await?
    };

    tracing::info!(from = caller.member_id, to = target, removed, "Contact request withdrawn");
    notifier.notify(
        [caller.member_id, target],
        PushPayload::contact_request_deleted(target, caller.member_id, &caller.nickname),
    );
    Ok(())
}

/// Members the caller could send a request to, by prefix of `field`
pub async fn search(
    pool: &SqlitePool,
    caller: &AuthenticatedMember,
    field: IdentifierType,
    prefix: &str,
) -> Result<Vec<ContactInfo>, BackendError> {
    let mut conn = pool.acquire().await?;
    let found = db::search_members(&mut conn, caller.member_id, field, prefix, SEARCH_LIMIT).await?;
    Ok(found)
}

/// Confirmed contacts of the caller
pub async fn list_contacts(
    pool: &SqlitePool,
    caller: &AuthenticatedMember,
) -> Result<Vec<ContactInfo>, BackendError> {
    let mut conn = pool.acquire().await?;
    let ids = db::contact_ids_of(&mut conn, caller.member_id).await?;
    Ok(contact_info_for(&mut conn, &ids).await?)
}

/// Delete the contact between the caller and `other`, from either side
///
/// Succeeds whether or not the two are contacts; only an actual deletion
/// notifies them.
pub async fn delete_contact(
    pool: &SqlitePool,
    notifier: &Notifier,
    caller: &AuthenticatedMember,
    other: MemberId,
) -> Result<(), BackendError> {
    let removed = {
        let mut conn = pool.acquire().await?;
        db::delete_contact(&mut conn, caller.member_id, other).await?
    };

    if removed > 0 {
        tracing::info!(deletor = caller.member_id, deleted = other, "Contact deleted");
        notifier.notify(
            [caller.member_id, other],
            PushPayload::contact_deleted(other, caller.member_id, &caller.nickname),
        );
    }
    Ok(())
}
