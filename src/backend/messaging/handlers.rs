//! Contact HTTP Handlers
//!
//! This module contains the HTTP handlers for contact requests and contacts.
//! Handlers parse the request, run the workflow step and shape the JSON
//! body; every rule lives in `workflow`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::workflow::{self, Answer, Selector};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{
    require_id, ContactListResponse, CreateContactRequestBody, ListContactRequestsResponse,
    RespondContactRequestBody, SuccessResponse,
};

/// Send a contact request
///
/// `POST /contacts/requests`
pub async fn create_contact_request(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<CreateContactRequestBody>, JsonRejection>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let Json(body) = payload?;
    let selector = Selector::from_body(&body)?;
    workflow::create_request(&state.db_pool, &state.notifier, &caller, &selector).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// List pending requests sent to and by the caller
///
/// `GET /contacts/requests`
pub async fn list_contact_requests(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ListContactRequestsResponse>, BackendError> {
    let lists = workflow::list_requests(&state.db_pool, &caller).await?;
    Ok(Json(lists))
}

/// Accept or reject a request sent to the caller
///
/// `PUT /contacts/requests`
pub async fn respond_to_contact_request(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<RespondContactRequestBody>, JsonRejection>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let Json(body) = payload?;
    let answer = Answer::from_body(&body)?;
    workflow::respond_to_request(&state.db_pool, &state.notifier, &caller, answer).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Withdraw a request the caller sent
///
/// `DELETE /contacts/requests/:contactId`
pub async fn withdraw_contact_request(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(contact_id): Path<String>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let target = require_id(&contact_id, "contactId")?;
    workflow::withdraw_request(&state.db_pool, &state.notifier, &caller, target).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Search for members to send a request to
///
/// `GET /contacts/requests/search/:identifier/:identifierType`
pub async fn search_members(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((identifier, identifier_type)): Path<(String, String)>,
) -> Result<Json<ContactListResponse>, BackendError> {
    let (field, prefix) = workflow::parse_search(&identifier, &identifier_type)?;
    let data = workflow::search(&state.db_pool, &caller, field, &prefix).await?;
    Ok(Json(ContactListResponse {
        success: true,
        data,
    }))
}

/// List the caller's contacts
///
/// `GET /contacts`
pub async fn list_contacts(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ContactListResponse>, BackendError> {
    let data = workflow::list_contacts(&state.db_pool, &caller).await?;
    Ok(Json(ContactListResponse {
        success: true,
        data,
    }))
}

/// Delete a contact
///
/// `DELETE /contacts/:contactId`
pub async fn delete_contact(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(contact_id): Path<String>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let other = require_id(&contact_id, "contactId")?;
    workflow::delete_contact(&state.db_pool, &state.notifier, &caller, other).await?;
    Ok(Json(SuccessResponse::ok()))
}
