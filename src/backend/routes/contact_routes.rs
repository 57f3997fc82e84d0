/**
 * Contact Routes
 *
 * - `POST /contacts/requests` - Send a contact request
 * - `GET /contacts/requests` - Pending requests in both directions
 * - `PUT /contacts/requests` - Accept or reject a received request
 * - `DELETE /contacts/requests/{contact_id}` - Withdraw a sent request
 * - `GET /contacts/requests/search/{identifier}/{identifier_type}` - Member search
 * - `GET /contacts` - Confirmed contacts
 * - `DELETE /contacts/{contact_id}` - Delete a contact
 */

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::backend::messaging::handlers::{
    create_contact_request, delete_contact, list_contact_requests, list_contacts,
    respond_to_contact_request, search_members, withdraw_contact_request,
};
use crate::backend::server::state::AppState;

/// Add the contact routes to `router`
pub fn configure_contact_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/contacts/requests",
            post(create_contact_request)
                .get(list_contact_requests)
                .put(respond_to_contact_request),
        )
        .route(
            "/contacts/requests/{contact_id}",
            delete(withdraw_contact_request),
        )
        .route(
            "/contacts/requests/search/{identifier}/{identifier_type}",
            get(search_members),
        )
        .route("/contacts", get(list_contacts))
        .route("/contacts/{contact_id}", delete(delete_contact))
}
