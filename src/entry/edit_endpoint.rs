//! Defines the endpoint for updating an existing entry.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{AppState, Error, endpoints, user::UserID};

use super::{
    core::{EntryId, update_entry},
    edit_page::edit_entry_form,
    form::{EntryForm, validate_entry_form},
};

/// The state needed to update an entry.
#[derive(Debug, Clone)]
pub struct EditEntryState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for updating the entry `entry_id`, redirects to the entry
/// list on success.
///
/// Validation failures re-render the form with per-field error messages.
/// Updates are scoped to the authenticated user: an update that matches no
/// owned entry responds with a not-found alert.
pub async fn edit_entry_endpoint(
    State(state): State<EditEntryState>,
    Extension(user_id): Extension<UserID>,
    Path(entry_id): Path<EntryId>,
    Form(form): Form<EntryForm>,
) -> Response {
    let draft = match validate_entry_form(&form) {
        Ok(draft) => draft,
        Err(errors) => {
            return edit_entry_form(entry_id, &form, &errors).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_entry(entry_id, user_id, draft, &connection) {
        Ok(0) => Error::NotFound.into_alert_response(),
        Ok(_) => (
            HxRedirect(endpoints::LIST_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not update entry {entry_id}: {error}");
            error.into_alert_response()
        }
    }
}
