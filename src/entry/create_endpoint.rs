//! Defines the endpoint for creating a new entry.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{AppState, Error, endpoints, user::UserID};

use super::{
    core::create_entry,
    create_page::new_entry_form,
    form::{EntryForm, validate_entry_form},
};

/// The state needed to create an entry.
#[derive(Debug, Clone)]
pub struct CreateEntryState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new entry, redirects to the entry list on
/// success.
///
/// Validation failures re-render the form with per-field error messages. The
/// entry owner always comes from the authenticated user, never from the form.
pub async fn create_entry_endpoint(
    State(state): State<CreateEntryState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<EntryForm>,
) -> Response {
    let draft = match validate_entry_form(&form) {
        Ok(draft) => draft,
        Err(errors) => {
            return new_entry_form(&form, &errors).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_entry(draft, user_id, &connection) {
        tracing::error!("could not create entry: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::LIST_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
