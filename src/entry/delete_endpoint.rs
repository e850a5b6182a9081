//! Defines the route handler for deleting an entry.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{AppState, Error, endpoints, user::UserID};

use super::core::{EntryId, delete_entry};

/// The state needed to delete an entry.
#[derive(Debug, Clone)]
pub struct DeleteEntryState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Deletes the entry `entry_id` if it belongs to the signed-in user.
///
/// Entries that do not exist or belong to another user produce a not found
/// alert.
pub async fn delete_entry_endpoint(
    State(state): State<DeleteEntryState>,
    Extension(user_id): Extension<UserID>,
    Path(entry_id): Path<EntryId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_entry(entry_id, user_id, &connection) {
        Ok(0) => Error::NotFound.into_alert_response(),
        Ok(_) => {
            (HxRedirect(endpoints::LIST_VIEW.to_owned()), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("could not delete entry {entry_id}: {error}");
            error.into_alert_response()
        }
    }
}
