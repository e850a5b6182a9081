//! Defines the route handler for the delete confirmation page.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, format_currency,
        loading_spinner,
    },
    navigation::NavBar,
    user::UserID,
};

use super::core::{EntryId, get_entry};

/// The state needed for the delete confirmation page.
#[derive(Debug, Clone)]
pub struct DeleteEntryPageState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteEntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page asking the user to confirm deleting the entry `entry_id`.
///
/// Requests for entries that do not exist or belong to another user get a 404
/// page.
pub async fn get_delete_entry_page(
    State(state): State<DeleteEntryPageState>,
    Extension(user_id): Extension<UserID>,
    Path(entry_id): Path<EntryId>,
) -> Result<Response, Error> {
    let entry = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_entry(entry_id, user_id, &connection)?
    };

    let delete_entry_route = format_endpoint(endpoints::DELETE_ENTRY_API, entry_id);
    let nav_bar = NavBar::new(endpoints::LIST_VIEW).into_html();
    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(delete_entry_route)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Delete Entry" }

                p
                {
                    "Are you sure you want to delete \""
                    (entry.title)
                    "\" ("
                    (format_currency(entry.amount))
                    " on "
                    (entry.date)
                    ")? This cannot be undone."
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_DELETE_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (loading_spinner())
                    }
                    " Delete Entry"
                }

                a href=(endpoints::LIST_VIEW) tabindex="0" class=(LINK_STYLE) { "Cancel" }
            }
        }
    };

    Ok(base("Delete Entry", &[], &content).into_response())
}
