//! Defines the route handler for the page for editing an existing entry.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, loading_spinner},
    navigation::NavBar,
    user::UserID,
};

use super::{
    core::{EntryId, get_entry},
    form::{EntryForm, EntryFormErrors, entry_form_fields},
};

/// The form for editing the entry `entry_id`.
///
/// Also used by the edit endpoint to re-render the form with error messages
/// when validation fails.
pub(super) fn edit_entry_form(
    entry_id: EntryId,
    form: &EntryForm,
    errors: &EntryFormErrors,
) -> Markup {
    let edit_entry_route = format_endpoint(endpoints::EDIT_ENTRY_API, entry_id);

    html! {
        form
            hx-post=(edit_entry_route)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Edit Entry" }

            (entry_form_fields(form, errors))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span
                    id="indicator"
                    class="inline htmx-indicator"
                {
                    (loading_spinner())
                }
                " Save Changes"
            }
        }
    }
}

/// The state needed for the edit entry page.
#[derive(Debug, Clone)]
pub struct EditEntryPageState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditEntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing the entry `entry_id`.
///
/// Requests for entries that do not exist or belong to another user get a 404
/// page.
pub async fn get_edit_entry_page(
    State(state): State<EditEntryPageState>,
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

    let form = EntryForm::from_entry(&entry);
    let nav_bar = NavBar::new(endpoints::LIST_VIEW).into_html();
    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            (edit_entry_form(entry_id, &form, &EntryFormErrors::default()))
        }
    };

    Ok(base("Edit Entry", &[], &content).into_response())
}
