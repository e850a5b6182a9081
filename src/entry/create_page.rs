//! Defines the route handler for the page for creating a new entry.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, loading_spinner},
    navigation::NavBar,
    timezone::get_local_date,
};

use super::form::{EntryForm, EntryFormErrors, entry_form_fields};

/// The form for creating a new entry.
///
/// Also used by the create endpoint to re-render the form with error messages
/// when validation fails.
pub(super) fn new_entry_form(form: &EntryForm, errors: &EntryFormErrors) -> Markup {
    html! {
        form
            hx-post=(endpoints::CREATE_ENTRY_API)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "New Entry" }

            (entry_form_fields(form, errors))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span
                    id="indicator"
                    class="inline htmx-indicator"
                {
                    (loading_spinner())
                }
                " Create Entry"
            }
        }
    }
}

/// The state needed for the new entry page.
#[derive(Debug, Clone)]
pub struct NewEntryPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewEntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating an entry.
pub async fn get_new_entry_page(State(state): State<NewEntryPageState>) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    let form = EntryForm {
        date: today.to_string(),
        ..Default::default()
    };

    let nav_bar = NavBar::new(endpoints::NEW_ENTRY_VIEW).into_html();
    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            (new_entry_form(&form, &EntryFormErrors::default()))
        }
    };

    Ok(base("Create Entry", &[], &content).into_response())
}
