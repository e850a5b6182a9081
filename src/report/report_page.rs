//! Defines the route handler for the report page, a pivoted table of income
//! and expense totals per date.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    entry::{EntryFilter, get_entries},
    html::{
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    navigation::NavBar,
    report::aggregation::{DateRow, pivot_by_date},
    user::UserID,
};

/// The state needed for the report page.
#[derive(Debug, Clone)]
pub struct ReportPageState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders income and expense totals for each date the user has entries on.
pub async fn get_report_page(
    State(state): State<ReportPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let entries = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_entries(user_id, &EntryFilter::default(), &connection)
            .inspect_err(|error| tracing::error!("could not get entries: {error}"))?
    };

    let rows = pivot_by_date(&entries);

    let nav_bar = NavBar::new(endpoints::REPORT_VIEW).into_html();
    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-6" { "Report" }

            @if rows.is_empty() {
                p data-empty-state="true" { "Nothing to report yet. Add some entries first." }
            } @else {
                (report_table(&rows))
            }
        }
    };

    Ok(base("Report", &[], &content).into_response())
}

fn report_table(rows: &[DateRow]) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md sm:rounded-lg"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Income" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Expenses" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        tr class=(TABLE_ROW_STYLE) data-report-row="true"
                        {
                            th
                                scope="row"
                                class="px-6 py-4 font-medium text-gray-900 \
                                    whitespace-nowrap dark:text-white"
                            {
                                (row.date)
                            }
                            td class=(TABLE_CELL_STYLE) { (format_currency(row.income)) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(row.expense)) }
                        }
                    }
                }
            }
        }
    }
}
