//! Defines the route handler for the monthly summary page.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    entry::{EntryFilter, get_entries},
    html::{PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::NavBar,
    report::{
        aggregation::totals,
        month::{MonthQuery, ReportMonth, month_selector_form},
    },
    timezone::get_local_date,
    user::UserID,
};

/// The state needed for the summary page.
#[derive(Debug, Clone)]
pub struct SummaryPageState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for SummaryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the income, expense and net totals for the month in the query
/// parameters, defaulting to the current month.
///
/// A month without entries shows zero totals.
pub async fn get_summary_page(
    State(state): State<SummaryPageState>,
    Extension(user_id): Extension<UserID>,
    Query(query_params): Query<MonthQuery>,
) -> Result<Response, Error> {
    let Some(today) = get_local_date(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Err(Error::InvalidTimezoneError(state.local_timezone.clone()));
    };

    let report_month = ReportMonth::resolve(&query_params, today);
    let (start_date, end_date) = report_month.date_range();

    let entries = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_entries(
            user_id,
            &EntryFilter::date_range(start_date, end_date),
            &connection,
        )
        .inspect_err(|error| tracing::error!("could not get entries: {error}"))?
    };

    let month_totals = totals(&entries);

    let nav_bar = NavBar::new(endpoints::SUMMARY_VIEW).into_html();
    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (month_selector_form(endpoints::SUMMARY_VIEW, report_month, today.year()))

            h2 class="text-xl font-bold mt-6" { "Summary for " (report_month.label()) }

            dl class="grid grid-cols-1 gap-4 sm:grid-cols-3 mt-6 w-full max-w-2xl"
            {
                div class="p-4 rounded-lg bg-green-50 dark:bg-green-900"
                {
                    dt class="text-sm text-gray-600 dark:text-gray-300" { "Income" }
                    dd id="income-total" class="text-xl font-bold"
                    {
                        (format_currency(month_totals.income))
                    }
                }

                div class="p-4 rounded-lg bg-red-50 dark:bg-red-900"
                {
                    dt class="text-sm text-gray-600 dark:text-gray-300" { "Expenses" }
                    dd id="expense-total" class="text-xl font-bold"
                    {
                        (format_currency(month_totals.expense))
                    }
                }

                div class="p-4 rounded-lg bg-blue-50 dark:bg-blue-900"
                {
                    dt class="text-sm text-gray-600 dark:text-gray-300" { "Net balance" }
                    dd id="net-total" class="text-xl font-bold"
                    {
                        (format_currency(month_totals.net()))
                    }
                }
            }
        }
    };

    Ok(base("Summary", &[], &content).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Query, State},
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        entry::core::{
            EntryType,
            test_utils::{create_test_entry, create_test_user, draft, get_test_connection},
        },
        report::month::MonthQuery,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
    };

    use super::{SummaryPageState, get_summary_page};

    fn month_query(month: &str, year: &str) -> MonthQuery {
        MonthQuery {
            month: Some(month.to_owned()),
            year: Some(year.to_owned()),
        }
    }

    #[tokio::test]
    async fn summary_page_totals_entries_in_month() {
        let conn = get_test_connection();
        let user_id = create_test_user("alice", &conn);
        let mut salary = draft("Salary", 1000.0, date!(2025 - 10 - 01));
        salary.entry_type = EntryType::Income;
        create_test_entry(salary, user_id, &conn);
        create_test_entry(draft("Lunch", 12.5, date!(2025 - 10 - 02)), user_id, &conn);
        // Outside the selected month, must not count.
        create_test_entry(
            draft("Old lunch", 99.0, date!(2025 - 09 - 30)),
            user_id,
            &conn,
        );
        let state = SummaryPageState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_summary_page(
            State(state),
            Extension(user_id),
            Query(month_query("10", "2025")),
        )
        .await
        .expect("Could not render page");

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        assert_total(&document, "#income-total", "$1,000.00");
        assert_total(&document, "#expense-total", "$12.50");
        assert_total(&document, "#net-total", "$987.50");
    }

    #[tokio::test]
    async fn summary_page_shows_zero_totals_for_empty_month() {
        let conn = get_test_connection();
        let user_id = create_test_user("alice", &conn);
        let state = SummaryPageState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_summary_page(
            State(state),
            Extension(user_id),
            Query(month_query("2", "2024")),
        )
        .await
        .expect("Could not render page");

        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        assert_total(&document, "#income-total", "$0.00");
        assert_total(&document, "#expense-total", "$0.00");
        assert_total(&document, "#net-total", "$0.00");
    }

    #[track_caller]
    fn assert_total(document: &Html, selector: &str, want: &str) {
        let element = document
            .select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No element found for {selector}"));
        let text = element.text().collect::<String>();
        assert_eq!(text.trim(), want, "want {want} for {selector}, got {text}");
    }
}
