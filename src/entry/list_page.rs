//! Defines the route handler for the page that lists entries as a table.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    report::aggregation::{Totals, bank_income_totals, totals},
    user::UserID,
};

use super::{
    core::{Bank, Category, Entry},
    form::DATE_FORMAT,
    query::{EntryFilter, get_entries},
};

/// The raw filter query parameters for the entry list page.
///
/// Values are kept as strings so that malformed input can be ignored rather
/// than rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Converts the raw query parameters into a filter.
///
/// Empty strings, unknown categories and unparseable dates are treated as
/// absent criteria.
fn parse_filter(query_params: &ListQuery) -> EntryFilter {
    let non_empty = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    };

    EntryFilter {
        query: non_empty(&query_params.query),
        category: non_empty(&query_params.category)
            .and_then(|category| Category::from_str(&category).ok()),
        start_date: non_empty(&query_params.start_date)
            .and_then(|date| Date::parse(&date, DATE_FORMAT).ok()),
        end_date: non_empty(&query_params.end_date)
            .and_then(|date| Date::parse(&date, DATE_FORMAT).ok()),
    }
}

/// The state needed for the entry list page.
#[derive(Debug, Clone)]
pub struct EntryListState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EntryListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the filtered overview of the user's entries.
pub async fn get_entry_list_page(
    State(state): State<EntryListState>,
    Extension(user_id): Extension<UserID>,
    Query(query_params): Query<ListQuery>,
) -> Result<Response, Error> {
    let filter = parse_filter(&query_params);

    let entries = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_entries(user_id, &filter, &connection)
            .inspect_err(|error| tracing::error!("could not get entries: {error}"))?
    };

    let entry_totals = totals(&entries);
    let income_by_bank = bank_income_totals(&entries);

    let nav_bar = NavBar::new(endpoints::LIST_VIEW).into_html();
    let content = html! {
        (nav_bar)

        div class="flex flex-col gap-6 px-6 py-8 mx-auto max-w-4xl"
        {
            (filter_form(&query_params, &filter))
            (totals_summary(&entry_totals, &income_by_bank))
            (entry_table(&entries))
        }
    };

    Ok(base("Entries", &[], &content).into_response())
}

/// Renders the filter controls, retaining the currently applied criteria.
fn filter_form(query_params: &ListQuery, filter: &EntryFilter) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::LIST_VIEW)
            class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-5 items-end"
        {
            div
            {
                label for="query" class=(FORM_LABEL_STYLE) { "Search" }

                input
                    type="text"
                    id="query"
                    name="query"
                    value=[query_params.query.as_deref()]
                    placeholder="Title contains..."
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select id="category" name="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[filter.category.is_none()] { "All categories" }

                    @for category in Category::ALL {
                        option
                            value=(category.as_str())
                            selected[filter.category == Some(category)]
                        {
                            (category.label())
                        }
                    }
                }
            }

            div
            {
                label for="start_date" class=(FORM_LABEL_STYLE) { "From" }

                input
                    type="date"
                    id="start_date"
                    name="start_date"
                    value=[filter.start_date.and_then(|date| date.format(DATE_FORMAT).ok())]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="end_date" class=(FORM_LABEL_STYLE) { "To" }

                input
                    type="date"
                    id="end_date"
                    name="end_date"
                    value=[filter.end_date.and_then(|date| date.format(DATE_FORMAT).ok())]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE) { "Filter" }
        }
    }
}

/// Renders the income/expense/net totals and the per-bank income breakdown
/// for the filtered entries.
fn totals_summary(entry_totals: &Totals, income_by_bank: &[(Bank, f64)]) -> Markup {
    html! {
        section class="grid grid-cols-1 gap-4 sm:grid-cols-3" data-totals="true"
        {
            div class="p-4 rounded-lg bg-green-50 dark:bg-green-900"
            {
                p class="text-sm text-gray-600 dark:text-gray-300" { "Income" }
                p id="income-total" class="text-xl font-bold"
                {
                    (format_currency(entry_totals.income))
                }
            }

            div class="p-4 rounded-lg bg-red-50 dark:bg-red-900"
            {
                p class="text-sm text-gray-600 dark:text-gray-300" { "Expenses" }
                p id="expense-total" class="text-xl font-bold"
                {
                    (format_currency(entry_totals.expense))
                }
            }

            div class="p-4 rounded-lg bg-blue-50 dark:bg-blue-900"
            {
                p class="text-sm text-gray-600 dark:text-gray-300" { "Net balance" }
                p id="net-total" class="text-xl font-bold" { (format_currency(entry_totals.net())) }
            }
        }

        @if !income_by_bank.is_empty() {
            section class="text-sm text-gray-600 dark:text-gray-300" data-bank-totals="true"
            {
                @for (bank, amount) in income_by_bank {
                    p { (bank.label()) " income: " (format_currency(*amount)) }
                }
            }
        }
    }
}

fn entry_table(entries: &[Entry]) -> Markup {
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
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Bank" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @if entries.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="7" class=(TABLE_CELL_STYLE) data-empty-state="true"
                            {
                                "No entries found."
                            }
                        }
                    }

                    @for entry in entries {
                        tr class=(TABLE_ROW_STYLE) data-entry-row="true"
                        {
                            td class=(TABLE_CELL_STYLE) { (entry.date) }
                            th
                                scope="row"
                                class="px-6 py-4 font-medium text-gray-900 \
                                    whitespace-nowrap dark:text-white"
                            {
                                (entry.title)
                            }
                            td class=(TABLE_CELL_STYLE) { (entry.category.label()) }
                            td class=(TABLE_CELL_STYLE) { (entry.entry_type.label()) }
                            td class=(TABLE_CELL_STYLE) { (entry.bank.label()) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(entry.amount)) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                a
                                    href=(format_endpoint(endpoints::EDIT_ENTRY_VIEW, entry.id))
                                    class=(LINK_STYLE)
                                {
                                    "Edit"
                                }
                                " "
                                a
                                    href=(format_endpoint(endpoints::DELETE_ENTRY_VIEW, entry.id))
                                    class=(LINK_STYLE)
                                {
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
