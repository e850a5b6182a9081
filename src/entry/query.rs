//! Database query helpers for the entry list, chart and report pages.

use rusqlite::{Connection, ToSql};
use time::Date;

use crate::{Error, user::UserID};

use super::core::{Category, Entry, map_entry_row};

/// The optional filter criteria for the entry list.
///
/// All criteria are combined with logical AND. Absent criteria impose no
/// restriction. Every query is additionally scoped to the requesting user,
/// which callers cannot override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    /// Case-insensitive substring match on the entry title.
    pub query: Option<String>,
    /// Exact match on the entry category.
    pub category: Option<Category>,
    /// Inclusive lower bound on the entry date.
    pub start_date: Option<Date>,
    /// Inclusive upper bound on the entry date.
    pub end_date: Option<Date>,
}

impl EntryFilter {
    /// A filter matching all entries in the inclusive date range.
    pub fn date_range(start_date: Date, end_date: Date) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Default::default()
        }
    }
}

/// Get the entries owned by `user_id` that match `filter`, sorted by date
/// descending.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or a row cannot be mapped.
pub fn get_entries(
    user_id: UserID,
    filter: &EntryFilter,
    connection: &Connection,
) -> Result<Vec<Entry>, Error> {
    let mut sql = String::from(
        "SELECT id, user_id, title, amount, date, category, entry_type, bank, description
         FROM entry WHERE user_id = ?",
    );
    let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(user_id.as_i64())];

    if let Some(query) = filter.query.as_deref().filter(|query| !query.is_empty()) {
        // LIKE is case-insensitive for ASCII in SQLite. The wildcards are
        // escaped so the filter text matches as a literal substring.
        sql.push_str(" AND title LIKE '%' || ? || '%' ESCAPE '\\'");
        let escaped_query = query
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        params.push(Box::new(escaped_query));
    }

    if let Some(category) = filter.category {
        sql.push_str(" AND category = ?");
        params.push(Box::new(category));
    }

    if let Some(start_date) = filter.start_date {
        sql.push_str(" AND date >= ?");
        params.push(Box::new(start_date));
    }

    if let Some(end_date) = filter.end_date {
        sql.push_str(" AND date <= ?");
        params.push(Box::new(end_date));
    }

    // Sort by date, and then ID to keep entry order stable after updates.
    sql.push_str(" ORDER BY date DESC, id ASC");

    let params = params
        .iter()
        .map(|param| param.as_ref())
        .collect::<Vec<&dyn ToSql>>();

    connection
        .prepare(&sql)?
        .query_map(params.as_slice(), map_entry_row)?
        .map(|entry_result| entry_result.map_err(Error::SqlError))
        .collect()
}
