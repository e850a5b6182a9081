//! The URIs for the app's pages and API endpoints.
//!
//! For endpoints that take a parameter, e.g., '/edit/{entry_id}', use [format_endpoint].

/// The landing page with links to the entry list, registration and log-in pages.
pub const ROOT: &str = "/";
/// The page listing a user's expenses and incomes.
pub const LIST_VIEW: &str = "/list";
/// The page for recording a new entry.
pub const NEW_ENTRY_VIEW: &str = "/create";
/// The page for editing an existing entry.
pub const EDIT_ENTRY_VIEW: &str = "/edit/{entry_id}";
/// The confirmation page for deleting an entry.
pub const DELETE_ENTRY_VIEW: &str = "/delete/{entry_id}";
/// The page with expense charts for a selected month.
pub const CHART_VIEW: &str = "/chart";
/// The page with a per-day income and expense breakdown.
pub const REPORT_VIEW: &str = "/report";
/// The page with per-month totals.
pub const SUMMARY_VIEW: &str = "/summary";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route for creating a new user.
pub const REGISTER_API: &str = "/api/register";
/// The route to create an entry.
pub const CREATE_ENTRY_API: &str = "/api/entries";
/// The route to update an entry.
pub const EDIT_ENTRY_API: &str = "/api/entries/{entry_id}";
/// The route to delete an entry.
pub const DELETE_ENTRY_API: &str = "/api/entries/{entry_id}/delete";

/// Replace the path parameter (e.g., '{entry_id}') in `endpoint_path` with `id`.
///
/// If `endpoint_path` has no path parameter, the path is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let Some(end) = endpoint_path.find('}') else {
        return endpoint_path.to_owned();
    };

    format!(
        "{}{}{}",
        &endpoint_path[..start],
        id,
        &endpoint_path[end + 1..]
    )
}

#[cfg(test)]
mod format_endpoint_tests {
    use super::format_endpoint;

    #[test]
    fn replaces_path_parameter() {
        let formatted_path = format_endpoint("/edit/{entry_id}", 42);

        assert_eq!(formatted_path, "/edit/42");
    }

    #[test]
    fn replaces_path_parameter_in_middle_of_path() {
        let formatted_path = format_endpoint("/api/entries/{entry_id}/delete", 7);

        assert_eq!(formatted_path, "/api/entries/7/delete");
    }

    #[test]
    fn leaves_path_without_parameter_unchanged() {
        let formatted_path = format_endpoint("/list", 1);

        assert_eq!(formatted_path, "/list");
    }
}
