//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use maud::html;
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{auth_guard, auth_guard_hx, get_log_in_page, get_log_out, post_log_in},
    endpoints,
    entry::{
        create_entry_endpoint, delete_entry_endpoint, edit_entry_endpoint, get_delete_entry_page,
        get_edit_entry_page, get_entry_list_page, get_new_entry_page,
    },
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    register::{get_register_page, post_register},
    report::{get_chart_page, get_report_page, get_summary_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::REGISTER_API, post(post_register))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::LIST_VIEW, get(get_entry_list_page))
        .route(endpoints::NEW_ENTRY_VIEW, get(get_new_entry_page))
        .route(endpoints::EDIT_ENTRY_VIEW, get(get_edit_entry_page))
        .route(endpoints::DELETE_ENTRY_VIEW, get(get_delete_entry_page))
        .route(endpoints::CHART_VIEW, get(get_chart_page))
        .route(endpoints::REPORT_VIEW, get(get_report_page))
        .route(endpoints::SUMMARY_VIEW, get(get_summary_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST routes need to use the HX-Redirect header for auth redirects to work properly
    // for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::CREATE_ENTRY_API, post(create_entry_endpoint))
            .route(endpoints::EDIT_ENTRY_API, post(edit_entry_endpoint))
            .route(endpoints::DELETE_ENTRY_API, post(delete_entry_endpoint))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The landing page at the root path '/'.
async fn get_index_page() -> Response {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold" { "Spendbook" }

            p class="mt-4"
            {
                "Keep track of what you earn and what you spend."
            }

            nav class="flex flex-row gap-4 mt-6"
            {
                a href=(endpoints::LIST_VIEW) tabindex="0" class=(LINK_STYLE) { "Your entries" }
                a href=(endpoints::REGISTER_VIEW) tabindex="0" class=(LINK_STYLE) { "Register" }
                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE) { "Log in" }
            }
        }
    };

    base("Home", &[], &content).into_response()
}
