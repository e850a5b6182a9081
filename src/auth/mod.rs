//! User authentication: the token cookie, the guard middleware and the
//! log-in and log-out routes.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod token;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use redirect::normalize_redirect_url;
pub(crate) use redirect::{build_log_in_redirect_url, build_log_in_redirect_url_from_target};
pub(super) use token::Token;

#[cfg(test)]
pub use cookie::COOKIE_TOKEN;

#[cfg(test)]
pub use middleware::AuthState;
