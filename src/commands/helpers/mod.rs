mod auth;
mod formatting;

pub(super) use auth::is_authorized;
pub(super) use formatting::as_html_block;
