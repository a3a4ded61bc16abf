//! Session-start detection of a returned login identity
//!
//! The auth collaborator redirects back to the app with the account id
//! embedded as a query parameter. Bootstrap consumes it once, scrubs it
//! from the visible location so a reload doesn't replay the login, and
//! kicks off the initial display-name and library fetches.

use tracing::info;

use crate::session::Session;

/// Query parameter the auth collaborator appends on redirect
pub const LOGIN_PARAM: &str = "steam_id";

/// Read/replace access to the visible navigation state (the URL query
/// string). Implemented by the presentation layer.
pub trait Navigation {
    /// Current query string, with or without the leading '?'
    fn query(&self) -> String;

    /// Replace the visible query string without reloading
    fn replace_query(&mut self, query: &str);
}

/// Extract the login parameter from a query string. Returns the account id
/// and the remaining query with the parameter removed; None when no login
/// is present.
pub fn extract_login(query: &str) -> Option<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut account_id = None;
    let mut rest = Vec::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let value = pair
            .strip_prefix(LOGIN_PARAM)
            .and_then(|r| r.strip_prefix('='));
        match value {
            Some(v) if !v.is_empty() && account_id.is_none() => {
                account_id = Some(v.to_string());
            }
            _ => rest.push(pair),
        }
    }

    account_id.map(|id| (id, rest.join("&")))
}

/// Inspect the navigation context for a returned login. When one is present:
/// adopt the account, mark the session authenticated, scrub the parameter,
/// then start display-name resolution and library loading (independent
/// fetches; one failing never blocks the other). Returns whether a login
/// was consumed.
pub fn bootstrap(session: &mut Session, nav: &mut dyn Navigation) -> bool {
    let Some((account_id, remainder)) = extract_login(&nav.query()) else {
        return false;
    };

    info!(%account_id, "adopting account from login redirect");
    nav.replace_query(&remainder);

    session.set_account(account_id);
    session.mark_authenticated();
    session.resolve_display_name();
    session.load_library();
    true
}
