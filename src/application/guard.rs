//! Navigation guards

use crate::domain::routes::{Access, RouteTable, HOME_PATH, LOGIN_PATH};

/// Outcome of a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Enter the route and render `view`
    Proceed { view: &'static str },
    /// Go to `to` instead
    Redirect { to: &'static str },
    NotFound,
}

/// Let signed-in users through; send everyone else to the login view
pub fn auth_guard(authenticated: bool) -> Option<&'static str> {
    if authenticated {
        None
    } else {
        Some(LOGIN_PATH)
    }
}

/// Let signed-out users through; send signed-in users home
pub fn guest_guard(authenticated: bool) -> Option<&'static str> {
    if authenticated {
        Some(HOME_PATH)
    } else {
        None
    }
}

/// Resolve a navigation to `path` against the route table
pub fn navigate(table: &RouteTable, path: &str, authenticated: bool) -> Navigation {
    let Some(route) = table.find(path) else {
        return Navigation::NotFound;
    };

    let redirect = match route.access {
        Access::Authenticated => auth_guard(authenticated),
        Access::Guest => guest_guard(authenticated),
    };

    match redirect {
        Some(to) => Navigation::Redirect { to },
        None => Navigation::Proceed { view: route.view },
    }
}
