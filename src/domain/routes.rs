//! Route table of the monitoring front end

/// Path of the login view
pub const LOGIN_PATH: &str = "/login";

/// Path of the main diagram view
pub const HOME_PATH: &str = "/";

/// Who may enter a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only signed-in users; others are sent to the login view
    Authenticated,
    /// Only signed-out users; others are sent home
    Guest,
}

/// One entry of the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub view: &'static str,
    pub access: Access,
}

/// Ordered list of known routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        RouteTable {
            routes: vec![
                Route {
                    path: HOME_PATH,
                    view: "Index",
                    access: Access::Authenticated,
                },
                Route {
                    path: LOGIN_PATH,
                    view: "Login",
                    access: Access::Guest,
                },
            ],
        }
    }
}

impl RouteTable {
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the route for an exact path
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }
}
