//! Routes and the Navigation Gate

use crate::session::AuthSession;

/// Navigable screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, renders the login screen
    Root,
    Login,
    Register,
    Profile,
    EditProfile,
    Settings,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Root,
        Route::Login,
        Route::Register,
        Route::Profile,
        Route::EditProfile,
        Route::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Profile => "/profile",
            Route::EditProfile => "/edit-profile",
            Route::Settings => "/settings",
        }
    }

    /// Parse a path; a trailing slash is ignored
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Whether rendering requires an auth session
    pub fn is_guarded(&self) -> bool {
        matches!(self, Route::Profile)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a gate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Render(Route),
    Redirect(Route),
}

impl Admission {
    /// The route that actually ends up on screen
    pub fn route(&self) -> Route {
        match self {
            Admission::Render(r) | Admission::Redirect(r) => *r,
        }
    }
}

/// Admit a guarded route only when a token is present
pub fn admit(route: Route, session: &AuthSession) -> Admission {
    if route.is_guarded() && !session.is_authenticated() {
        tracing::debug!(route = %route, "No session, redirecting to login");
        Admission::Redirect(Route::Login)
    } else {
        Admission::Render(route)
    }
}
