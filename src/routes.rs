//! The app's route table.
//!
//! Public routes always render. Protected routes go through
//! [`guard::evaluate`](crate::guard::evaluate) with the requirements they declare.

use crate::guard::{self, paths, GuardDecision, RouteRequirements};
use crate::session::{Role, Session};

/// Who may see a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Everyone, logged in or not.
    Public,
    /// Guarded by the given requirements.
    Protected(RouteRequirements),
}

/// A declared route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Path pattern; `:name` segments match any single segment.
    pub pattern: &'static str,
    /// Access rule.
    pub access: Access,
}

/// Result of navigating to a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Render the matched route.
    Render(&'static str),
    /// Show a loading indicator; the session is still being restored.
    Loading,
    /// Go to this path instead.
    Redirect(&'static str),
    /// No route matches the path.
    NotFound,
}

/// Ordered list of routes; the first matching pattern wins.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// The Employ.me routes.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .public("/")
            .public(paths::LOGIN)
            .public(paths::SIGNUP)
            .public("/verify-email")
            .public("/forgot-password")
            .public("/reset-password")
            .public("/jobs")
            .protected("/jobs/:id/apply", RouteRequirements::role(Role::JobSeeker))
            .public("/jobs/:id")
            .protected(paths::ONBOARDING, RouteRequirements::onboarding())
            .protected(paths::JOB_SEEKER_DASHBOARD, RouteRequirements::authenticated())
            .protected("/applications", RouteRequirements::role(Role::JobSeeker))
            .protected(
                paths::EMPLOYER_DASHBOARD,
                RouteRequirements::role(Role::Employer),
            )
            .protected("/employer/jobs/new", RouteRequirements::role(Role::Employer))
            .protected(
                "/employer/jobs/:id/applicants",
                RouteRequirements::role(Role::Employer),
            )
            .protected("/admin", RouteRequirements::role(Role::Admin))
            .protected("/messages", RouteRequirements::authenticated())
            .protected("/profile", RouteRequirements::authenticated())
    }

    /// Adds a public route.
    #[must_use]
    pub fn public(mut self, pattern: &'static str) -> Self {
        self.routes.push(Route {
            pattern,
            access: Access::Public,
        });
        self
    }

    /// Adds a guarded route.
    #[must_use]
    pub fn protected(mut self, pattern: &'static str, requirements: RouteRequirements) -> Self {
        self.routes.push(Route {
            pattern,
            access: Access::Protected(requirements),
        });
        self
    }

    /// Declared routes, in match order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds the route matching `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = guard::trim_path(path);
        self.routes
            .iter()
            .find(|route| pattern_matches(route.pattern, path))
    }

    /// Decides what happens when the current session visits `path`.
    #[must_use]
    pub fn navigate(&self, path: &str, session: &Session) -> Navigation {
        let Some(route) = self.resolve(path) else {
            return Navigation::NotFound;
        };

        match route.access {
            Access::Public => Navigation::Render(route.pattern),
            Access::Protected(requirements) => {
                match guard::evaluate(session, &requirements, path) {
                    GuardDecision::Loading => Navigation::Loading,
                    GuardDecision::Redirect(to) => Navigation::Redirect(to),
                    GuardDecision::Render => Navigation::Render(route.pattern),
                }
            }
        }
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segments = path.split('/').filter(|s| !s.is_empty());

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                if !expected.starts_with(':') && expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
