//! Route guard: decides whether a protected route renders, waits, or redirects.
//!
//! The checks run in a fixed order and the first one that applies wins:
//!
//! | # | condition                                                      | decision                         |
//! |---|----------------------------------------------------------------|----------------------------------|
//! | 1 | session still loading                                          | `Loading`                        |
//! | 2 | nobody logged in                                               | redirect to `/login`             |
//! | 3 | route requires a role the user does not have                   | redirect to the user's dashboard |
//! | 4 | not onboarded, route is not the onboarding route or path       | redirect to `/onboarding`        |
//! | 5 | onboarded, route is the onboarding route                       | redirect to the user's dashboard |
//! | 6 | otherwise                                                      | `Render`                         |
//!
//! A role mismatch is reported as a redirect, never as a 403, and it is checked
//! before onboarding: a wrong-role user without a profile lands on their own
//! dashboard first.
//!
//! A user is onboarded once the server reports a profile. Roles without a
//! profile form ([`Role::has_profile_form`]) count as onboarded from the start.
//!
//! This is a UX gate only; the API enforces access control on its own.

use crate::session::{Role, Session};

/// Well-known paths of the app.
pub mod paths {
    /// Login form.
    pub const LOGIN: &str = "/login";
    /// Signup flow.
    pub const SIGNUP: &str = "/signup";
    /// Profile completion form.
    pub const ONBOARDING: &str = "/onboarding";
    /// Job seeker dashboard, also the fallback dashboard for other roles.
    pub const JOB_SEEKER_DASHBOARD: &str = "/dashboard";
    /// Employer dashboard.
    pub const EMPLOYER_DASHBOARD: &str = "/employer/dashboard";
}

/// What a protected route declares about who may see it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteRequirements {
    /// The route is the onboarding form itself: only users without a profile.
    pub require_onboarding: bool,
    /// Only users with this role.
    pub require_role: Option<Role>,
}

impl RouteRequirements {
    /// Any logged in, onboarded user.
    #[must_use]
    pub const fn authenticated() -> Self {
        Self {
            require_onboarding: false,
            require_role: None,
        }
    }

    /// Logged in, onboarded users with `role`.
    #[must_use]
    pub const fn role(role: Role) -> Self {
        Self {
            require_onboarding: false,
            require_role: Some(role),
        }
    }

    /// The onboarding form: logged in users without a profile.
    #[must_use]
    pub const fn onboarding() -> Self {
        Self {
            require_onboarding: true,
            require_role: None,
        }
    }
}

/// Outcome of the route guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still being restored; show a loading indicator.
    Loading,
    /// Navigate to this path instead.
    Redirect(&'static str),
    /// Render the protected route.
    Render,
}

/// Dashboard a role lands on.
#[must_use]
pub const fn dashboard_for(role: Role) -> &'static str {
    match role {
        Role::Employer => paths::EMPLOYER_DASHBOARD,
        Role::JobSeeker | Role::Admin => paths::JOB_SEEKER_DASHBOARD,
    }
}

/// Evaluates a route's requirements against the session.
///
/// `current_path` is the path being visited; it keeps a user without a
/// profile from being redirected to `/onboarding` while already there.
#[must_use]
pub fn evaluate(
    session: &Session,
    requirements: &RouteRequirements,
    current_path: &str,
) -> GuardDecision {
    if session.is_loading {
        return GuardDecision::Loading;
    }

    let Some(user) = session.user() else {
        return GuardDecision::Redirect(paths::LOGIN);
    };

    if let Some(required) = requirements.require_role {
        if required != user.role {
            return GuardDecision::Redirect(dashboard_for(user.role));
        }
    }

    let onboarded = user.has_profile || !user.role.has_profile_form();

    if !onboarded
        && !requirements.require_onboarding
        && trim_path(current_path) != paths::ONBOARDING
    {
        return GuardDecision::Redirect(paths::ONBOARDING);
    }

    if onboarded && requirements.require_onboarding {
        return GuardDecision::Redirect(dashboard_for(user.role));
    }

    GuardDecision::Render
}

pub(crate) fn trim_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
