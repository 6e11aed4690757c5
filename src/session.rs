//! Session state: who is logged in, and whether an auth call is in flight.
//!
//! The store holds an immutable [`Session`] snapshot behind a `watch` channel.
//! Every mutation replaces the snapshot and wakes all subscribers; readers never
//! observe a half-applied update. Only the [`auth`](crate::Auth) operations mutate it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Role of an account. Fixed at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Looks for jobs and applies to them.
    JobSeeker,
    /// Posts jobs and reviews applicants.
    Employer,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JobSeeker => "JOB_SEEKER",
            Self::Employer => "EMPLOYER",
            Self::Admin => "ADMIN",
        }
    }

    /// Whether accounts of this role complete a profile before using the app.
    ///
    /// Admins have no profile form and are never sent to onboarding.
    #[must_use]
    pub const fn has_profile_form(self) -> bool {
        !matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated account, as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's unique ID.
    pub id: String,
    /// The user's email address.
    pub email: String,
    /// First name given at registration.
    pub first_name: String,
    /// Last name given at registration.
    pub last_name: String,
    /// Account role.
    pub role: Role,
    /// Whether the email address has been verified.
    #[serde(default)]
    pub is_verified: bool,
    /// Whether a role-specific profile exists server-side. Never inferred locally.
    #[serde(default)]
    pub has_profile: bool,
    /// The role-specific profile record, if the server included it.
    #[serde(default)]
    pub profile: Option<serde_json::Value>,
    /// When the account was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A snapshot of the client-side session.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// The authenticated user, if any.
    pub user: Option<User>,
    /// Whether an auth call is currently in flight.
    pub is_loading: bool,
}

impl Session {
    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The logged in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

impl Default for Session {
    /// A fresh session: nobody logged in, rehydration pending.
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}

/// Single source of truth for the [`Session`].
///
/// Cloning the store is cheap and every clone shares the same state.
#[derive(Clone, Debug)]
pub struct SessionStore {
    sender: Arc<watch::Sender<Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Creates a store holding [`Session::default`].
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Session::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns a copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.sender.borrow().clone()
    }

    /// Subscribes to session replacements.
    ///
    /// The receiver starts out holding the current snapshot; `changed().await`
    /// resolves on every subsequent replacement.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sender.subscribe()
    }

    pub(crate) fn set_user(&self, user: Option<User>) {
        let is_loading = self.sender.borrow().is_loading;
        self.sender.send_replace(Session { user, is_loading });
    }

    pub(crate) fn set_loading(&self, is_loading: bool) {
        let user = self.sender.borrow().user.clone();
        self.sender.send_replace(Session { user, is_loading });
    }

    /// Marks the session as loading until the returned guard is dropped.
    pub(crate) fn begin_loading(&self) -> LoadingGuard {
        self.set_loading(true);
        LoadingGuard {
            store: self.clone(),
        }
    }
}

/// Clears `is_loading` when dropped, whatever way the call it guards ends.
#[must_use = "the session stops loading as soon as the guard is dropped"]
pub(crate) struct LoadingGuard {
    store: SessionStore,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.store.set_loading(false);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::json;

    use super::*;

    pub(crate) fn user(role: Role, has_profile: bool) -> User {
        User {
            id: "usr_1".to_string(),
            email: "a@b.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role,
            is_verified: true,
            has_profile,
            profile: None,
            created_at: None,
        }
    }

    #[test]
    fn fresh_store_is_loading_and_anonymous() {
        let store = SessionStore::new();
        let session = store.snapshot();
        assert!(session.is_loading);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn loading_guard_clears_flag_on_drop() {
        let store = SessionStore::new();
        store.set_loading(false);
        {
            let _guard = store.begin_loading();
            assert!(store.snapshot().is_loading);
        }
        assert!(!store.snapshot().is_loading);
    }

    #[test]
    fn set_user_keeps_loading_flag() {
        let store = SessionStore::new();
        store.set_user(Some(user(Role::Employer, false)));
        let session = store.snapshot();
        assert!(session.is_loading);
        assert_eq!(session.user().map(|u| u.role), Some(Role::Employer));
    }

    #[tokio::test]
    async fn subscribers_see_each_replacement() {
        let store = SessionStore::new();
        let mut receiver = store.subscribe();

        store.set_user(Some(user(Role::JobSeeker, true)));
        receiver.changed().await.unwrap();
        assert!(receiver.borrow_and_update().is_authenticated());

        store.set_user(None);
        receiver.changed().await.unwrap();
        assert!(!receiver.borrow_and_update().is_authenticated());
    }

    #[test]
    fn user_wire_format() {
        let user: User = serde_json::from_value(json!({
            "id": "42",
            "email": "boss@acme.io",
            "firstName": "Grace",
            "lastName": "Hopper",
            "role": "EMPLOYER",
            "isVerified": true,
            "hasProfile": false,
            "createdAt": "2024-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.role, Role::Employer);
        assert!(!user.has_profile);
        assert_eq!(user.full_name(), "Grace Hopper");
        assert!(user.created_at.is_some());
    }
}
