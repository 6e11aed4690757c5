//! `employme` is the client core of the Employ.me job board.
//!
//! It keeps track of who is logged in, talks to the Employ.me REST API for
//! authentication and profiles, decides which routes a visitor may see, and
//! drives the signup, login and profile-completion forms.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::error::Error;
//!
//! use employme::{guard, EmployMe, GuardDecision, RouteTable};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn Error>> {
//!     let mut client = EmployMe::new("http://localhost:5000/api");
//!
//!     // Rehydrate the session on startup.
//!     client.auth().check_session().await;
//!
//!     client.auth().login("ada@example.com", "correct horse").await?;
//!
//!     let routes = RouteTable::standard();
//!     let navigation = routes.navigate("/dashboard", &client.session().snapshot());
//!
//!     println!("{navigation:?}");
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub use auth::{AuthPayload, RegisterRequest, VerificationCode};
pub use config::ClientConfig;
pub use error::*;
pub use guard::{GuardDecision, RouteRequirements};
pub use onboarding::{
    login::{LoginFlow, LoginStep},
    profile::{EmployerDraft, JobSeekerDraft, ProfileCompletion, ProfileDraft},
    signup::{RegistrationForm, SignupFlow, SignupStep},
    Transition,
};
pub use profiles::{EducationEntry, ExperienceEntry};
pub use response::ApiEnvelope;
pub use routes::{Navigation, RouteTable};
pub use scope::ViewScope;
pub use session::{Role, Session, SessionStore, User};

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::RequestBuilder;
use serde::Serialize;

pub(crate) mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod onboarding;
pub(crate) mod profiles;
pub(crate) mod response;
pub mod routes;
pub mod scope;
pub mod session;

/// Handle for the authentication endpoints.
///
/// Created with [`EmployMe::auth`]. These operations are the only ones allowed
/// to change the [`Session`].
pub struct Auth<'a> {
    pub(crate) client: &'a mut EmployMe,
}

/// Handle for the role-specific profile endpoints.
///
/// Created with [`EmployMe::profiles`].
pub struct Profiles<'a> {
    pub(crate) client: &'a EmployMe,
}

/// An Employ.me API client.
///
/// Holds the shared HTTP client (with a cookie store, so the server session
/// cookie is sent on every call), the bearer token obtained at login, and the
/// [`SessionStore`].
///
/// Clones share the cookie jar, the token and the session: logging in or out
/// through one clone is seen by all of them.
///
/// The `Debug` implementation for this struct redacts the token to prevent
/// accidental exposure in logs.
#[derive(Clone)]
pub struct EmployMe {
    pub(crate) base_url: String,
    pub(crate) token: Arc<RwLock<Option<String>>>,
    pub(crate) session: SessionStore,
    pub(crate) reqwest_client: reqwest::Client,
}

impl std::fmt::Debug for EmployMe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployMe")
            .field("base_url", &self.base_url)
            .field("token", &self.token().map(|_| "***REDACTED***"))
            .field("session", &self.session.snapshot())
            .field("reqwest_client", &"Client")
            .finish()
    }
}

impl EmployMe {
    /// Creates a new client with default timeouts.
    ///
    /// # Example
    /// ```rust
    /// let client = employme::EmployMe::new("http://localhost:5000/api");
    /// assert_eq!(client.base_url(), "http://localhost:5000/api");
    /// ```
    ///
    /// # Panics
    ///
    /// This method will panic if the provided `base_url` is not an http(s) URL,
    /// or if the HTTP client cannot be initialized. Use [`EmployMe::from_config`]
    /// to handle those cases.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let config = ClientConfig::new(base_url)
            .unwrap_or_else(|error| panic!("Invalid base_url: {error}"));

        Self::from_config(config).unwrap_or_else(|error| panic!("{error}"))
    }

    /// Creates a new client from a [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Result<Self, ConfigError> {
        let base_url = config::normalize_base_url(&config.api_base_url)?;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|error| ConfigError::HttpClient(error.to_string()))?;

        Ok(Self::new_with_client(base_url, client))
    }

    /// Creates a new client around a custom reqwest client.
    ///
    /// The caller is responsible for enabling the cookie store on `client`
    /// if the server session cookie should be kept.
    #[must_use]
    pub fn new_with_client(base_url: String, client: reqwest::Client) -> Self {
        Self {
            base_url,
            token: Arc::new(RwLock::new(None)),
            session: SessionStore::new(),
            reqwest_client: client,
        }
    }

    /// Returns the handle for the authentication endpoints.
    pub fn auth(&mut self) -> Auth<'_> {
        Auth { client: self }
    }

    /// Returns the handle for the profile endpoints.
    #[must_use]
    pub const fn profiles(&self) -> Profiles<'_> {
        Profiles { client: self }
    }

    /// Returns the session store. Clone it to share it with views.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Retrieves the current bearer token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the base URL of the API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn store_credentials(&mut self, token: String, user: User) {
        self.replace_token(Some(token));
        self.session.set_user(Some(user));
    }

    fn replace_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub(crate) fn clear_credentials(&mut self) {
        self.replace_token(None);
        self.session.set_user(None);
    }
}

impl EmployMe {
    /// Adds the bearer token to the request, if logged in.
    pub(crate) fn with_authorization_token(&self, request_builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.token() {
            request_builder.bearer_auth(token)
        } else {
            request_builder
        }
    }

    /// Creates a GET request builder expecting JSON.
    pub(crate) fn request_get(&self, endpoint: &str) -> RequestBuilder {
        let request_builder = self
            .reqwest_client
            .get(endpoint)
            .header("Accept", "application/json");

        self.with_authorization_token(request_builder)
    }

    /// Creates a POST request builder without a body.
    pub(crate) fn request_post(&self, endpoint: &str) -> RequestBuilder {
        let request_builder = self.reqwest_client.post(endpoint);
        self.with_authorization_token(request_builder)
    }

    /// Creates a POST request builder with a JSON body.
    pub(crate) fn request_post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> RequestBuilder {
        let request_builder = self.reqwest_client.post(endpoint).json(params);
        self.with_authorization_token(request_builder)
    }

    /// Creates a PUT request builder with a JSON body.
    pub(crate) fn request_put_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> RequestBuilder {
        let request_builder = self.reqwest_client.put(endpoint).json(params);
        self.with_authorization_token(request_builder)
    }
}
