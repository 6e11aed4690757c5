use tracing::{debug, info, warn};

use super::CurrentUser;
use crate::error::ApiError;
use crate::response::read_data;
use crate::{Auth, User};

impl Auth<'_> {
    /// Rehydrates the session from the server session cookie.
    ///
    /// Called once at startup. On success the user is stored; on any failure
    /// (network error, expired session, ...) the session is left without a user.
    /// Never fails, and always clears the loading flag before returning.
    ///
    /// # Example
    /// ```rust,ignore
    /// let mut client = EmployMe::new("http://localhost:5000/api");
    ///
    /// match client.auth().check_session().await {
    ///     Some(user) => println!("Welcome back, {}", user.first_name),
    ///     None => println!("Not logged in"),
    /// }
    /// ```
    pub async fn check_session(&mut self) -> Option<User> {
        let _loading = self.client.session.begin_loading();

        let url = self.client.endpoint("/auth/me");
        debug!(endpoint = %url, "checking session");

        let request = self.client.request_get(&url).send().await;

        match read_data::<CurrentUser>(request).await {
            Ok(CurrentUser { user }) => {
                info!(user_id = %user.id, role = %user.role, "session restored");
                self.client.session.set_user(Some(user.clone()));
                Some(user)
            }
            Err(error) => {
                if matches!(error, ApiError::Unauthorized(_)) {
                    debug!("no active session");
                } else {
                    warn!(error = %error, "failed to restore session");
                }
                self.client.session.set_user(None);
                None
            }
        }
    }
}
