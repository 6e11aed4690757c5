use tracing::{debug, warn};

use super::CurrentUser;
use crate::response::read_data;
use crate::{Auth, User};

impl Auth<'_> {
    /// Re-fetches the current user, e.g. to pick up `has_profile` after the
    /// profile was created.
    ///
    /// Errors are logged and swallowed; the session keeps its previous user.
    ///
    /// # Example
    /// ```rust,ignore
    /// client.profiles().create_employer(&draft).await?;
    /// client.auth().refresh_user().await;
    /// ```
    pub async fn refresh_user(&mut self) -> Option<User> {
        let url = self.client.endpoint("/auth/me");
        debug!(endpoint = %url, "refreshing user");

        let request = self.client.request_get(&url).send().await;

        match read_data::<CurrentUser>(request).await {
            Ok(CurrentUser { user }) => {
                self.client.session.set_user(Some(user.clone()));
                Some(user)
            }
            Err(error) => {
                warn!(error = %error, "failed to refresh user");
                None
            }
        }
    }
}
