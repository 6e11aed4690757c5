use serde_json::Value;
use tracing::{info, warn};

use crate::response::read_envelope;
use crate::Auth;

impl Auth<'_> {
    /// Logs out.
    ///
    /// The local token and user are cleared no matter what the server answers;
    /// a failed remote logout is only logged.
    ///
    /// # Example
    /// ```rust,ignore
    /// client.auth().logout().await;
    /// assert!(!client.session().snapshot().is_authenticated());
    /// ```
    pub async fn logout(&mut self) {
        let _loading = self.client.session.begin_loading();

        let url = self.client.endpoint("/auth/logout");
        let request = self.client.request_post(&url).send().await;

        if let Err(error) = read_envelope::<Value>(request).await {
            warn!(error = %error, "remote logout failed, clearing local session anyway");
        }

        self.client.clear_credentials();
        info!("logged out");
    }
}
