//! Lifetime scope for calls started by a view.
//!
//! A view (a form, a page) owns a [`ViewScope`]. Calls run through it are
//! dropped unsettled once the scope is cancelled, so a response arriving after
//! the view is gone can no longer update the session.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::ApiError;

/// Cancels its pending calls when cancelled or dropped.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    /// Creates a live scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope that is cancelled together with this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Returns a token that cancels this scope from elsewhere (e.g. a router).
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancels every pending and future call of this scope.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the scope has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drives `future` unless the scope is cancelled first.
    ///
    /// A cancelled scope never polls `future`.
    pub async fn run<F, T>(&self, future: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(ApiError::Cancelled),
            output = future => output,
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn live_scope_returns_output() {
        let scope = ViewScope::new();
        let output = scope.run(async { Ok::<_, ApiError>(7) }).await.unwrap();
        assert_eq!(output, 7);
    }

    #[tokio::test]
    async fn cancelled_scope_never_polls() {
        let scope = ViewScope::new();
        scope.cancel();

        let mut polled = false;
        let result = scope
            .run(async {
                polled = true;
                Ok::<_, ApiError>(())
            })
            .await;

        assert!(matches!(result, Err(ApiError::Cancelled)));
        assert!(!polled);
    }

    #[tokio::test]
    async fn dropping_parent_cancels_child() {
        let parent = ViewScope::new();
        let child = parent.child();
        drop(parent);
        assert!(child.is_cancelled());
    }

    #[tokio::test]
    async fn pending_call_is_dropped_on_cancel() {
        let scope = ViewScope::new();
        let token = scope.cancellation_token();

        let pending = scope.run(std::future::pending::<Result<(), ApiError>>());
        token.cancel();

        assert!(matches!(pending.await, Err(ApiError::Cancelled)));
    }
}
