//! Request cancellation

use tokio::sync::watch;

/// A token shared between a session and its caller to abort in-flight requests
///
/// Clones observe the same state. Once cancelled, a token stays cancelled.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    notify: watch::Sender<bool>,
    receiver: watch::Receiver<bool>,
}

impl CancellationToken {
    /// Create a token that is not yet cancelled
    #[must_use]
    pub fn new() -> Self {
        let (notify, receiver) = watch::channel(false);
        Self { notify, receiver }
    }

    /// Cancel every request observing this token
    pub fn cancel(&self) {
        self.notify.send_replace(true);
    }

    /// Whether the token has been cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once the token is cancelled
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        // The token owns a sender, so the channel cannot close under us.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
