//! Per-call deadlines and cancellation.

use crate::error::{AdminError, TransportError};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

type CancelSignal = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Deadline and cancellation signal for one call.
///
/// ```rust,no_run
/// # async fn demo(client: &radosgw_admin::AdminClient) -> radosgw_admin::Result<()> {
/// use radosgw_admin::RequestContext;
/// use std::time::Duration;
///
/// let user = RequestContext::new()
///     .with_timeout(Duration::from_secs(5))
///     .run(client.users().info("alice"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct RequestContext {
    timeout: Option<Duration>,
    cancel: Option<CancelSignal>,
}

impl RequestContext {
    /// A context with no deadline and no cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`TransportError::Timeout`] if the call takes longer than
    /// `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Abort with [`TransportError::Cancelled`] when `signal` completes.
    pub fn with_cancel<F>(mut self, signal: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel = Some(Box::pin(signal));
        self
    }

    /// The configured deadline.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Drive `operation` under this context. The operation future is dropped,
    /// and its request aborted, as soon as the deadline or signal fires.
    pub async fn run<T, F>(self, operation: F) -> Result<T, AdminError>
    where
        F: Future<Output = Result<T, AdminError>>,
    {
        let RequestContext { timeout, cancel } = self;

        let timed = async move {
            match timeout {
                Some(duration) => match tokio::time::timeout(duration, operation).await {
                    Ok(result) => result,
                    Err(_) => Err(TransportError::Timeout { duration }.into()),
                },
                None => operation.await,
            }
        };

        match cancel {
            Some(signal) => {
                tokio::select! {
                    result = timed => result,
                    _ = signal => Err(TransportError::Cancelled.into()),
                }
            }
            None => timed.await,
        }
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("timeout", &self.timeout)
            .field("has_cancel", &self.cancel.is_some())
            .finish()
    }
}
