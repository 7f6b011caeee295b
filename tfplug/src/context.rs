//! Context implementation for request-scoped data and cancellation
//!
//! Every adapter operation receives a Context carrying cancellation,
//! an optional deadline, and request-scoped values. Values can be marked
//! sensitive, in which case their log representation is redacted.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, RwLock};
use tokio::time;

const MASKED_PLACEHOLDER: &str = "***";

/// Context carries request-scoped values, cancellation and deadlines.
/// Pass this as the first parameter to all async trait methods.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    deadline: Option<Instant>,
    values: RwLock<HashMap<String, Box<dyn Any + Send + Sync>>>,
    masked: RwLock<HashSet<String>>,
    done: watch::Receiver<bool>,
    _done_tx: watch::Sender<bool>,
}

impl Context {
    pub fn new() -> Self {
        let (done_tx, done_rx) = watch::channel(false);

        Self {
            inner: Arc::new(ContextInner {
                deadline: None,
                values: RwLock::new(HashMap::new()),
                masked: RwLock::new(HashSet::new()),
                done: done_rx,
                _done_tx: done_tx,
            }),
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        let (done_tx, done_rx) = watch::channel(false);

        let done_tx_clone = done_tx.clone();
        tokio::spawn(async move {
            time::sleep_until(deadline.into()).await;
            let _ = done_tx_clone.send(true);
        });

        Self {
            inner: Arc::new(ContextInner {
                deadline: Some(deadline),
                values: RwLock::new(HashMap::new()),
                masked: RwLock::new(HashSet::new()),
                done: done_rx,
                _done_tx: done_tx,
            }),
        }
    }

    pub async fn with_value<T: Send + Sync + 'static>(self, key: &str, value: T) -> Self {
        let mut values = self.inner.values.write().await;
        values.insert(key.to_string(), Box::new(value));
        drop(values);
        self
    }

    /// Store a value and mask it: `log_value` will never reveal it.
    pub async fn with_masked_value(self, key: &str, value: String) -> Self {
        {
            let mut values = self.inner.values.write().await;
            values.insert(key.to_string(), Box::new(value));
            let mut masked = self.inner.masked.write().await;
            masked.insert(key.to_string());
        }
        self
    }

    pub async fn get_value<T>(&self, key: &str) -> Option<T>
    where
        T: Send + Sync + Clone + 'static,
    {
        let values = self.inner.values.read().await;
        values.get(key).and_then(|v| v.downcast_ref::<T>()).cloned()
    }

    pub async fn is_masked(&self, key: &str) -> bool {
        self.inner.masked.read().await.contains(key)
    }

    /// The string form of a stored value, safe to emit in logs. Masked
    /// values come back as a placeholder.
    pub async fn log_value(&self, key: &str) -> Option<String> {
        if self.is_masked(key).await {
            let values = self.inner.values.read().await;
            return values
                .get(key)
                .map(|_| MASKED_PLACEHOLDER.to_string());
        }
        self.get_value::<String>(key).await
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.done.borrow()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Returns a channel that is closed when work done on behalf of this
    /// context should be cancelled.
    pub fn done(&self) -> watch::Receiver<bool> {
        self.inner.done.clone()
    }

    pub fn cancel(&self) {
        let _ = self.inner._done_tx.send(true);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
