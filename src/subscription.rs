//! Reactive read queries.
//!
//! A [`Subscription`] re-runs its query whenever the watched table's version
//! moves and publishes the full result to the holder. The first result is sent
//! right after subscribing. Only the newest unread result is kept: writes that
//! land before the holder reads again are delivered as one result reflecting
//! all of them.

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::db::StoreError;

/// Cancellable handle to a running query. Dropping it stops the query task.
#[derive(Debug)]
pub struct Subscription<T> {
  rx: watch::Receiver<Option<T>>,
  task: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> Subscription<T> {
  pub(crate) fn spawn<F, Fut>(name: &'static str, mut changes: watch::Receiver<u64>, query: F) -> Self
  where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
  {
    let (tx, rx) = watch::channel(None);

    let task = tokio::spawn(async move {
      tracing::debug!(query = name, "Subscription started");
      loop {
        // Mark the current version seen before reading so a write racing the
        // query still triggers another pass
        changes.borrow_and_update();

        match query().await {
          Ok(result) => {
            // Replaces any result the holder has not read yet
            if tx.send(Some(result)).is_err() {
              break;
            }
          }
          Err(e) => {
            tracing::warn!(query = name, error = %e, "Subscription query failed, waiting for next change");
          }
        }

        if changes.changed().await.is_err() {
          break;
        }
      }
      tracing::debug!(query = name, "Subscription stopped");
    });

    Self { rx, task }
  }

  /// Wait for the newest unread result. `None` once the subscription has ended.
  pub async fn next(&mut self) -> Option<T> {
    self.rx.changed().await.ok()?;
    let result = self.rx.borrow_and_update().clone();
    result
  }

  /// Newest unread result, without waiting.
  pub fn latest(&mut self) -> Option<T> {
    match self.rx.has_changed() {
      Ok(true) => self.rx.borrow_and_update().clone(),
      _ => None,
    }
  }

  pub fn unsubscribe(self) {
    drop(self);
  }
}

impl<T> Drop for Subscription<T> {
  fn drop(&mut self) {
    self.task.abort();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  #[tokio::test]
  async fn test_emits_on_subscribe_and_after_change() {
    let (tx, rx) = watch::channel(0u64);
    let counter = Arc::new(AtomicUsize::new(0));

    let calls = counter.clone();
    let mut sub = Subscription::spawn("counter", rx, move || {
      let calls = calls.clone();
      async move { Ok(calls.fetch_add(1, Ordering::SeqCst)) }
    });

    assert_eq!(sub.next().await, Some(0));

    tx.send_modify(|v| *v += 1);
    assert_eq!(sub.next().await, Some(1));
  }

  #[tokio::test]
  async fn test_unread_results_collapse_to_latest() {
    let (tx, rx) = watch::channel(0u64);
    let counter = Arc::new(AtomicUsize::new(0));

    let calls = counter.clone();
    let mut sub = Subscription::spawn("counter", rx, move || {
      let calls = calls.clone();
      async move { Ok(calls.fetch_add(1, Ordering::SeqCst)) }
    });

    assert_eq!(sub.next().await, Some(0));

    for _ in 0..50 {
      tx.send_modify(|v| *v += 1);
    }

    assert_eq!(sub.next().await, Some(1));
    assert_eq!(sub.latest(), None);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn test_ends_when_change_source_is_dropped() {
    let (tx, rx) = watch::channel(0u64);
    let mut sub = Subscription::spawn("static", rx, || async { Ok(7) });

    assert_eq!(sub.next().await, Some(7));
    drop(tx);
    assert_eq!(sub.next().await, None);
  }

  #[tokio::test]
  async fn test_query_error_keeps_subscription_alive() {
    let (tx, rx) = watch::channel(0u64);
    let counter = Arc::new(AtomicUsize::new(0));

    let calls = counter.clone();
    let mut sub = Subscription::spawn("flaky", rx, move || {
      let calls = calls.clone();
      async move {
        match calls.fetch_add(1, Ordering::SeqCst) {
          0 => Err(StoreError::Database(sqlx::Error::RowNotFound)),
          n => Ok(n),
        }
      }
    });

    // Let the failed first pass finish before the next write
    while counter.load(Ordering::SeqCst) == 0 {
      tokio::task::yield_now().await;
    }

    tx.send_modify(|v| *v += 1);
    assert_eq!(sub.next().await, Some(1));
  }
}
