//! View models for the two screens.
//!
//! Each view owns its state outright. The only asynchronous step is the fetch
//! started at mount, which runs in its own task and hands its result back
//! over a oneshot channel. A view dropped before the fetch settles simply
//! closes the channel and the result is thrown away.

pub mod detail;
pub mod listing;

use crate::errors::SourceError;
use std::future::Future;
use tokio::sync::oneshot::{self, error::TryRecvError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    NotFound,
}

/// A fetch running on behalf of a view.
#[derive(Debug)]
pub(crate) struct PendingFetch<T> {
    rx: oneshot::Receiver<Result<T, SourceError>>,
}

impl<T: Send + 'static> PendingFetch<T> {
    pub(crate) fn spawn<F>(what: &'static str, fetch: F) -> Self
    where
        F: Future<Output = Result<T, SourceError>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = fetch.await;
            if tx.send(result).is_err() {
                tracing::debug!(view = what, "View gone before fetch resolved, result discarded");
            }
        });
        Self { rx }
    }

    pub(crate) async fn wait(self) -> Result<T, SourceError> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(fetch_vanished()),
        }
    }

    /// `None` while the fetch is still running.
    pub(crate) fn try_take(&mut self) -> Option<Result<T, SourceError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(fetch_vanished())),
        }
    }
}

// The fetch task panicked or was cancelled by runtime shutdown.
fn fetch_vanished() -> SourceError {
    SourceError::BackendError(anyhow::anyhow!("fetch task ended without reporting a result"))
}
