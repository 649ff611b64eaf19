//! View activation and the states a view settles into.
//!
//! Each time a view is activated the [`Navigator`] hands out a fresh
//! [`ActivationToken`] and cancels the previous one. A load only commits its
//! result while its token is live, so a response that arrives after the user
//! moved on is dropped instead of overwriting the newer view.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{log_fetch_failure, Error};

#[derive(Debug, Clone, Default)]
pub struct ActivationToken {
    cancelled: Arc<AtomicBool>,
}

impl ActivationToken {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct Navigator {
    current: Option<ActivationToken>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a new view, invalidating whatever was loading before.
    pub fn activate(&mut self) -> ActivationToken {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
        let token = ActivationToken::default();
        self.current = Some(token.clone());
        token
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    /// Not found or failed to fetch; rendered identically.
    Absent,
}

/// Await `load` and turn its outcome into a [`ViewState`].
///
/// Returns `None` when `token` was cancelled while the load was in flight.
/// Failures are logged under `context` and become [`ViewState::Absent`].
pub async fn settle<T, F>(token: &ActivationToken, context: &str, load: F) -> Option<ViewState<T>>
where
    F: Future<Output = Result<T, Error>>,
{
    let outcome = load.await;

    if token.is_cancelled() {
        log::debug!("Dropping stale {context} response");
        return None;
    }

    Some(match outcome {
        Ok(value) => ViewState::Ready(value),
        Err(err) => {
            log_fetch_failure(context, &err);
            ViewState::Absent
        }
    })
}
