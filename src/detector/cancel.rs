use crate::error::{Result, SaliencyError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared between a caller and running pipelines.
///
/// The detector checks it before calling the segmentation engine and before
/// extraction; a stage that is already running is not interrupted.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn check(token: Option<&CancelToken>) -> Result<()> {
        match token {
            Some(t) if t.is_cancelled() => Err(SaliencyError::Cancelled),
            _ => Ok(()),
        }
    }
}
