use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

use super::backend::{CaptureConstraints, CaptureDevice, CaptureStream};
use crate::error::CaptureError;

/// Owns the session's single capture stream
///
/// Acquisition is attempted exactly once; there is no automatic retry.
/// Consumers borrow the stream per call through [`CaptureManager::stream`].
pub struct CaptureManager {
    constraints: CaptureConstraints,
    stream: RwLock<Option<Arc<dyn CaptureStream>>>,
    attempted: AtomicBool,
}

impl CaptureManager {
    pub fn new(constraints: CaptureConstraints) -> Self {
        Self {
            constraints,
            stream: RwLock::new(None),
            attempted: AtomicBool::new(false),
        }
    }

    pub fn constraints(&self) -> &CaptureConstraints {
        &self.constraints
    }

    /// Acquire the stream from `device`
    ///
    /// A second call fails without touching the device.
    pub async fn acquire(
        &self,
        device: &dyn CaptureDevice,
    ) -> Result<Arc<dyn CaptureStream>, CaptureError> {
        if self.attempted.swap(true, Ordering::SeqCst) {
            warn!("Capture acquisition already attempted");
            return Err(CaptureError::Device {
                reason: "capture acquisition already attempted".to_string(),
            });
        }

        info!(
            "Acquiring capture stream from {} ({}x{}, audio={})",
            device.name(),
            self.constraints.width,
            self.constraints.height,
            self.constraints.audio
        );

        let stream = device.acquire(&self.constraints).await?;

        {
            let mut slot = self.stream.write().unwrap_or_else(PoisonError::into_inner);
            *slot = Some(Arc::clone(&stream));
        }

        info!("Capture stream ready: {}", stream.label());

        Ok(stream)
    }

    /// Current live stream, if one was acquired and not yet released
    pub fn stream(&self) -> Option<Arc<dyn CaptureStream>> {
        let slot = self.stream.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().filter(|s| s.is_live()).cloned()
    }

    pub fn has_stream(&self) -> bool {
        self.stream().is_some()
    }

    /// Release the device and drop the handle (idempotent)
    pub fn release(&self) {
        let taken = {
            let mut slot = self.stream.write().unwrap_or_else(PoisonError::into_inner);
            slot.take()
        };

        if let Some(stream) = taken {
            stream.release();
            info!("Capture stream released: {}", stream.label());
        }
    }
}
