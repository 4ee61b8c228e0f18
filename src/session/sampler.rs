use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::emotion::{EmotionDisplay, EmotionSample};
use crate::capture::CaptureManager;
use crate::service::InterviewService;

/// Best-effort periodic emotion sampling
///
/// Each tick snapshots the live stream and submits the frame for inference
/// in its own task, so a slow tick never delays the next one. Results land
/// in a single display slot; whichever response resolves last wins.
pub struct EmotionSampler {
    period: Duration,
    capture: Arc<CaptureManager>,
    service: Arc<dyn InterviewService>,
    display: Arc<Mutex<Option<EmotionDisplay>>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl EmotionSampler {
    pub fn new(
        period: Duration,
        capture: Arc<CaptureManager>,
        service: Arc<dyn InterviewService>,
    ) -> Self {
        Self {
            period,
            capture,
            service,
            display: Arc::new(Mutex::new(None)),
            ticker: Mutex::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Begin ticking every `period` (first tick one period from now)
    pub fn start(&self) {
        let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
        if ticker.is_some() {
            warn!("Emotion sampler already running");
            return;
        }

        let period = self.period;
        let capture = Arc::clone(&self.capture);
        let service = Arc::clone(&self.service);
        let display = Arc::clone(&self.display);

        *ticker = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                tokio::spawn(Self::tick(
                    Arc::clone(&capture),
                    Arc::clone(&service),
                    Arc::clone(&display),
                ));
            }
        }));

        info!("Emotion sampler started ({:?} period)", period);
    }

    /// Stop scheduling future ticks
    ///
    /// Ticks already in flight are left to finish. Safe to call when the
    /// sampler never started.
    pub fn stop(&self) {
        let handle = {
            let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
            ticker.take()
        };

        if let Some(handle) = handle {
            handle.abort();
            info!("Emotion sampler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        let ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
        ticker.is_some()
    }

    /// Latest emotion shown, if any sample has succeeded
    pub fn display(&self) -> Option<EmotionDisplay> {
        let display = self.display.lock().unwrap_or_else(PoisonError::into_inner);
        display.clone()
    }

    async fn tick(
        capture: Arc<CaptureManager>,
        service: Arc<dyn InterviewService>,
        display: Arc<Mutex<Option<EmotionDisplay>>>,
    ) {
        let Some(stream) = capture.stream() else {
            return;
        };

        let frame = match stream.snapshot().await {
            Ok(frame) => frame,
            Err(e) => {
                debug!("Emotion sample skipped: {}", e);
                return;
            }
        };
        drop(stream);

        match service.analyze_emotion(&frame.to_data_url()).await {
            Ok(reading) => {
                let sample = EmotionSample::from(reading);
                debug!(
                    "Emotion sample: {} ({:.1})",
                    sample.label, sample.confidence
                );
                let mut slot = display.lock().unwrap_or_else(PoisonError::into_inner);
                *slot = Some(EmotionDisplay::from(&sample));
            }
            Err(e) => {
                debug!("Emotion analysis failed: {}", e);
            }
        }
    }
}

impl Drop for EmotionSampler {
    fn drop(&mut self) {
        self.stop();
    }
}
