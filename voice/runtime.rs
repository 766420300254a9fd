use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::{rngs::SmallRng, SeedableRng};
use sensa_core::{random_seed, LatencyBudget, LatencyWarning, Stopwatch};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_telemetry::{LogLevel, TelemetryHandle};
use tokio::time::sleep;
use uuid::Uuid;

use crate::{
    audio::{capture_frame, extract_features},
    detector::{KeywordDetector, KeywordMatch},
};

const FRAME_PACING: Duration = Duration::from_millis(50);
const DETECTION_PACING: Duration = Duration::from_millis(20);

/// Result of processing one audio frame through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    /// Report id.
    pub id: Uuid,
    /// Frame index within the batch.
    pub index: usize,
    /// Best keyword match, when one cleared the threshold.
    pub detection: Option<KeywordMatch>,
    /// Wall-clock time for capture, extraction, and matching.
    pub elapsed: Duration,
    /// Set when the frame overran the latency budget.
    pub warning: Option<LatencyWarning>,
    /// Report timestamp.
    pub decided_at: DateTime<Utc>,
}

impl FrameReport {
    /// True when a keyword was detected.
    #[must_use]
    pub const fn detected(&self) -> bool {
        self.detection.is_some()
    }
}

/// Aggregate result of the real-time processing test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeReport {
    /// Per-frame results.
    pub frames: Vec<FrameReport>,
    /// Frames that overran the budget.
    pub latency_violations: usize,
}

/// Aggregate result of the detection accuracy test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Trials executed.
    pub trials: usize,
    /// Trials that detected a keyword.
    pub detections: usize,
    /// Per-trial results.
    pub frames: Vec<FrameReport>,
}

impl DetectionReport {
    /// Detection rate in whole percent.
    #[must_use]
    pub const fn rate_percent(&self) -> usize {
        if self.trials == 0 {
            0
        } else {
            self.detections * 100 / self.trials
        }
    }
}

/// Runtime orchestrating the keyword-spotting simulator.
pub struct VoiceRuntime {
    detector: KeywordDetector,
    budget: LatencyBudget,
    rng: Mutex<SmallRng>,
    telemetry: Option<TelemetryHandle>,
}

impl VoiceRuntime {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> VoiceRuntimeBuilder {
        VoiceRuntimeBuilder::default()
    }

    /// The detector in use.
    #[must_use]
    pub const fn detector(&self) -> &KeywordDetector {
        &self.detector
    }

    /// Runs one frame through capture, feature extraction, and matching.
    pub fn process_frame(&self, index: usize) -> FrameReport {
        let watch = Stopwatch::start();
        let detection = {
            let mut rng = self.rng.lock();
            let _frame = capture_frame(&mut *rng);
            let features = extract_features(&mut *rng);
            self.detector.best_match(&features)
        };
        let elapsed = watch.elapsed();
        let report = FrameReport {
            id: Uuid::new_v4(),
            index,
            detection,
            elapsed,
            warning: self.budget.check(elapsed),
            decided_at: Utc::now(),
        };
        if let Some(tel) = &self.telemetry {
            tel.event(
                "frame.report",
                json!({
                    "index": index,
                    "detected": report.detected(),
                    "elapsed_ms": elapsed.as_millis(),
                }),
            );
        }
        report
    }

    /// Processes a paced batch of frames against the latency budget.
    pub async fn realtime_test(&self, total_frames: usize) -> Result<RealtimeReport> {
        if let Some(tel) = &self.telemetry {
            let _ = tel.log(
                LogLevel::Info,
                "realtime.start",
                json!({ "frames": total_frames }),
            );
        }
        let mut frames = Vec::with_capacity(total_frames);
        for index in 0..total_frames {
            frames.push(self.process_frame(index));
            sleep(FRAME_PACING).await;
        }
        let latency_violations = frames.iter().filter(|f| f.warning.is_some()).count();
        Ok(RealtimeReport {
            frames,
            latency_violations,
        })
    }

    /// Repeated detection trials with cosmetic pacing.
    pub async fn detection_test(&self, trials: usize) -> Result<DetectionReport> {
        let mut frames = Vec::with_capacity(trials);
        for index in 0..trials {
            frames.push(self.process_frame(index));
            sleep(DETECTION_PACING).await;
        }
        let detections = frames.iter().filter(|f| f.detected()).count();
        let report = DetectionReport {
            trials,
            detections,
            frames,
        };
        if let Some(tel) = &self.telemetry {
            let _ = tel.log(
                LogLevel::Info,
                "detection.completed",
                json!({ "trials": trials, "detections": detections }),
            );
        }
        Ok(report)
    }

    /// Static workload characteristics shown by the demo menu.
    #[must_use]
    pub const fn workload_profile() -> [&'static str; 5] {
        [
            "Real-time processing (<100ms latency)",
            "Matrix operations for neural network inference",
            "Continuous audio stream processing",
            "Sesotho language support",
            "Compute-intensive workload",
        ]
    }
}

/// Builder for [`VoiceRuntime`].
pub struct VoiceRuntimeBuilder {
    detector: KeywordDetector,
    seed: Option<u64>,
    telemetry: Option<TelemetryHandle>,
}

impl VoiceRuntimeBuilder {
    /// Overrides the detector.
    #[must_use]
    pub fn detector(mut self, detector: KeywordDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Seeds the audio simulation for reproducible runs.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Attaches telemetry.
    #[must_use]
    pub fn telemetry(mut self, telemetry: TelemetryHandle) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Builds the runtime.
    #[must_use]
    pub fn build(self) -> VoiceRuntime {
        let seed = self.seed.unwrap_or_else(random_seed);
        VoiceRuntime {
            detector: self.detector,
            budget: LatencyBudget::audio_frame(),
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
            telemetry: self.telemetry,
        }
    }
}

impl Default for VoiceRuntimeBuilder {
    fn default() -> Self {
        Self {
            detector: KeywordDetector::standard(),
            seed: None,
            telemetry: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_telemetry::DecisionTrail;

    #[test]
    fn frame_report_carries_elapsed_time() {
        let runtime = VoiceRuntime::builder().seed(9).build();
        let report = runtime.process_frame(0);
        assert_eq!(report.index, 0);
        assert!(report.elapsed < Duration::from_millis(100));
        assert!(report.warning.is_none());
    }

    #[tokio::test]
    async fn realtime_test_reports_every_frame() {
        let trail = DecisionTrail::new(16);
        let telemetry = TelemetryHandle::builder("voice")
            .trail(trail.clone())
            .build()
            .unwrap();
        let runtime = VoiceRuntime::builder().seed(4).telemetry(telemetry).build();
        let report = runtime.realtime_test(3).await.unwrap();
        assert_eq!(report.frames.len(), 3);
        assert!(report.latency_violations <= 3);
        assert_eq!(trail.len(), 3);
    }

    #[tokio::test]
    async fn detection_rate_is_bounded() {
        let runtime = VoiceRuntime::builder().seed(6).build();
        let report = runtime.detection_test(5).await.unwrap();
        assert_eq!(report.trials, 5);
        assert!(report.detections <= 5);
        assert!(report.rate_percent() <= 100);
    }

    #[test]
    fn empty_detection_report_has_zero_rate() {
        let report = DetectionReport {
            trials: 0,
            detections: 0,
            frames: Vec::new(),
        };
        assert_eq!(report.rate_percent(), 0);
    }
}
