use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsExtractorConfig {
    pub min_denominator: f32,
    pub smile_mar_threshold: f32,
    pub surprised_mar_threshold: f32,
    pub surprised_ear_threshold: f32,
}

impl MetricsExtractorConfig {
    pub(crate) fn new() -> Self {
        MetricsExtractorConfig {
            min_denominator: 1e-6,
            smile_mar_threshold: 0.1,
            surprised_mar_threshold: 0.4,
            surprised_ear_threshold: 0.35,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionClassifierConfig {
    pub sleep_threshold_ms: u64,
    pub idle_threshold_ms: u64,
    pub eyes_closed_threshold: f32,
    pub eyes_wide_threshold: f32,
    pub eyes_relaxed_threshold: f32,
    pub wink_delta_threshold: f32,
    pub mouth_open_threshold: f32,
    pub mouth_tight_threshold: f32,
    pub brow_angry_threshold: f32,
    pub brow_raised_threshold: f32,
    pub yaw_threshold: f32,
    pub pitch_threshold: f32,
}

impl EmotionClassifierConfig {
    pub(crate) fn new() -> Self {
        EmotionClassifierConfig {
            sleep_threshold_ms: 10000,
            idle_threshold_ms: 2000,
            eyes_closed_threshold: 0.12,
            eyes_wide_threshold: 0.38,
            eyes_relaxed_threshold: 0.25,
            wink_delta_threshold: 0.25,
            mouth_open_threshold: 0.35,
            mouth_tight_threshold: 0.2,
            brow_angry_threshold: -0.025,
            brow_raised_threshold: -0.065,
            yaw_threshold: 12.0,
            pitch_threshold: 8.0,
        }
    }
}
