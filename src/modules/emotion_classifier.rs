use serde::{Deserialize, Serialize};
use crate::config::config::EmotionClassifierConfig;
use crate::modules::metrics_extractor::FaceMetrics;

/// Discrete emotional states reported to rendering consumers. `Annoyed` is
/// part of the published contract and may appear in consumer matches even
/// though the current rule set never emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmotionState {
    Idle,
    Sleep,
    Neutral,
    Happy,
    Angry,
    Surprised,
    Curious,
    Wink,
    Annoyed,
}

#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    sleep_threshold_ms: u64,
    eyes_closed_threshold: f32,
    eyes_wide_threshold: f32,
    eyes_relaxed_threshold: f32,
    wink_delta_threshold: f32,
    mouth_open_threshold: f32,
    mouth_tight_threshold: f32,
    brow_angry_threshold: f32,
    brow_raised_threshold: f32,
    yaw_threshold: f32,
    pitch_threshold: f32,
    last_face_seen_at_ms: u64,
}

impl EmotionClassifier {

    /// new initializes new instance of the emotion classifier module.
    ///
    /// # Arguments
    /// * `in_config` - optional threshold overrides
    /// * `now_ms` - caller clock in milliseconds, seeds the last-face-seen
    ///   timestamp
    pub fn new(in_config: Option<EmotionClassifierConfig>, now_ms: u64) -> Self {
        let config = in_config.unwrap_or_else(EmotionClassifierConfig::new);
        EmotionClassifier {
            sleep_threshold_ms: config.sleep_threshold_ms,
            eyes_closed_threshold: config.eyes_closed_threshold,
            eyes_wide_threshold: config.eyes_wide_threshold,
            eyes_relaxed_threshold: config.eyes_relaxed_threshold,
            wink_delta_threshold: config.wink_delta_threshold,
            mouth_open_threshold: config.mouth_open_threshold,
            mouth_tight_threshold: config.mouth_tight_threshold,
            brow_angry_threshold: config.brow_angry_threshold,
            brow_raised_threshold: config.brow_raised_threshold,
            yaw_threshold: config.yaw_threshold,
            pitch_threshold: config.pitch_threshold,
            last_face_seen_at_ms: now_ms,
        }
    }

    /// classify maps one frame's feature vector to an emotional state.
    ///
    /// Rules are evaluated in a fixed precedence order and the first match
    /// wins. The only state read and written across calls is the timestamp
    /// of the last frame that carried a confirmed face.
    ///
    /// # Arguments
    /// * `metrics` - the frame's feature vector
    /// * `now_ms` - caller clock in milliseconds
    ///
    /// # Returns
    /// * `EmotionState`
    pub fn classify(&mut self, metrics: &FaceMetrics, now_ms: u64) -> EmotionState {
        if !metrics.is_face_detected {
            let elapsed = now_ms.saturating_sub(self.last_face_seen_at_ms);
            if elapsed > self.sleep_threshold_ms {
                return EmotionState::Sleep;
            }
            return EmotionState::Idle;
        }

        self.last_face_seen_at_ms = now_ms;

        let avg_eye_openness = metrics.avg_eye_openness();
        let is_mouth_open = metrics.mouth_openness > self.mouth_open_threshold;
        let are_eyes_closed = avg_eye_openness < self.eyes_closed_threshold;
        let are_eyes_wide = avg_eye_openness > self.eyes_wide_threshold;
        let are_eyes_relaxed = avg_eye_openness < self.eyes_relaxed_threshold;

        if are_eyes_closed {
            return EmotionState::Sleep;
        }
        // One eye markedly more closed than the other.
        if (metrics.left_eye_openness - metrics.right_eye_openness).abs()
            > self.wink_delta_threshold
        {
            return EmotionState::Wink;
        }
        if is_mouth_open && are_eyes_wide {
            return EmotionState::Surprised;
        }
        if metrics.is_smiling || (is_mouth_open && are_eyes_relaxed) {
            return EmotionState::Happy;
        }
        if metrics.eyebrow_vertical_pos > self.brow_angry_threshold
            && metrics.mouth_openness < self.mouth_tight_threshold
        {
            return EmotionState::Angry;
        }
        // A turned or tilted head, or strongly raised brows.
        if metrics.head_yaw.abs() > self.yaw_threshold
            || metrics.head_pitch.abs() > self.pitch_threshold
            || metrics.eyebrow_vertical_pos < self.brow_raised_threshold
        {
            return EmotionState::Curious;
        }
        EmotionState::Neutral
    }

    pub fn last_face_seen_at_ms(&self) -> u64 {
        self.last_face_seen_at_ms
    }
}
