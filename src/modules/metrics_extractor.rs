use serde::{Deserialize, Serialize};
use crate::config::config::MetricsExtractorConfig;
use crate::error::{EmotionPipelineError, PipelineResult};
use crate::utils::coordinate::Coordinate2D;
use crate::utils::landmark::MESH_LANDMARK_COUNT;

// Face mesh topology indices. These must match the fixed 468-point
// topology of the landmark detector exactly.
const LEFT_EYE_RING: [usize; 6] = [33, 160, 158, 133, 153, 144];
const RIGHT_EYE_RING: [usize; 6] = [362, 385, 387, 263, 373, 380];
const MOUTH_LEFT_CORNER: usize = 78;
const MOUTH_RIGHT_CORNER: usize = 308;
const MOUTH_TOP: usize = 13;
const MOUTH_BOTTOM: usize = 14;
const LEFT_BROW: usize = 105;
const LEFT_EYE_TOP: usize = 159;
const RIGHT_BROW: usize = 334;
const RIGHT_EYE_TOP: usize = 386;
const NOSE_TIP: usize = 1;
const LEFT_EYE_INNER: usize = 133;
const RIGHT_EYE_INNER: usize = 362;
const FOREHEAD: usize = 10;
const CHIN: usize = 152;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceMetrics {
    pub is_face_detected: bool,
    pub left_eye_openness: f32,
    pub right_eye_openness: f32,
    pub mouth_openness: f32,
    pub eyebrow_vertical_pos: f32, // relative to the eye top, negative above
    pub head_yaw: f32,             // left/right
    pub head_pitch: f32,           // up/down
    pub head_roll: f32,            // tilt
    pub is_smiling: bool,
    pub is_surprised: bool,
}

impl FaceMetrics {
    pub fn avg_eye_openness(&self) -> f32 {
        (self.left_eye_openness + self.right_eye_openness) / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct MetricsExtractor {
    min_denominator: f32,
    smile_mar_threshold: f32,
    surprised_mar_threshold: f32,
    surprised_ear_threshold: f32,
}

impl MetricsExtractor {

    /// new initializes new instance of the metrics extractor module.
    pub fn new(in_config: Option<MetricsExtractorConfig>) -> Self {
        let config = in_config.unwrap_or_else(MetricsExtractorConfig::new);
        MetricsExtractor {
            min_denominator: config.min_denominator,
            smile_mar_threshold: config.smile_mar_threshold,
            surprised_mar_threshold: config.surprised_mar_threshold,
            surprised_ear_threshold: config.surprised_ear_threshold,
        }
    }

    /// extract converts one frame's landmark set into its geometric
    /// feature vector.
    ///
    /// An empty landmark set is the detector's "no face this frame" signal
    /// and yields the default metrics with `is_face_detected` unset. A
    /// non-empty set must cover the full mesh topology.
    ///
    /// # Arguments
    /// * `landmarks` - ordered landmark set in normalized image coordinates
    ///
    /// # Returns
    /// * `PipelineResult<FaceMetrics>`
    pub fn extract(&self, landmarks: &[Coordinate2D]) -> PipelineResult<FaceMetrics> {
        if landmarks.is_empty() {
            return Ok(FaceMetrics::default());
        }
        if landmarks.len() < MESH_LANDMARK_COUNT {
            return Err(EmotionPipelineError::InsufficientLandmarks {
                required: MESH_LANDMARK_COUNT,
                got: landmarks.len(),
            });
        }

        let left_ear = self.eye_aspect_ratio(landmarks, &LEFT_EYE_RING);
        let right_ear = self.eye_aspect_ratio(landmarks, &RIGHT_EYE_RING);
        let mouth_mar = self.mouth_aspect_ratio(landmarks);

        let left_brow_pos = landmarks[LEFT_BROW].y - landmarks[LEFT_EYE_TOP].y;
        let right_brow_pos = landmarks[RIGHT_BROW].y - landmarks[RIGHT_EYE_TOP].y;
        let avg_brow_pos = (left_brow_pos + right_brow_pos) / 2.0;

        let nose = landmarks[NOSE_TIP];
        let left_eye_inner = landmarks[LEFT_EYE_INNER];
        let right_eye_inner = landmarks[RIGHT_EYE_INNER];

        let d_left = nose.dist(&left_eye_inner);
        let d_right = nose.dist(&right_eye_inner);
        let yaw = self.safe_ratio(d_right - d_left, d_right + d_left) * 100.0;

        let d_top = nose.dist(&landmarks[FOREHEAD]);
        let d_bottom = nose.dist(&landmarks[CHIN]);
        let pitch = self.safe_ratio(d_bottom - d_top, d_bottom + d_top) * 100.0;

        let roll = (right_eye_inner.y - left_eye_inner.y)
            .atan2(right_eye_inner.x - left_eye_inner.x)
            .to_degrees();

        Ok(FaceMetrics {
            is_face_detected: true,
            left_eye_openness: left_ear,
            right_eye_openness: right_ear,
            mouth_openness: mouth_mar,
            eyebrow_vertical_pos: avg_brow_pos,
            head_yaw: yaw,
            head_pitch: pitch,
            head_roll: roll,
            is_smiling: mouth_mar > self.smile_mar_threshold
                && landmarks[MOUTH_RIGHT_CORNER].y < landmarks[MOUTH_BOTTOM].y,
            is_surprised: mouth_mar > self.surprised_mar_threshold
                && left_ear > self.surprised_ear_threshold,
        })
    }

    /// eye_aspect_ratio computes the six-point EAR for one eye ring:
    /// (dist(p2,p6) + dist(p3,p5)) / (2 * dist(p1,p4)).
    fn eye_aspect_ratio(&self, landmarks: &[Coordinate2D], ring: &[usize; 6]) -> f32 {
        let vertical = landmarks[ring[1]].dist(&landmarks[ring[5]])
            + landmarks[ring[2]].dist(&landmarks[ring[4]]);
        let horizontal = landmarks[ring[0]].dist(&landmarks[ring[3]]);
        self.safe_ratio(vertical, 2.0 * horizontal)
    }

    fn mouth_aspect_ratio(&self, landmarks: &[Coordinate2D]) -> f32 {
        let vertical = landmarks[MOUTH_TOP].dist(&landmarks[MOUTH_BOTTOM]);
        let horizontal = landmarks[MOUTH_LEFT_CORNER].dist(&landmarks[MOUTH_RIGHT_CORNER]);
        self.safe_ratio(vertical, horizontal)
    }

    // A denominator below min_denominator means the landmark geometry is
    // degenerate; the ratio reads as 0 rather than an error.
    fn safe_ratio(&self, numerator: f32, denominator: f32) -> f32 {
        if denominator.abs() < self.min_denominator {
            return 0.0;
        }
        numerator / denominator
    }
}
