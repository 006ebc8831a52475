use anyhow::Error;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::config::{EmotionClassifierConfig, MetricsExtractorConfig};
use crate::modules::emotion_classifier::{EmotionClassifier, EmotionState};
use crate::modules::metrics_extractor::{FaceMetrics, MetricsExtractor};
use crate::utils::coordinate::Coordinate2D;

/// Per-frame output snapshot forwarded to rendering consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    pub metrics: FaceMetrics,
    pub emotion: EmotionState,
}

#[derive(Debug, Clone)]
pub struct EmotionPipeline {
    extractor: MetricsExtractor,
    classifier: EmotionClassifier,
}

impl EmotionPipeline {

    /// new initializes new instance of the pipeline with default thresholds.
    ///
    /// # Arguments
    /// * `now_ms` - caller clock in milliseconds, seeds the classifier's
    ///   last-face-seen timestamp
    pub fn new(now_ms: u64) -> Self {
        EmotionPipeline {
            extractor: MetricsExtractor::new(None),
            classifier: EmotionClassifier::new(None, now_ms),
        }
    }

    /// with_config initializes a pipeline from explicit component configs.
    pub fn with_config(
        extractor_config: MetricsExtractorConfig,
        classifier_config: EmotionClassifierConfig,
        now_ms: u64,
    ) -> Self {
        EmotionPipeline {
            extractor: MetricsExtractor::new(Some(extractor_config)),
            classifier: EmotionClassifier::new(Some(classifier_config), now_ms),
        }
    }

    /// process_frame converts one frame's landmark set into the
    /// `(FaceMetrics, EmotionState)` snapshot handed to consumers.
    ///
    /// `None` is the detector's "no face this frame" signal. Frames may
    /// arrive at any spacing; the only cross-frame memory is the
    /// classifier's last-face-seen timestamp.
    ///
    /// # Arguments
    /// * `landmarks` - zero or one ordered landmark set for the frame
    /// * `now_ms` - caller clock in milliseconds
    ///
    /// # Returns
    /// * `Result<FrameAnalysis, Error>`
    pub fn process_frame(
        &mut self,
        landmarks: Option<&[Coordinate2D]>,
        now_ms: u64,
    ) -> Result<FrameAnalysis, Error> {
        let metrics = match landmarks {
            None => FaceMetrics::default(),
            Some(landmark_set) => self.extractor.extract(landmark_set)?,
        };
        let emotion = self.classifier.classify(&metrics, now_ms);

        debug!(
            ?emotion,
            face_detected = metrics.is_face_detected,
            "classified frame"
        );

        Ok(FrameAnalysis { metrics, emotion })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::EmotionPipelineError;
    use crate::modules::emotion_classifier::EmotionState;
    use crate::pipeline::pipeline::EmotionPipeline;
    use crate::utils::coordinate::Coordinate2D;
    use crate::utils::landmark::MESH_LANDMARK_COUNT;

    // Forward-facing face with both eyes at EAR 0.30, mouth nearly closed
    // and brows slightly above the eyes; classifies as Neutral.
    fn neutral_mesh() -> Vec<Coordinate2D> {
        let mut landmarks = vec![Coordinate2D::default(); MESH_LANDMARK_COUNT];

        // Left eye ring 33/160/158/133/153/144, right ring 362/385/387/263/373/380.
        for (ring, x_a, x_b) in [
            ([33usize, 160, 158, 133, 153, 144], 0.30f32, 0.40f32),
            ([362, 385, 387, 263, 373, 380], 0.60, 0.70),
        ] {
            let h = 0.30 * (x_b - x_a) / 2.0;
            landmarks[ring[0]] = Coordinate2D::new(x_a, 0.50);
            landmarks[ring[3]] = Coordinate2D::new(x_b, 0.50);
            landmarks[ring[1]] = Coordinate2D::new(x_a + 0.03, 0.50 - h);
            landmarks[ring[5]] = Coordinate2D::new(x_a + 0.03, 0.50 + h);
            landmarks[ring[2]] = Coordinate2D::new(x_a + 0.07, 0.50 - h);
            landmarks[ring[4]] = Coordinate2D::new(x_a + 0.07, 0.50 + h);
        }

        // Mouth corners 78/308, lips 13/14.
        landmarks[78] = Coordinate2D::new(0.40, 0.75);
        landmarks[308] = Coordinate2D::new(0.60, 0.75);
        landmarks[13] = Coordinate2D::new(0.50, 0.745);
        landmarks[14] = Coordinate2D::new(0.50, 0.755);

        // Brows 105/334 above eye tops 159/386.
        landmarks[159] = Coordinate2D::new(0.35, 0.48);
        landmarks[386] = Coordinate2D::new(0.65, 0.48);
        landmarks[105] = Coordinate2D::new(0.35, 0.44);
        landmarks[334] = Coordinate2D::new(0.65, 0.44);

        // Nose 1, forehead 10, chin 152.
        landmarks[1] = Coordinate2D::new(0.50, 0.55);
        landmarks[10] = Coordinate2D::new(0.50, 0.20);
        landmarks[152] = Coordinate2D::new(0.50, 0.90);

        landmarks
    }

    #[test]
    fn test_process_frame_without_face() {
        let mut pipeline = EmotionPipeline::new(0);
        let analysis = pipeline.process_frame(None, 500).unwrap();
        assert!(!analysis.metrics.is_face_detected);
        assert_eq!(analysis.emotion, EmotionState::Idle);
    }

    #[test]
    fn test_process_frame_with_face() {
        let mut pipeline = EmotionPipeline::new(0);
        let landmarks = neutral_mesh();
        let analysis = pipeline.process_frame(Some(&landmarks), 500).unwrap();
        assert!(analysis.metrics.is_face_detected);
        assert!((analysis.metrics.avg_eye_openness() - 0.30).abs() < 1e-4);
        assert_eq!(analysis.emotion, EmotionState::Neutral);
    }

    #[test]
    fn test_process_frame_truncated_landmark_set() {
        let mut pipeline = EmotionPipeline::new(0);
        let landmarks = vec![Coordinate2D::default(); 12];
        let err = pipeline.process_frame(Some(&landmarks), 500).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EmotionPipelineError>(),
            Some(EmotionPipelineError::InsufficientLandmarks { got: 12, .. })
        ));
    }

    #[test]
    fn test_face_then_long_absence_goes_to_sleep() {
        let mut pipeline = EmotionPipeline::new(0);
        let landmarks = neutral_mesh();
        pipeline.process_frame(Some(&landmarks), 1_000).unwrap();

        let idle = pipeline.process_frame(None, 9_000).unwrap();
        assert_eq!(idle.emotion, EmotionState::Idle);

        let asleep = pipeline.process_frame(None, 12_000).unwrap();
        assert_eq!(asleep.emotion, EmotionState::Sleep);
    }

    #[test]
    fn test_with_config_overrides_thresholds() {
        let mut classifier_config = crate::config::config::EmotionClassifierConfig::new();
        classifier_config.sleep_threshold_ms = 1_000;
        let mut pipeline = EmotionPipeline::with_config(
            crate::config::config::MetricsExtractorConfig::new(),
            classifier_config,
            0,
        );
        let analysis = pipeline.process_frame(None, 2_000).unwrap();
        assert_eq!(analysis.emotion, EmotionState::Sleep);
    }

    #[test]
    fn test_frame_analysis_serializes() {
        let mut pipeline = EmotionPipeline::new(0);
        let analysis = pipeline.process_frame(None, 100).unwrap();
        let raw = serde_json::to_string(&analysis).unwrap();
        assert!(raw.contains("\"emotion\":\"Idle\""));
    }
}
