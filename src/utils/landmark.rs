use crate::error::PipelineResult;
use crate::utils::coordinate::Coordinate2D;

/// Number of points in the face mesh topology produced by the landmark
/// detector. Index constants in the extractor assume this exact topology.
pub const MESH_LANDMARK_COUNT: usize = 468;

/// landmark_set_from_json deserializes a recorded landmark frame into an
/// ordered landmark set.
///
/// # Arguments
/// * `raw` - JSON array of `{"x": .., "y": ..}` objects in topology order
///
/// # Returns
/// * `PipelineResult<Vec<Coordinate2D>>`
pub fn landmark_set_from_json(raw: &str) -> PipelineResult<Vec<Coordinate2D>> {
    let landmarks: Vec<Coordinate2D> = serde_json::from_str(raw)?;
    Ok(landmarks)
}

#[cfg(test)]
mod tests {
    use crate::error::EmotionPipelineError;
    use crate::utils::landmark::landmark_set_from_json;

    #[test]
    fn test_landmark_set_from_json() {
        let raw = r#"[{"x":0.1128,"y":0.38426},{"x":0.29285,"y":0.66956},{"x":0.71146,"y":0.74503}]"#;
        let landmarks = landmark_set_from_json(raw).unwrap();
        assert_eq!(landmarks.len(), 3);
        assert!((landmarks[1].x - 0.29285).abs() < 1e-6);
        assert!((landmarks[2].y - 0.74503).abs() < 1e-6);
    }

    #[test]
    fn test_landmark_set_from_json_malformed() {
        let result = landmark_set_from_json("not a landmark frame");
        assert!(matches!(
            result,
            Err(EmotionPipelineError::MalformedFrame(_))
        ));
    }
}
