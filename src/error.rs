use thiserror::Error;

pub type PipelineResult<T> = Result<T, EmotionPipelineError>;

#[derive(Debug, Error)]
pub enum EmotionPipelineError {
    /// The caller supplied a non-empty landmark set that does not cover the
    /// face mesh topology the extractor indexes into.
    #[error("landmark set has {got} points, the face mesh topology requires {required}")]
    InsufficientLandmarks { required: usize, got: usize },

    #[error("malformed landmark frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}
