use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatternError>;

/// Failures of the pattern engine: grid algebra, generators, the layer
/// compositor and the raster codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("invalid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("format error: {reason}")]
    Format { reason: String },

    #[error("truncated data: expected {expected} bytes, found {found}")]
    TruncatedData { expected: usize, found: usize },

    #[error("layer index {index} out of range (have {len} layers)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl PatternError {
    pub(crate) fn mismatch(left: (usize, usize), right: (usize, usize)) -> Self {
        PatternError::DimensionMismatch {
            left_width: left.0,
            left_height: left.1,
            right_width: right.0,
            right_height: right.1,
        }
    }

    pub(crate) fn invalid_parameter(reason: impl Into<String>) -> Self {
        PatternError::InvalidParameter {
            reason: reason.into(),
        }
    }

    pub(crate) fn format(reason: impl Into<String>) -> Self {
        PatternError::Format {
            reason: reason.into(),
        }
    }
}
