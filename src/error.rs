//! Error type shared by every pipeline stage.
//!
//! Stages validate only their own direct inputs. Failures raised by the
//! segmentation engine are carried through as [`SaliencyError::Segmentation`]
//! without interpretation.
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SaliencyError {
    /// A buffer does not hold exactly `width * height` entries.
    #[error("buffer holds {actual} entries, expected {expected} (width * height)")]
    InvalidDimensions { expected: usize, actual: usize },

    /// The labeling contains no segments at all.
    #[error("segmentation produced no labels")]
    EmptySegmentation,

    /// A pixel carries a label outside `[0, numlabels)`.
    #[error("label {label} is outside the declared range [0, {numlabels})")]
    LabelOutOfRange { label: u32, numlabels: usize },

    #[error("invalid smoothing kernel: {0}")]
    InvalidKernel(String),

    /// Failure reported by the external segmentation engine.
    #[error("segmentation engine failed: {0}")]
    Segmentation(String),

    #[error("processing was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, SaliencyError>;

/// Check that a buffer of `actual` entries covers a `w × h` image.
#[inline]
pub(crate) fn check_len(w: usize, h: usize, actual: usize) -> Result<()> {
    let expected = w * h;
    if expected == actual {
        Ok(())
    } else {
        Err(SaliencyError::InvalidDimensions { expected, actual })
    }
}
