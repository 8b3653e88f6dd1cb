//! Error types for morphological operations.

use thiserror::Error;

/// Errors surfaced by the morphology entry points.
///
/// All conditions are detected before the reduction pass starts, so a
/// returned error guarantees no partial output was written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MorphologyError {
    /// A caller-supplied output buffer does not match the input shape.
    #[error("output buffer shape {actual:?} does not match image shape {expected:?}")]
    ShapeMismatch {
        /// Shape of the input image.
        expected: Vec<usize>,
        /// Shape of the supplied output buffer.
        actual: Vec<usize>,
    },

    /// The structuring element has no active (true) cells.
    #[error("structuring element has no active cells")]
    EmptyStructuringElement,

    /// The image has rank zero; morphology needs at least one axis.
    #[error("zero-dimensional images are not supported")]
    ZeroDimensional,

    /// The structuring element rank differs from the image rank.
    #[error("structuring element rank {selem} does not match image rank {image}")]
    DimensionMismatch {
        /// Rank of the input image.
        image: usize,
        /// Rank of the structuring element.
        selem: usize,
    },
}
