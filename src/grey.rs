//! Deprecated alias module for [`crate::gray`].
//!
//! Kept for callers of the historical module path. Every function
//! forwards to the identically named entry point in [`crate::gray`] and
//! logs a single deprecation notice per process; no kernel logic lives
//! here.

use std::sync::Once;

use ndarray::{Array, ArrayView, ArrayViewMut, Dimension};

use crate::error::MorphologyError;
use crate::value::GrayValue;

static DEPRECATION_NOTICE: Once = Once::new();

fn warn_deprecated() {
    DEPRECATION_NOTICE.call_once(|| {
        log::warn!("the `grey` module is deprecated; use `gray` instead");
    });
}

/// Deprecated alias for [`crate::gray::erosion`].
#[deprecated(since = "0.2.0", note = "use `gray::erosion` instead")]
pub fn erosion<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    warn_deprecated();
    crate::gray::erosion(image, selem, out)
}

/// Deprecated alias for [`crate::gray::dilation`].
#[deprecated(since = "0.2.0", note = "use `gray::dilation` instead")]
pub fn dilation<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    warn_deprecated();
    crate::gray::dilation(image, selem, out)
}

/// Deprecated alias for [`crate::gray::opening`].
#[deprecated(since = "0.2.0", note = "use `gray::opening` instead")]
pub fn opening<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    warn_deprecated();
    crate::gray::opening(image, selem, out)
}

/// Deprecated alias for [`crate::gray::closing`].
#[deprecated(since = "0.2.0", note = "use `gray::closing` instead")]
pub fn closing<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    warn_deprecated();
    crate::gray::closing(image, selem, out)
}

/// Deprecated alias for [`crate::gray::white_tophat`].
#[deprecated(since = "0.2.0", note = "use `gray::white_tophat` instead")]
pub fn white_tophat<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    warn_deprecated();
    crate::gray::white_tophat(image, selem, out)
}

/// Deprecated alias for [`crate::gray::black_tophat`].
#[deprecated(since = "0.2.0", note = "use `gray::black_tophat` instead")]
pub fn black_tophat<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    warn_deprecated();
    crate::gray::black_tophat(image, selem, out)
}
