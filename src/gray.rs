//! Grayscale morphological operations: erosion, dilation, opening,
//! closing, and the white/black tophat transforms.
//!
//! All operations work on N-dimensional arrays (N >= 1) of any
//! [`GrayValue`] element type and accept an optional boolean structuring
//! element plus an optional pre-allocated output buffer.
//!
//! ## Boundary convention
//!
//! Neighborhood reads that fall outside the image are excluded from the
//! reduction: a border pixel is reduced over the in-range part of its
//! neighborhood only, and a pixel with no in-range reads at all receives
//! the reduction identity for the element type (the maximum representable
//! value for erosion, the minimum for dilation). Erosion and dilation
//! share one window anchoring (`floor(extent / 2)` per axis), which keeps
//! the complement duality `erosion(I) == MAX - dilation(MAX - I)` exact
//! for every structuring element, including even-sized ones.
//!
//! Opening and closing run their second pass over the point-reflected
//! window, and for structuring elements with an even-sized axis they
//! replicate-pad the image beforehand and crop afterwards, so that
//! single-pixel extrema survive a round trip exactly.

use std::sync::Once;

use ndarray::{
    Array, ArrayD, ArrayView, ArrayViewD, ArrayViewMut, CowArray, Dimension, IxDyn, Slice, Zip,
};

use crate::error::MorphologyError;
use crate::reduce::{self, Orientation, ReduceKind};
use crate::selem;
use crate::value::GrayValue;

// ============================================================================
// Primitive operations
// ============================================================================

/// Morphological erosion: pixelwise minimum over the neighborhood.
///
/// Shrinks bright regions and grows dark regions.
///
/// # Arguments
/// * `image` - N-dimensional input array
/// * `selem` - Structuring element; defaults to the radius-1 cross of the
///   image's rank when `None`
/// * `out` - Optional pre-allocated output buffer of the same shape (may
///   be a non-contiguous view); filled in addition to the returned array
///
/// # Returns
/// The eroded array, same shape and element type as the input
pub fn erosion<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    validate(&image, &out)?;
    let footprint = resolve_selem(image.ndim(), selem)?;
    let result = primitive(&image, &footprint.view(), ReduceKind::Min);
    Ok(write_out(result, out))
}

/// Morphological dilation: pixelwise maximum over the neighborhood.
///
/// Grows bright regions and shrinks dark regions. Uses the same window
/// anchoring as [`erosion`] (the structuring element is not reflected),
/// so the two operations are exact complements of each other.
///
/// # Arguments
/// * `image` - N-dimensional input array
/// * `selem` - Structuring element; defaults to the radius-1 cross of the
///   image's rank when `None`
/// * `out` - Optional pre-allocated output buffer of the same shape (may
///   be a non-contiguous view); filled in addition to the returned array
///
/// # Returns
/// The dilated array, same shape and element type as the input
pub fn dilation<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    validate(&image, &out)?;
    let footprint = resolve_selem(image.ndim(), selem)?;
    let result = primitive(&image, &footprint.view(), ReduceKind::Max);
    Ok(write_out(result, out))
}

// ============================================================================
// Composite operations
// ============================================================================

/// Morphological opening: erosion followed by dilation.
///
/// Removes bright features smaller than the structuring element while
/// preserving larger structures.
pub fn opening<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    validate(&image, &out)?;
    let footprint = resolve_selem(image.ndim(), selem)?;
    let result = composite(&image, &footprint.view(), ReduceKind::Min);
    Ok(write_out(result, out))
}

/// Morphological closing: dilation followed by erosion.
///
/// Removes dark features and holes smaller than the structuring element.
pub fn closing<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    validate(&image, &out)?;
    let footprint = resolve_selem(image.ndim(), selem)?;
    let result = composite(&image, &footprint.view(), ReduceKind::Max);
    Ok(write_out(result, out))
}

/// White tophat: `image - opening(image)`, highlighting bright features
/// smaller than the structuring element.
///
/// The subtraction saturates at the element type's lower bound, so
/// unsigned results clamp at zero instead of wrapping.
pub fn white_tophat<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    validate(&image, &out)?;
    let footprint = resolve_selem(image.ndim(), selem)?;
    if T::IS_BINARY {
        warn_binary_tophat();
    }
    let opened = composite(&image, &footprint.view(), ReduceKind::Min);
    let mut result = image.to_owned();
    Zip::from(&mut result)
        .and(&opened)
        .for_each(|r, &o| *r = r.saturating_subtract(o));
    Ok(write_out(result, out))
}

/// Black tophat: `closing(image) - image`, highlighting dark features
/// smaller than the structuring element.
///
/// The subtraction saturates at the element type's lower bound, so
/// unsigned results clamp at zero instead of wrapping.
pub fn black_tophat<T, D>(
    image: ArrayView<'_, T, D>,
    selem: Option<ArrayView<'_, bool, D>>,
    out: Option<ArrayViewMut<'_, T, D>>,
) -> Result<Array<T, D>, MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    validate(&image, &out)?;
    let footprint = resolve_selem(image.ndim(), selem)?;
    if T::IS_BINARY {
        warn_binary_tophat();
    }
    let mut result = composite(&image, &footprint.view(), ReduceKind::Max);
    Zip::from(&mut result)
        .and(image.view())
        .for_each(|r, &i| *r = r.saturating_subtract(i));
    Ok(write_out(result, out))
}

// ============================================================================
// Shared plumbing
// ============================================================================

/// Fail fast on inputs the kernels cannot accept. Runs before any
/// reduction so an error never leaves partial output behind.
fn validate<T, D>(
    image: &ArrayView<'_, T, D>,
    out: &Option<ArrayViewMut<'_, T, D>>,
) -> Result<(), MorphologyError>
where
    T: GrayValue,
    D: Dimension,
{
    if image.ndim() == 0 {
        return Err(MorphologyError::ZeroDimensional);
    }
    if let Some(o) = out {
        if o.shape() != image.shape() {
            return Err(MorphologyError::ShapeMismatch {
                expected: image.shape().to_vec(),
                actual: o.shape().to_vec(),
            });
        }
    }
    Ok(())
}

/// Use the given structuring element or fall back to the radius-1 cross
/// of the image's rank.
fn resolve_selem<'a, D>(
    ndim: usize,
    selem: Option<ArrayView<'a, bool, D>>,
) -> Result<CowArray<'a, bool, IxDyn>, MorphologyError>
where
    D: Dimension,
{
    let footprint: CowArray<'a, bool, IxDyn> = match selem {
        Some(s) => s.into_dyn().into(),
        None => selem::cross(ndim).into(),
    };
    if footprint.ndim() != ndim {
        return Err(MorphologyError::DimensionMismatch {
            image: ndim,
            selem: footprint.ndim(),
        });
    }
    if !footprint.iter().any(|&v| v) {
        return Err(MorphologyError::EmptyStructuringElement);
    }
    Ok(footprint)
}

/// One reduction pass over the direct window.
fn primitive<T, D>(
    image: &ArrayView<'_, T, D>,
    footprint: &ArrayViewD<'_, bool>,
    kind: ReduceKind,
) -> Array<T, D>
where
    T: GrayValue,
    D: Dimension,
{
    let result = reduce::reduce(
        &image.view().into_dyn(),
        footprint,
        kind,
        Orientation::Direct,
    );
    into_rank(result)
}

/// Two reduction passes: `kind` over the direct window, then its opposite
/// over the reflected window. Even-extent axes replicate-pad first and
/// crop afterwards so eccentric elements do not shift or clip content.
fn composite<T, D>(
    image: &ArrayView<'_, T, D>,
    footprint: &ArrayViewD<'_, bool>,
    kind: ReduceKind,
) -> Array<T, D>
where
    T: GrayValue,
    D: Dimension,
{
    let image_dyn = image.view().into_dyn();
    let pads: Vec<usize> = footprint
        .shape()
        .iter()
        .map(|&m| if m > 0 && m % 2 == 0 { m - 1 } else { 0 })
        .collect();
    let padded = pads.iter().any(|&w| w > 0) && !image.is_empty();

    let stage = if padded {
        let work = reduce::pad_edge(&image_dyn, &pads);
        reduce::reduce(&work.view(), footprint, kind, Orientation::Direct)
    } else {
        reduce::reduce(&image_dyn, footprint, kind, Orientation::Direct)
    };
    let full = reduce::reduce(
        &stage.view(),
        footprint,
        kind.opposite(),
        Orientation::Reflected,
    );

    let result = if padded {
        full.slice_each_axis(|ax| {
            let w = pads[ax.axis.index()] as isize;
            Slice::from(w..ax.len as isize - w)
        })
        .to_owned()
    } else {
        full
    };
    into_rank(result)
}

/// Fill the caller's buffer (if any) and hand the result back.
///
/// The result is always computed into fresh storage first, so a caller
/// buffer that aliases the input, or addresses a strided sub-view, can
/// never corrupt the reduction; positions outside the addressed view keep
/// their prior contents.
fn write_out<T, D>(result: Array<T, D>, out: Option<ArrayViewMut<'_, T, D>>) -> Array<T, D>
where
    T: GrayValue,
    D: Dimension,
{
    if let Some(mut o) = out {
        o.assign(&result);
    }
    result
}

fn into_rank<T, D: Dimension>(result: ArrayD<T>) -> Array<T, D> {
    result
        .into_dimensionality::<D>()
        .expect("reduction preserves the input rank")
}

static BINARY_TOPHAT_NOTICE: Once = Once::new();

fn warn_binary_tophat() {
    BINARY_TOPHAT_NOTICE.call_once(|| {
        log::warn!(
            "tophat on a boolean image is computed through its 0/1 grayscale \
             view; borders follow the unsigned convention"
        );
    });
}
