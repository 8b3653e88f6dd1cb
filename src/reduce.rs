//! Neighborhood reduction kernel and strategy dispatch.
//!
//! Every morphological primitive is a single pass that, for each output
//! position, reduces (min or max) the input values at `position + offset`
//! for every active structuring-element offset. Out-of-range reads are
//! excluded from the reduction, so a position whose neighborhood lies
//! entirely outside the image yields the reduction identity for the
//! element type.
//!
//! Two interchangeable strategies produce identical results:
//! - `Fast2d`: separable per-axis sliding window, used when the image is
//!   2D and the structuring element is an all-active rectangle. Rows are
//!   processed in parallel.
//! - `GenericNd`: direct offset-list reduction for any rank >= 1 and any
//!   structuring element shape.

use ndarray::{Array2, ArrayD, ArrayView2, ArrayViewD, Axis, Ix2, IxDyn, Zip};

use crate::value::GrayValue;

/// Which extremum a reduction pass keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReduceKind {
    /// Pixelwise minimum (erosion).
    Min,
    /// Pixelwise maximum (dilation).
    Max,
}

impl ReduceKind {
    /// The padding identity for this reduction over elements of type `T`:
    /// the value that can never win, queried per call and never cached.
    pub(crate) fn identity<T: GrayValue>(self) -> T {
        match self {
            ReduceKind::Min => T::MAX_VALUE,
            ReduceKind::Max => T::MIN_VALUE,
        }
    }

    pub(crate) fn opposite(self) -> ReduceKind {
        match self {
            ReduceKind::Min => ReduceKind::Max,
            ReduceKind::Max => ReduceKind::Min,
        }
    }

    fn combine<T: GrayValue>(self, a: T, b: T) -> T {
        match self {
            ReduceKind::Min => a.minimum(b),
            ReduceKind::Max => a.maximum(b),
        }
    }
}

/// How structuring-element cells map to offsets.
///
/// `Direct` anchors each axis at `floor(extent / 2)` and uses
/// `cell - anchor`; `Reflected` negates those offsets (point reflection
/// through the anchor). The composite operations run their second pass
/// reflected; for point-symmetric elements both orientations coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    Direct,
    Reflected,
}

/// Per-call reduction strategy, selected by [`plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// Separable sliding min/max over rows then columns. `row_span` and
    /// `col_span` are the inclusive offset ranges along each axis.
    Fast2d {
        row_span: (isize, isize),
        col_span: (isize, isize),
    },
    /// Direct reduction over an explicit offset list.
    GenericNd { offsets: Vec<Vec<isize>> },
}

/// Inclusive offset range covered by one axis of the structuring element.
fn axis_span(extent: usize, orientation: Orientation) -> (isize, isize) {
    let anchor = (extent / 2) as isize;
    let lo = -anchor;
    let hi = extent as isize - 1 - anchor;
    match orientation {
        Orientation::Direct => (lo, hi),
        Orientation::Reflected => (-hi, -lo),
    }
}

/// Collect the active offsets of a structuring element.
fn active_offsets(selem: &ArrayViewD<'_, bool>, orientation: Orientation) -> Vec<Vec<isize>> {
    let anchors: Vec<isize> = selem.shape().iter().map(|&m| (m / 2) as isize).collect();
    let mut offsets = Vec::new();
    for_each_index(selem.shape(), |idx| {
        if selem[idx] {
            let offset = idx
                .iter()
                .zip(&anchors)
                .map(|(&i, &c)| match orientation {
                    Orientation::Direct => i as isize - c,
                    Orientation::Reflected => c - i as isize,
                })
                .collect();
            offsets.push(offset);
        }
    });
    offsets
}

/// Pick the reduction strategy for one call.
///
/// The fast path requires a 2D image and an all-active rectangular
/// structuring element; everything else takes the generic path, which is
/// total for every rank >= 1.
pub(crate) fn plan(
    image_ndim: usize,
    selem: &ArrayViewD<'_, bool>,
    orientation: Orientation,
) -> Strategy {
    if image_ndim == 2 && selem.ndim() == 2 && selem.iter().all(|&v| v) {
        Strategy::Fast2d {
            row_span: axis_span(selem.shape()[0], orientation),
            col_span: axis_span(selem.shape()[1], orientation),
        }
    } else {
        Strategy::GenericNd {
            offsets: active_offsets(selem, orientation),
        }
    }
}

/// Run one reduction pass and return a freshly allocated result.
pub(crate) fn reduce<T: GrayValue>(
    image: &ArrayViewD<'_, T>,
    selem: &ArrayViewD<'_, bool>,
    kind: ReduceKind,
    orientation: Orientation,
) -> ArrayD<T> {
    match plan(image.ndim(), selem, orientation) {
        Strategy::Fast2d { row_span, col_span } => {
            let image2 = image
                .view()
                .into_dimensionality::<Ix2>()
                .expect("fast path planned for a 2-D image");
            let pass = sliding_pass(image2, Axis(1), col_span, kind);
            let out = sliding_pass(pass.view(), Axis(0), row_span, kind);
            out.into_dyn()
        }
        Strategy::GenericNd { offsets } => reduce_offsets(image, &offsets, kind),
    }
}

/// One separable pass: slide the inclusive `span` window along each lane
/// of `axis`, reducing with `kind`. Lanes run in parallel.
fn sliding_pass<T: GrayValue>(
    src: ArrayView2<'_, T>,
    axis: Axis,
    span: (isize, isize),
    kind: ReduceKind,
) -> Array2<T> {
    let mut out = Array2::from_elem(src.raw_dim(), kind.identity::<T>());
    Zip::from(out.lanes_mut(axis))
        .and(src.lanes(axis))
        .par_for_each(|mut dst, lane| {
            let n = lane.len() as isize;
            for i in 0..lane.len() {
                let lo = (i as isize + span.0).max(0);
                let hi = (i as isize + span.1).min(n - 1);
                let mut acc = kind.identity::<T>();
                let mut j = lo;
                while j <= hi {
                    acc = kind.combine(acc, lane[j as usize]);
                    j += 1;
                }
                dst[i] = acc;
            }
        });
    out
}

/// Reference reduction: for every output position, fold the in-range
/// neighborhood reads. O(image_size * active_cells).
fn reduce_offsets<T: GrayValue>(
    image: &ArrayViewD<'_, T>,
    offsets: &[Vec<isize>],
    kind: ReduceKind,
) -> ArrayD<T> {
    let shape = image.shape().to_vec();
    let ndim = shape.len();
    let mut out = ArrayD::from_elem(IxDyn(&shape), kind.identity::<T>());
    let mut neighbor = vec![0usize; ndim];
    for_each_index(&shape, |idx| {
        let mut acc = kind.identity::<T>();
        'offsets: for offset in offsets {
            for d in 0..ndim {
                let q = idx[d] as isize + offset[d];
                if q < 0 || q >= shape[d] as isize {
                    continue 'offsets;
                }
                neighbor[d] = q as usize;
            }
            acc = kind.combine(acc, image[&neighbor[..]]);
        }
        out[idx] = acc;
    });
    out
}

/// Replicate-pad `image` by `widths[d]` cells on both ends of axis `d`.
pub(crate) fn pad_edge<T: GrayValue>(
    image: &ArrayViewD<'_, T>,
    widths: &[usize],
) -> ArrayD<T> {
    let shape: Vec<usize> = image
        .shape()
        .iter()
        .zip(widths)
        .map(|(&s, &w)| s + 2 * w)
        .collect();
    let mut padded = ArrayD::from_elem(IxDyn(&shape), T::MIN_VALUE);
    let mut source = vec![0usize; shape.len()];
    for_each_index(&shape, |idx| {
        for d in 0..idx.len() {
            let extent = image.shape()[d];
            source[d] = idx[d]
                .saturating_sub(widths[d])
                .min(extent.saturating_sub(1));
        }
        padded[idx] = image[&source[..]];
    });
    padded
}

/// Visit every index of `shape` in row-major order. Does nothing when any
/// axis is empty.
pub(crate) fn for_each_index(shape: &[usize], mut visit: impl FnMut(&[usize])) {
    if shape.iter().any(|&s| s == 0) {
        return;
    }
    let mut idx = vec![0usize; shape.len()];
    loop {
        visit(&idx);
        let mut axis = shape.len();
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;
            idx[axis] += 1;
            if idx[axis] < shape[axis] {
                break;
            }
            idx[axis] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selem;
    use ndarray::array;

    fn noise_field(rows: usize, cols: usize) -> Array2<u8> {
        // small deterministic pseudo-random field
        let mut state = 0x2545_f491u32;
        Array2::from_shape_fn((rows, cols), |_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
    }

    #[test]
    fn test_plan_rectangle_takes_fast_path() {
        let s = selem::square(3).into_dyn();
        match plan(2, &s.view(), Orientation::Direct) {
            Strategy::Fast2d { row_span, col_span } => {
                assert_eq!(row_span, (-1, 1));
                assert_eq!(col_span, (-1, 1));
            }
            other => panic!("expected fast path, planned {other:?}"),
        }
    }

    #[test]
    fn test_plan_eccentric_rectangle_spans() {
        let s = selem::rectangle(2, 1).into_dyn();
        match plan(2, &s.view(), Orientation::Direct) {
            Strategy::Fast2d { row_span, col_span } => {
                assert_eq!(row_span, (-1, 0));
                assert_eq!(col_span, (0, 0));
            }
            other => panic!("expected fast path, planned {other:?}"),
        }
        match plan(2, &s.view(), Orientation::Reflected) {
            Strategy::Fast2d { row_span, .. } => assert_eq!(row_span, (0, 1)),
            other => panic!("expected fast path, planned {other:?}"),
        }
    }

    #[test]
    fn test_plan_diamond_takes_generic_path() {
        let s = selem::diamond(1).into_dyn();
        match plan(2, &s.view(), Orientation::Direct) {
            Strategy::GenericNd { offsets } => {
                assert_eq!(offsets.len(), 5);
                assert!(offsets.contains(&vec![0, 0]));
                assert!(offsets.contains(&vec![-1, 0]));
                assert!(!offsets.contains(&vec![-1, -1]));
            }
            other => panic!("expected generic path, planned {other:?}"),
        }
    }

    #[test]
    fn test_plan_three_dimensional_takes_generic_path() {
        let s = ArrayD::from_elem(IxDyn(&[3, 3, 3]), true);
        assert!(matches!(
            plan(3, &s.view(), Orientation::Direct),
            Strategy::GenericNd { .. }
        ));
    }

    #[test]
    fn test_reflected_offsets_are_negated() {
        let s = selem::rectangle(2, 2).into_dyn();
        let direct = active_offsets(&s.view(), Orientation::Direct);
        let reflected = active_offsets(&s.view(), Orientation::Reflected);
        for offset in &direct {
            let negated: Vec<isize> = offset.iter().map(|&o| -o).collect();
            assert!(reflected.contains(&negated));
        }
    }

    #[test]
    fn test_fast_and_generic_paths_agree() {
        let image = noise_field(11, 9);
        let dyn_image = image.view().into_dyn();
        for (nrows, ncols) in [(3, 3), (1, 3), (2, 2), (2, 1), (5, 3)] {
            let s = selem::rectangle(nrows, ncols).into_dyn();
            for kind in [ReduceKind::Min, ReduceKind::Max] {
                for orientation in [Orientation::Direct, Orientation::Reflected] {
                    let fast = reduce(&dyn_image, &s.view(), kind, orientation);
                    let offsets = active_offsets(&s.view(), orientation);
                    let generic = reduce_offsets(&dyn_image, &offsets, kind);
                    assert_eq!(
                        fast, generic,
                        "paths disagree for {nrows}x{ncols} {kind:?} {orientation:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_min_pass_keeps_border_values() {
        let image = array![[1u8, 2, 3, 2, 1]].into_dyn();
        let s = selem::rectangle(1, 3).into_dyn();
        let out = reduce(&image.view(), &s.view(), ReduceKind::Min, Orientation::Direct);
        assert_eq!(out, array![[1u8, 1, 2, 1, 1]].into_dyn());
    }

    #[test]
    fn test_out_of_range_window_yields_identity() {
        // A window strictly below the current position: the first row has
        // no in-range reads at all and must collapse to the identity.
        let image = array![[4u8, 5], [6, 7]].into_dyn();
        let offsets = vec![vec![-1isize, 0]];
        let min = reduce_offsets(&image.view(), &offsets, ReduceKind::Min);
        assert_eq!(min, array![[255u8, 255], [4, 5]].into_dyn());
        let max = reduce_offsets(&image.view(), &offsets, ReduceKind::Max);
        assert_eq!(max, array![[0u8, 0], [4, 5]].into_dyn());
    }

    #[test]
    fn test_reduce_handles_empty_images() {
        let image = Array2::<u8>::zeros((0, 4)).into_dyn();
        let s = selem::square(3).into_dyn();
        let out = reduce(&image.view(), &s.view(), ReduceKind::Min, Orientation::Direct);
        assert_eq!(out.shape(), &[0, 4]);
    }

    #[test]
    fn test_pad_edge_replicates_borders() {
        let image = array![[1u8, 2], [3, 4]].into_dyn();
        let padded = pad_edge(&image.view(), &[1, 0]);
        assert_eq!(
            padded,
            array![[1u8, 2], [1, 2], [3, 4], [3, 4]].into_dyn()
        );
    }
}
