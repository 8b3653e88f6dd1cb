//! Structuring element (neighborhood mask) generators.
//!
//! A structuring element is a boolean array whose true cells define the
//! neighborhood a morphological operation reduces over. Its anchor sits at
//! the geometric middle, `floor(extent / 2)` along each axis.
//!
//! The 2D generators mirror the classic shape set: `square`, `rectangle`,
//! `diamond`, `disk` and `star`. `cross` produces the minimal-connectivity
//! default for any rank and is what the operations in [`crate::gray`] use
//! when no explicit structuring element is given.

use ndarray::{Array2, ArrayD, Dimension, IxDyn};

/// Generate a square of active cells.
///
/// # Arguments
/// * `width` - Side length in cells
pub fn square(width: usize) -> Array2<bool> {
    rectangle(width, width)
}

/// Generate a full rectangle of active cells.
///
/// # Arguments
/// * `nrows` - Number of rows
/// * `ncols` - Number of columns
pub fn rectangle(nrows: usize, ncols: usize) -> Array2<bool> {
    Array2::from_elem((nrows, ncols), true)
}

/// Generate a diamond: all cells within L1 (taxicab) distance `radius`
/// of the center of a `(2 * radius + 1)` square.
pub fn diamond(radius: usize) -> Array2<bool> {
    let n = 2 * radius + 1;
    let r = radius as isize;
    Array2::from_shape_fn((n, n), |(i, j)| {
        (i as isize - r).abs() + (j as isize - r).abs() <= r
    })
}

/// Generate a disk: all cells within Euclidean distance `radius` of the
/// center of a `(2 * radius + 1)` square.
pub fn disk(radius: usize) -> Array2<bool> {
    let n = 2 * radius + 1;
    let r = radius as isize;
    Array2::from_shape_fn((n, n), |(i, j)| {
        let di = i as isize - r;
        let dj = j as isize - r;
        di * di + dj * dj <= r * r
    })
}

/// Generate an eight-vertex star: the union of a centered upright square
/// with side `2 * a + 1` and the centered diamond spanning the full grid.
///
/// `star(1)` degenerates to a 3x3 square.
pub fn star(a: usize) -> Array2<bool> {
    if a <= 1 {
        return square(3);
    }
    let m = 2 * a + 1;
    let margin = a / 2;
    let size = m + 2 * margin;
    let center = ((size - 1) / 2) as isize;
    Array2::from_shape_fn((size, size), |(i, j)| {
        let in_square =
            i >= margin && i < m + margin && j >= margin && j < m + margin;
        let l1 = (i as isize - center).abs() + (j as isize - center).abs();
        in_square || l1 <= center
    })
}

/// Generate the radius-1 cross of the given rank: the center cell plus its
/// `2 * ndim` direct (face-connected) neighbors in a `3^ndim` grid.
///
/// For rank 1 this is `[true, true, true]`; for rank 2 the classic
/// radius-1 diamond.
pub fn cross(ndim: usize) -> ArrayD<bool> {
    ArrayD::from_shape_fn(IxDyn(&vec![3; ndim]), |ix| {
        let l1: usize = ix.slice().iter().map(|&i| i.abs_diff(1)).sum();
        l1 <= 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_square_is_all_active() {
        let s = square(4);
        assert_eq!(s.dim(), (4, 4));
        assert!(s.iter().all(|&v| v));
    }

    #[test]
    fn test_rectangle_shape() {
        assert_eq!(rectangle(2, 1).dim(), (2, 1));
        assert_eq!(rectangle(1, 2).dim(), (1, 2));
        assert!(rectangle(2, 5).iter().all(|&v| v));
    }

    #[test]
    fn test_diamond_radius_one_is_cross() {
        let expected = array![
            [false, true, false],
            [true, true, true],
            [false, true, false]
        ];
        assert_eq!(diamond(1), expected);
    }

    #[test]
    fn test_disk_radius_one_matches_diamond() {
        assert_eq!(disk(1), diamond(1));
    }

    #[test]
    fn test_disk_corners_inactive() {
        let d = disk(2);
        assert_eq!(d.dim(), (5, 5));
        assert!(d[[2, 2]]);
        assert!(d[[0, 2]]);
        assert!(!d[[0, 0]]);
        assert!(!d[[4, 4]]);
    }

    #[test]
    fn test_star_one_is_full_square() {
        let s = star(1);
        assert_eq!(s.dim(), (3, 3));
        assert!(s.iter().all(|&v| v));
    }

    #[test]
    fn test_star_is_symmetric_with_inactive_corners() {
        let s = star(2);
        let (h, w) = s.dim();
        assert_eq!(h, w);
        assert!(s[[h / 2, w / 2]]);
        assert!(!s[[0, 0]]);
        for i in 0..h {
            for j in 0..w {
                assert_eq!(s[[i, j]], s[[h - 1 - i, w - 1 - j]]);
            }
        }
    }

    #[test]
    fn test_cross_rank_one() {
        let c = cross(1);
        assert_eq!(c.shape(), &[3]);
        assert!(c.iter().all(|&v| v));
    }

    #[test]
    fn test_cross_rank_two_equals_diamond() {
        assert_eq!(cross(2).into_dimensionality::<ndarray::Ix2>().unwrap(), diamond(1));
    }

    #[test]
    fn test_cross_rank_three_active_count() {
        // center + 6 face neighbors
        let c = cross(3);
        assert_eq!(c.shape(), &[3, 3, 3]);
        assert_eq!(c.iter().filter(|&&v| v).count(), 7);
        let center = [1usize, 1, 1];
        let edge = [0usize, 0, 1];
        assert!(c[&center[..]]);
        assert!(!c[&edge[..]]);
    }
}
