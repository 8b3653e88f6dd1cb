//! Grayscale morphology for N-dimensional arrays
//!
//! Erosion, dilation, opening, closing and the white/black tophat
//! transforms over `ndarray` arrays of any rank >= 1, with Python
//! bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Array Format
//!
//! Operations accept any integer, float or boolean element type and any
//! dimensionality:
//! - **1D**: signals / scan lines
//! - **2D**: grayscale images (the common case, with a fast path)
//! - **3D and up**: volumes, handled by the generic reduction path
//!
//! The structuring element is a boolean array of the same rank as the
//! image; when omitted, the radius-1 cross (minimal connectivity shape)
//! of the matching rank is used. Results always have the input's shape
//! and element type.
//!
//! ## Architecture
//!
//! - **Per-call dispatch** - 2D images with rectangular structuring
//!   elements take a separable row-parallel fast path; everything else
//!   takes the generic N-dimensional reduction. Both produce identical
//!   results.
//! - **Explicit boundary policy** - out-of-range neighborhood reads are
//!   excluded; padding identities are derived from the element type per
//!   call (see [`value::GrayValue`]).
//! - **Aliasing-safe outputs** - results are computed into fresh storage
//!   and then copied into the caller's buffer, which may be any strided
//!   view of matching shape.

pub mod error;
pub mod gray;
pub mod grey;
pub mod selem;
pub mod value;

mod reduce;

pub use error::MorphologyError;
pub use gray::{black_tophat, closing, dilation, erosion, opening, white_tophat};
pub use value::GrayValue;

#[cfg(feature = "wasm")]
pub mod wasm;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::MorphologyError;
    use crate::gray;

    fn to_py_err(err: MorphologyError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Erosion / Dilation
    // ========================================================================

    /// Morphological erosion of a 2D u8 image.
    ///
    /// `selem` is an optional 2D bool array; the radius-1 diamond is used
    /// when omitted.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn erosion<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::erosion(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Morphological erosion of a 2D f32 image.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn erosion_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f32>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::erosion(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Morphological dilation of a 2D u8 image.
    ///
    /// `selem` is an optional 2D bool array; the radius-1 diamond is used
    /// when omitted.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn dilation<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::dilation(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Morphological dilation of a 2D f32 image.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn dilation_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f32>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::dilation(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Opening / Closing
    // ========================================================================

    /// Morphological opening (erosion then dilation) of a 2D u8 image.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn opening<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::opening(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Morphological opening (erosion then dilation) of a 2D f32 image.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn opening_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f32>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::opening(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Morphological closing (dilation then erosion) of a 2D u8 image.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn closing<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::closing(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Morphological closing (dilation then erosion) of a 2D f32 image.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn closing_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f32>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::closing(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Tophats
    // ========================================================================

    /// White tophat (image minus opening, saturating) of a 2D u8 image.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn white_tophat<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::white_tophat(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// White tophat (image minus opening) of a 2D f32 image.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn white_tophat_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f32>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::white_tophat(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Black tophat (closing minus image, saturating) of a 2D u8 image.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn black_tophat<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::black_tophat(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Black tophat (closing minus image) of a 2D f32 image.
    #[pyfunction]
    #[pyo3(signature = (image, selem=None))]
    pub fn black_tophat_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f32>,
        selem: Option<PyReadonlyArray2<'py, bool>>,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let selem_view = selem.as_ref().map(|s| s.as_array());
        let result = gray::black_tophat(image.as_array(), selem_view, None).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    #[pymodule]
    pub fn graymorph(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(erosion, m)?)?;
        m.add_function(wrap_pyfunction!(erosion_f32, m)?)?;
        m.add_function(wrap_pyfunction!(dilation, m)?)?;
        m.add_function(wrap_pyfunction!(dilation_f32, m)?)?;
        m.add_function(wrap_pyfunction!(opening, m)?)?;
        m.add_function(wrap_pyfunction!(opening_f32, m)?)?;
        m.add_function(wrap_pyfunction!(closing, m)?)?;
        m.add_function(wrap_pyfunction!(closing_f32, m)?)?;
        m.add_function(wrap_pyfunction!(white_tophat, m)?)?;
        m.add_function(wrap_pyfunction!(white_tophat_f32, m)?)?;
        m.add_function(wrap_pyfunction!(black_tophat, m)?)?;
        m.add_function(wrap_pyfunction!(black_tophat_f32, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::graymorph;
