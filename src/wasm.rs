//! WebAssembly exports for graymorph operations.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images
//! travel as flat row-major u8 buffers with explicit dimensions; every
//! operation uses the default radius-1 diamond neighborhood.

use ndarray::Array2;
use wasm_bindgen::prelude::*;

use crate::gray;

fn to_image(data: &[u8], width: usize, height: usize) -> Array2<u8> {
    Array2::from_shape_vec((height, width), data.to_vec()).expect("Invalid dimensions")
}

/// Morphological erosion of a grayscale image.
///
/// # Arguments
/// * `data` - Flat array of gray bytes (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of eroded gray bytes
#[wasm_bindgen]
pub fn erosion_wasm(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let input = to_image(data, width, height);
    let result = gray::erosion(input.view(), None, None).expect("default erosion cannot fail");
    result.into_raw_vec_and_offset().0
}

/// Morphological dilation of a grayscale image.
///
/// # Arguments
/// * `data` - Flat array of gray bytes (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of dilated gray bytes
#[wasm_bindgen]
pub fn dilation_wasm(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let input = to_image(data, width, height);
    let result = gray::dilation(input.view(), None, None).expect("default dilation cannot fail");
    result.into_raw_vec_and_offset().0
}

/// Morphological opening (erosion then dilation) of a grayscale image.
#[wasm_bindgen]
pub fn opening_wasm(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let input = to_image(data, width, height);
    let result = gray::opening(input.view(), None, None).expect("default opening cannot fail");
    result.into_raw_vec_and_offset().0
}

/// Morphological closing (dilation then erosion) of a grayscale image.
#[wasm_bindgen]
pub fn closing_wasm(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let input = to_image(data, width, height);
    let result = gray::closing(input.view(), None, None).expect("default closing cannot fail");
    result.into_raw_vec_and_offset().0
}

/// White tophat (image minus opening, saturating) of a grayscale image.
#[wasm_bindgen]
pub fn white_tophat_wasm(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let input = to_image(data, width, height);
    let result =
        gray::white_tophat(input.view(), None, None).expect("default white tophat cannot fail");
    result.into_raw_vec_and_offset().0
}

/// Black tophat (closing minus image, saturating) of a grayscale image.
#[wasm_bindgen]
pub fn black_tophat_wasm(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let input = to_image(data, width, height);
    let result =
        gray::black_tophat(input.view(), None, None).expect("default black tophat cannot fail");
    result.into_raw_vec_and_offset().0
}
