//! Zero padding for 2-D images.
//!
//! The convolution layer itself never pads; callers that want the output to
//! keep the logical image size pad the input first (one pixel per side for
//! a 3x3 kernel).

use ndarray::{s, Array2};

/// Surround `image` with `pad` rows/columns of zeros on every side.
///
/// A `(H, W)` input becomes `(H + 2*pad, W + 2*pad)`; the original pixels
/// occupy the interior. `pad = 0` returns an unpadded copy.
pub fn zero_pad(image: &Array2<f32>, pad: usize) -> Array2<f32> {
    let (h, w) = image.dim();
    let mut padded = Array2::zeros((h + 2 * pad, w + 2 * pad));
    padded.slice_mut(s![pad..pad + h, pad..pad + w]).assign(image);
    padded
}
