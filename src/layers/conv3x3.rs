//! 3x3 convolution layer (forward pass only)
//!
//! This module provides a Conv3x3 layer that slides a bank of 3x3 filters
//! over a 2-D image and produces one output channel per filter. Strictly
//! speaking the operation is a correlation (no kernel flip), matching the
//! usual deep-learning convention.

use std::error::Error;
use std::fmt;

use ndarray::{s, Array2, Array3, ArrayView2, ArrayView3, Zip};
use rand::Rng;
use rand_distr::StandardNormal;

/// Spatial size of every kernel in the filter bank (3x3).
pub const KERNEL_SIZE: usize = 3;

/// Initial weights are standard-normal samples scaled by 1/9 to keep the
/// variance of early outputs small.
const INIT_SCALE: f32 = 1.0 / ((KERNEL_SIZE * KERNEL_SIZE) as f32);

/// Errors reported at layer construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// The layer was asked for zero filters.
    ZeroFilters,
    /// Explicit filters were supplied with a spatial size other than 3x3.
    KernelShapeMismatch { rows: usize, cols: usize },
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerError::ZeroFilters => {
                write!(f, "a convolution layer needs at least one filter")
            }
            LayerError::KernelShapeMismatch { rows, cols } => write!(
                f,
                "kernels must be {}x{}, got {}x{}",
                KERNEL_SIZE, KERNEL_SIZE, rows, cols
            ),
        }
    }
}

impl Error for LayerError {}

/// 3x3 convolution layer with a fixed bank of filters.
///
/// The filter bank is created once at construction and never mutated; the
/// only operation is [`Conv3x3::forward`], which maps a pre-padded 2-D image
/// to a 3-D tensor of per-filter responses. Because the bank is read-only,
/// a layer may be shared across threads freely.
///
/// # Example
///
/// ```
/// use mnist_conv::layers::Conv3x3;
/// use mnist_conv::utils::seeded_rng;
/// use ndarray::Array2;
///
/// let mut rng = seeded_rng(42);
/// let conv = Conv3x3::new(8, &mut rng).unwrap();
/// // 30x30 padded image -> 28x28 output, 8 channels
/// let padded = Array2::<f32>::zeros((30, 30));
/// assert_eq!(conv.forward(&padded).dim(), (28, 28, 8));
/// ```
#[derive(Debug, Clone)]
pub struct Conv3x3 {
    // [num_filters, KERNEL_SIZE, KERNEL_SIZE]
    filters: Array3<f32>,
}

impl Conv3x3 {
    /// Create a layer with `num_filters` randomly initialized 3x3 kernels.
    ///
    /// Each weight is drawn from a standard normal distribution and scaled
    /// by `1/9`. The caller supplies the random source, so construction is
    /// reproducible with a seeded RNG.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::ZeroFilters`] if `num_filters` is zero.
    pub fn new<R: Rng>(num_filters: usize, rng: &mut R) -> Result<Self, LayerError> {
        if num_filters == 0 {
            return Err(LayerError::ZeroFilters);
        }
        let filters =
            Array3::from_shape_simple_fn((num_filters, KERNEL_SIZE, KERNEL_SIZE), || {
                let sample: f32 = rng.sample(StandardNormal);
                sample * INIT_SCALE
            });
        Ok(Self { filters })
    }

    /// Create a layer from an explicit filter bank of shape `(F, 3, 3)`.
    ///
    /// Useful for tests that need fixed kernels (identity, all-zero, ...).
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::ZeroFilters`] if the bank is empty, or
    /// [`LayerError::KernelShapeMismatch`] if the kernels are not 3x3.
    pub fn from_filters(filters: Array3<f32>) -> Result<Self, LayerError> {
        let (num_filters, rows, cols) = filters.dim();
        if num_filters == 0 {
            return Err(LayerError::ZeroFilters);
        }
        if rows != KERNEL_SIZE || cols != KERNEL_SIZE {
            return Err(LayerError::KernelShapeMismatch { rows, cols });
        }
        Ok(Self { filters })
    }

    /// Get the number of filters (output channels).
    pub fn num_filters(&self) -> usize {
        self.filters.dim().0
    }

    /// Get a read-only view of the filter bank, shape `(F, 3, 3)`.
    pub fn filters(&self) -> ArrayView3<'_, f32> {
        self.filters.view()
    }

    /// Get the total number of weights in the filter bank.
    pub fn parameter_count(&self) -> usize {
        self.filters.len()
    }

    /// Enumerate every valid 3x3 window of `image` lazily, in row-major
    /// order, as `(window, row, col)` triples. Inputs smaller than the
    /// kernel yield an empty sequence.
    fn regions<'a>(
        image: ArrayView2<'a, f32>,
    ) -> impl Iterator<Item = (ArrayView2<'a, f32>, usize, usize)> {
        let (h, w) = image.dim();
        let out_h = h.saturating_sub(KERNEL_SIZE - 1);
        let out_w = w.saturating_sub(KERNEL_SIZE - 1);
        (0..out_h).flat_map(move |row| {
            (0..out_w).map(move |col| {
                let window =
                    image.slice_move(s![row..row + KERNEL_SIZE, col..col + KERNEL_SIZE]);
                (window, row, col)
            })
        })
    }

    /// Forward pass: convolve the filter bank over a pre-padded image.
    ///
    /// The input is expected to be padded already (a 28x28 digit padded to
    /// 30x30 keeps its logical size); this layer never pads. The output has
    /// shape `(H-2, W-2, F)`, one channel per filter, freshly allocated on
    /// every call. Each output cell is the element-wise product of a 3x3
    /// window with one kernel, summed.
    ///
    /// Inputs with fewer than 3 rows or columns produce an output that is
    /// empty along the short spatial dimension; this is degenerate but not
    /// an error.
    pub fn forward(&self, padded_image: &Array2<f32>) -> Array3<f32> {
        let (h, w) = padded_image.dim();
        let out_h = h.saturating_sub(KERNEL_SIZE - 1);
        let out_w = w.saturating_sub(KERNEL_SIZE - 1);
        let mut output = Array3::zeros((out_h, out_w, self.num_filters()));

        for (window, row, col) in Self::regions(padded_image.view()) {
            for (f, kernel) in self.filters.outer_iter().enumerate() {
                let response = Zip::from(&window)
                    .and(&kernel)
                    .fold(0.0f32, |acc, &x, &k| acc + x * k);
                output[[row, col, f]] = response;
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::seeded_rng;

    #[test]
    fn test_conv3x3_initialization() {
        let mut rng = seeded_rng(42);
        let conv = Conv3x3::new(8, &mut rng).unwrap();

        assert_eq!(conv.num_filters(), 8);
        assert_eq!(conv.filters().dim(), (8, 3, 3));
    }

    #[test]
    fn test_conv3x3_parameter_count() {
        let mut rng = seeded_rng(42);
        let conv = Conv3x3::new(8, &mut rng).unwrap();

        // 8 filters * 3 * 3 = 72
        assert_eq!(conv.parameter_count(), 72);
    }

    #[test]
    fn test_conv3x3_zero_filters_rejected() {
        let mut rng = seeded_rng(42);
        let err = Conv3x3::new(0, &mut rng).unwrap_err();
        assert_eq!(err, LayerError::ZeroFilters);
    }

    #[test]
    fn test_conv3x3_kernel_shape_rejected() {
        let bank = Array3::<f32>::zeros((2, 5, 5));
        let err = Conv3x3::from_filters(bank).unwrap_err();
        assert_eq!(err, LayerError::KernelShapeMismatch { rows: 5, cols: 5 });
    }

    #[test]
    fn test_conv3x3_init_scale_bounds() {
        let mut rng = seeded_rng(42);
        let conv = Conv3x3::new(16, &mut rng).unwrap();

        // Standard-normal samples scaled by 1/9 stay well inside this range
        // in practice; anything bigger signals a missing scale factor.
        for &weight in conv.filters().iter() {
            assert!(
                weight.abs() < 1.0,
                "weight {} is too large for 1/9-scaled init",
                weight
            );
        }
    }

    #[test]
    fn test_conv3x3_deterministic_initialization() {
        let mut rng1 = seeded_rng(12345);
        let conv1 = Conv3x3::new(4, &mut rng1).unwrap();

        let mut rng2 = seeded_rng(12345);
        let conv2 = Conv3x3::new(4, &mut rng2).unwrap();

        // Same seed should produce identical filter banks
        assert_eq!(conv1.filters(), conv2.filters());
    }

    #[test]
    fn test_regions_row_major_order() {
        let image = Array2::from_shape_fn((4, 5), |(i, j)| (i * 5 + j) as f32);
        let positions: Vec<(usize, usize)> = Conv3x3::regions(image.view())
            .map(|(_, row, col)| (row, col))
            .collect();

        assert_eq!(
            positions,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_regions_window_contents() {
        let image = Array2::from_shape_fn((4, 4), |(i, j)| (i * 4 + j) as f32);
        let (window, row, col) = Conv3x3::regions(image.view()).last().unwrap();

        assert_eq!((row, col), (1, 1));
        assert_eq!(window[[0, 0]], image[[1, 1]]);
        assert_eq!(window[[2, 2]], image[[3, 3]]);
    }

    #[test]
    fn test_regions_empty_for_small_input() {
        let image = Array2::<f32>::zeros((2, 2));
        assert_eq!(Conv3x3::regions(image.view()).count(), 0);
    }
}
