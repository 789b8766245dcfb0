//! Layer implementations
//!
//! This module provides the convolution layer used by the MNIST demo.
//! There is no backward pass and no layer composition here; the layer exposes
//! a single forward operation over a pre-padded image.

pub mod conv3x3;

// Re-export the layer and its error type for convenience
pub use conv3x3::{Conv3x3, LayerError, KERNEL_SIZE};
