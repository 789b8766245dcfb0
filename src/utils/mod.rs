//! Shared utilities
//!
//! This module provides common utilities used around the convolution layer:
//! random number generator construction and zero padding.

pub mod padding;
pub mod rng;

pub use padding::zero_pad;
pub use rng::{rng_from_entropy, seeded_rng};
