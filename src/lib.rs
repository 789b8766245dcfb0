//! MNIST 3x3 Convolution Library
//!
//! This library provides the forward pass of a 3x3 convolution layer together
//! with the small utilities needed to run it over an MNIST digit.
//!
//! # Modules
//!
//! - `layers`: the `Conv3x3` layer (filter bank + forward pass)
//! - `utils`: shared utilities (seedable RNG construction, zero padding)
//! - `config`: demo configuration loaded from JSON

pub mod config;
pub mod layers;
pub mod utils;
