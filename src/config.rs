//! Configuration for the MNIST demo binary
//!
//! This module parses the demo configuration from a JSON file: how many
//! filters to create, the RNG seed, how much zero padding to apply, and
//! where the MNIST image file lives.

use serde::Deserialize;
use std::error::Error;
use std::fs;

/// Demo configuration parsed from a JSON file.
///
/// # Example
///
/// ```json
/// {
///   "num_filters": 8,
///   "seed": 42,
///   "padding": 1,
///   "train_images_path": "data/train-images.idx3-ubyte"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Number of convolution filters to create
    pub num_filters: usize,

    /// RNG seed for filter initialization; omit for an entropy-seeded run
    pub seed: Option<u64>,

    /// Zero padding applied to each side of the image (default 1)
    pub padding: Option<usize>,

    /// Path to the MNIST IDX image file
    pub train_images_path: String,
}

impl DemoConfig {
    /// Padding width, defaulting to 1 (the amount that keeps a 3x3
    /// convolution output at the logical image size).
    pub fn padding(&self) -> usize {
        self.padding.unwrap_or(1)
    }
}

/// Loads a demo configuration from a JSON file.
///
/// Reads the file at `path` and deserializes its JSON contents into a
/// `DemoConfig`.
///
/// # Returns
///
/// `Ok(DemoConfig)` on success, or an error if the file cannot be read,
/// the JSON is invalid, or a field fails validation.
///
/// # Examples
///
/// ```no_run
/// use mnist_conv::config::load_config;
///
/// let cfg = load_config("config/mnist_conv.json").unwrap();
/// assert_eq!(cfg.num_filters, 8);
/// ```
pub fn load_config(path: &str) -> Result<DemoConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let config: DemoConfig = serde_json::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &DemoConfig) -> Result<(), Box<dyn Error>> {
    if config.num_filters == 0 {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "num_filters must be at least 1",
        )));
    }

    if config.train_images_path.is_empty() {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "train_images_path must not be empty",
        )));
    }

    Ok(())
}
