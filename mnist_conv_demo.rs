// mnist_conv_demo.rs
// Forward pass of a 3x3 convolution over one MNIST digit.
// Expected files:
//   ./config/mnist_conv.json
//   ./data/train-images.idx3-ubyte
//
// Output:
//   - prints the shape of the convolution output, e.g. (28, 28, 8)

use std::fs;
use std::process;

use ndarray::Array2;

use mnist_conv::config::load_config;
use mnist_conv::layers::Conv3x3;
use mnist_conv::utils::{rng_from_entropy, seeded_rng, zero_pad};

// MNIST constants (images are flat 28x28 in row-major order).
const IMG_H: usize = 28;
const IMG_W: usize = 28;

const CONFIG_PATH: &str = "config/mnist_conv.json";

// Read a big-endian u32 and advance the byte offset (IDX format uses BE).
fn read_be_u32(data: &[u8], offset: &mut usize) -> u32 {
    let b0 = (data[*offset] as u32) << 24;
    let b1 = (data[*offset + 1] as u32) << 16;
    let b2 = (data[*offset + 2] as u32) << 8;
    let b3 = data[*offset + 3] as u32;
    *offset += 4;
    b0 | b1 | b2 | b3
}

// Read the first image of an IDX file and normalize it to [0,1] floats.
fn read_first_mnist_image(filename: &str) -> Array2<f32> {
    let data = fs::read(filename).unwrap_or_else(|_| {
        eprintln!("Could not open file {}", filename);
        process::exit(1);
    });

    let mut offset = 0usize;
    // IDX header: magic, count, rows, cols.
    let _magic = read_be_u32(&data, &mut offset);
    let total_images = read_be_u32(&data, &mut offset) as usize;
    let rows = read_be_u32(&data, &mut offset) as usize;
    let cols = read_be_u32(&data, &mut offset) as usize;

    if rows != IMG_H || cols != IMG_W {
        eprintln!("Unexpected MNIST image shape: {}x{}", rows, cols);
        process::exit(1);
    }
    if total_images == 0 || data.len() < offset + rows * cols {
        eprintln!("MNIST image file is truncated");
        process::exit(1);
    }

    Array2::from_shape_fn((rows, cols), |(i, j)| {
        data[offset + i * cols + j] as f32 / 255.0
    })
}

fn main() {
    let config = load_config(CONFIG_PATH).unwrap_or_else(|err| {
        eprintln!("Could not load {}: {}", CONFIG_PATH, err);
        process::exit(1);
    });

    let image = read_first_mnist_image(&config.train_images_path);
    // Pad so the convolution output keeps the logical 28x28 size.
    let padded = zero_pad(&image, config.padding());

    let mut rng = match config.seed {
        Some(seed) => seeded_rng(seed),
        None => rng_from_entropy(),
    };
    let conv = Conv3x3::new(config.num_filters, &mut rng).unwrap_or_else(|err| {
        eprintln!("Could not build convolution layer: {}", err);
        process::exit(1);
    });

    let output = conv.forward(&padded);
    println!("output shape: {:?}", output.dim()); // (28, 28, 8)
}
