//! Morphology demo: salt-and-pepper removal on a synthetic volume
//!
//! Builds a 48x64x64 volume with:
//! - uniform background (value 50)
//! - a bright box (value 200) and a dark ball (value 10)
//! - single-voxel bright spots (220, "salt") and dark spots (5, "pepper")
//!
//! then runs the morphology pipeline with a radius-1 ball and prints a
//! summary of each result.
//!
//! Run:
//!   cargo run -p ndfocal-algorithms --example denoise_volume

use ndarray::{ArrayD, IxDyn};
use ndfocal_algorithms::morphology::{
    bottom_hat, closing, dilate, erode, gradient, opening, top_hat, top_hat_smoothed,
};
use ndfocal_core::Kernel;

const SHAPE: [usize; 3] = [48, 64, 64];

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let input = build_synthetic_volume();
    println!("Synthetic volume: {:?}", SHAPE);
    print_stats("input", &input);

    let se = Kernel::ball(3, 1.0).expect("ball");
    println!("\nStructuring element: ball r=1, {} of 27 voxels set", se.count_true());

    let eroded = erode(&input, &se).expect("erode failed");
    print_stats("eroded", &eroded);
    let dilated = dilate(&input, &se).expect("dilate failed");
    print_stats("dilated", &dilated);
    let opened = opening(&input, &se).expect("opening failed");
    print_stats("opened", &opened);
    let closed = closing(&input, &se).expect("closing failed");
    print_stats("closed", &closed);
    let grad = gradient(&input, &se).expect("gradient failed");
    print_stats("gradient", &grad);
    let th = top_hat(&input, &se).expect("top_hat failed");
    print_stats("top-hat", &th);
    let bh = bottom_hat(&input, &se).expect("bottom_hat failed");
    print_stats("bottom-hat", &bh);
    let ths = top_hat_smoothed(&input, &se, &se).expect("top_hat_smoothed failed");
    print_stats("top-hat/s", &ths);

    let cleaned = closing(&opened, &se).expect("closing(opened) failed");
    print_stats("cleaned", &cleaned);

    println!("\n--- Verification ---");
    println!("  input:   salt = {}, pepper = {}", count(&input, 220.0), count(&input, 5.0));
    println!("  opened:  salt = {} (should be 0)", count(&opened, 220.0));
    println!("  closed:  pepper = {} (should be 0)", count(&closed, 5.0));
    println!(
        "  cleaned: salt = {}, pepper = {} (both should be 0)",
        count(&cleaned, 220.0),
        count(&cleaned, 5.0)
    );
}

fn build_synthetic_volume() -> ArrayD<f64> {
    let mut vol = ArrayD::from_shape_fn(IxDyn(&SHAPE), |idx| {
        let (z, y, x) = (idx[0] as f64, idx[1] as f64, idx[2] as f64);
        if (8.0..20.0).contains(&z) && (8.0..30.0).contains(&y) && (10.0..40.0).contains(&x) {
            return 200.0;
        }
        let (dz, dy, dx) = (z - 32.0, y - 44.0, x - 40.0);
        if dz * dz + dy * dy + dx * dx <= 100.0 {
            return 10.0;
        }
        50.0
    });

    // deterministic positions from a simple LCG
    let mut seed: u64 = 42;
    let mut next = |n: usize| {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((seed >> 33) as usize) % n
    };
    for value in [220.0, 5.0] {
        for _ in 0..200 {
            let idx = [next(SHAPE[0]), next(SHAPE[1]), next(SHAPE[2])];
            vol[idx.as_slice()] = value;
        }
    }
    vol
}

fn count(vol: &ArrayD<f64>, value: f64) -> usize {
    vol.iter().filter(|&&v| (v - value).abs() < 0.1).count()
}

fn print_stats(label: &str, vol: &ArrayD<f64>) {
    let min = vol.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vol.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = vol.iter().sum::<f64>() / vol.len() as f64;
    println!(
        "  {:<12} min={:>6.1}  max={:>6.1}  mean={:>6.1}",
        label, min, max, mean
    );
}
