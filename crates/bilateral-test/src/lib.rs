//! bilateral-test - Regression test framework for the bilateral filter
//!
//! This crate provides a small regression harness that records every
//! failed check and reports them together, plus synthetic plane generators
//! so that tests do not depend on image files.
//!
//! # Usage
//!
//! ```ignore
//! use bilateral_test::{RegParams, edge_plane};
//!
//! let mut rp = RegParams::new("bilateral_direct");
//! let src = edge_plane::<u8>(32, 32, 40, 200, 255).unwrap();
//! rp.compare_values(40.0, src.get_pixel(0, 0).unwrap() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to print plane statistics

mod error;
mod generators;
mod params;

pub use error::{TestError, TestResult};
pub use generators::{
    add_noise, build_frame, checkerboard_plane, edge_plane, flat_plane, noise_plane, ramp_plane,
};
pub use params::{RegParams, RegTestMode};
