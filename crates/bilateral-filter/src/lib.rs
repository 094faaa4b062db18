//! bilateral-filter - Edge-preserving smoothing of frame planes
//!
//! This crate provides:
//!
//! - Bilateral filtering with a direct and an approximate evaluator
//! - Automatic per-plane algorithm selection
//! - Joint (cross) bilateral filtering guided by a reference frame
//! - A companion separable Gaussian blur
//!
//! Filters are configured once per clip ([`Bilateral::new`],
//! [`Gaussian::new`]) and then applied to any number of frames.

pub mod approximate;
pub mod bilateral;
pub mod blur;
pub mod direct;
pub mod dispatch;
mod error;
pub mod gaussian;
pub mod params;
pub mod select;
pub mod tables;

pub use error::{FilterError, FilterResult};

// Re-export commonly used items
pub use approximate::bilateral_approximate;
pub use bilateral::Bilateral;
pub use direct::bilateral_direct;
pub use gaussian::{Gaussian, GaussianOptions, gaussian_blur_plane};
pub use params::{Algorithm, BilateralOptions, PlaneParams};
pub use select::{Evaluator, select_evaluator};
pub use tables::{RangeTable, SpatialTable, WeightTables};
