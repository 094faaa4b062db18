//! Bilateral - Edge-preserving smoothing for video frames
//!
//! # Overview
//!
//! Filters operate on the planes of 8-bit to 16-bit integer frames:
//!
//! - Bilateral filtering (direct or approximate evaluation, chosen per plane)
//! - Joint bilateral filtering guided by a reference frame
//! - Separable Gaussian blur
//!
//! # Example
//!
//! ```
//! use bilateral::filter::{Bilateral, BilateralOptions};
//! use bilateral::{Frame, VideoFormat, VideoInfo};
//!
//! let info = VideoInfo::new(VideoFormat::yuv420p8(), 32, 24).unwrap();
//! let filter = Bilateral::new(&info, &BilateralOptions::with_sigmas(2.0, 0.05)).unwrap();
//!
//! let frame = Frame::from_info(&info).unwrap();
//! let out = filter.process(&frame, None).unwrap();
//! assert_eq!(out.info(), info);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use bilateral_core::*;

// Re-export the filter crate as a module to avoid name conflicts
pub use bilateral_filter as filter;
