//! Bilateral Core - Frame and plane data structures
//!
//! This crate provides the data structures shared by the filters:
//!
//! - [`Sample`] - Integer sample types (`u8`, `u16`)
//! - [`VideoFormat`] / [`VideoInfo`] - Sample layout and clip geometry
//! - [`Plane`] - A single 2D grid of samples
//! - [`Frame`] / [`FrameMut`] - The planes of one frame (immutable / mutable)

pub mod error;
pub mod format;
pub mod frame;
pub mod plane;
pub mod sample;

pub use error::{Error, Result};
pub use format::{ColorFamily, SampleType, VideoFormat, VideoInfo};
pub use frame::{Frame, FrameMut, FramePlanes, check_storable};
pub use plane::{Plane, PlaneDiffResult};
pub use sample::Sample;
