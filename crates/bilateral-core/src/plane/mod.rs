//! Plane - a single 2D grid of samples
//!
//! A frame is made of up to three planes (luma/chroma or R/G/B), each stored
//! as an independent [`Plane`].
//!
//! # Memory layout
//!
//! Samples are stored in row-major order with no padding. The sample at
//! (x, y) is at index `y * width + x`.

mod access;
pub mod compare;

pub use compare::PlaneDiffResult;

use crate::error::{Error, Result};
use crate::sample::Sample;

/// A 2D grid of samples
///
/// # Examples
///
/// ```
/// use bilateral_core::Plane;
///
/// let mut plane = Plane::<u8>::new(64, 48).unwrap();
/// plane.set_pixel(3, 4, 200).unwrap();
/// assert_eq!(plane.get_pixel(3, 4), Some(200));
/// assert_eq!(plane.get_pixel(64, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane<T> {
    /// Width in samples
    width: u32,
    /// Height in samples
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<T>,
}

impl<T: Sample> Plane<T> {
    /// Create a new plane with all samples set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, T::default())
    }

    /// Create a new plane with all samples set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: T) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Plane {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a plane from row-major sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or
    /// [`Error::BufferSize`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Plane {
            width,
            height,
            data,
        })
    }
}

impl<T> Plane<T> {
    /// Get the plane width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the plane height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the plane holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the sample data.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get mutable sample data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the plane and return its sample data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Check if two planes have the same width and height.
    pub fn sizes_equal<U>(&self, other: &Plane<U>) -> bool {
        self.width == other.width && self.height == other.height
    }
}
