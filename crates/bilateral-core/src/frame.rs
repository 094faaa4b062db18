//! Frame - the planes of one video frame
//!
//! A [`Frame`] holds up to three planes that share one sample width.
//! Chroma planes of subsampled YUV formats are smaller than the luma plane.
//!
//! # Ownership model
//!
//! `Frame` uses `Arc` for cheap cloning and is never mutated in place. To
//! write samples, convert to [`FrameMut`] via [`Frame::try_into_mut`] or
//! [`Frame::to_mut`], then convert back with `Into<Frame>`.

use crate::error::{Error, Result};
use crate::format::{SampleType, VideoFormat, VideoInfo};
use crate::plane::Plane;
use crate::sample::Sample;
use std::sync::Arc;

/// Plane storage of a frame, one variant per sample width
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramePlanes {
    /// 8-bit samples
    U8(Vec<Plane<u8>>),
    /// 9..16-bit samples
    U16(Vec<Plane<u16>>),
}

impl FramePlanes {
    /// Number of planes.
    pub fn len(&self) -> usize {
        match self {
            FramePlanes::U8(p) => p.len(),
            FramePlanes::U16(p) => p.len(),
        }
    }

    /// Check whether there are no planes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per stored sample.
    pub fn bytes_per_sample(&self) -> u32 {
        match self {
            FramePlanes::U8(_) => u8::BYTES,
            FramePlanes::U16(_) => u16::BYTES,
        }
    }

    /// Dimensions of plane `index`, if present.
    pub fn plane_dimensions(&self, index: usize) -> Option<(u32, u32)> {
        match self {
            FramePlanes::U8(p) => p.get(index).map(Plane::dimensions),
            FramePlanes::U16(p) => p.get(index).map(Plane::dimensions),
        }
    }
}

/// Internal frame data
#[derive(Debug)]
struct FrameData {
    /// Sample layout
    format: VideoFormat,
    /// Luma width in pixels
    width: u32,
    /// Luma height in pixels
    height: u32,
    /// Plane storage
    planes: FramePlanes,
}

impl FrameData {
    fn duplicate(&self) -> Self {
        FrameData {
            format: self.format,
            width: self.width,
            height: self.height,
            planes: self.planes.clone(),
        }
    }
}

/// Check that a format can be stored in frame planes.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSampleType`] for float samples or bit depths
/// that need more than two bytes.
pub fn check_storable(format: &VideoFormat) -> Result<()> {
    if format.sample_type != SampleType::Integer {
        return Err(Error::UnsupportedSampleType(
            "only integer samples are supported".to_string(),
        ));
    }
    if format.bits_per_sample < 8 || format.bits_per_sample > u16::MAX_BITS {
        return Err(Error::UnsupportedSampleType(format!(
            "only 8-16 bit integer samples are supported, got {} bits",
            format.bits_per_sample
        )));
    }
    Ok(())
}

/// One video frame
///
/// # Examples
///
/// ```
/// use bilateral_core::{Frame, VideoFormat};
///
/// let frame = Frame::new(VideoFormat::yuv420p8(), 64, 48).unwrap();
/// assert_eq!(frame.num_planes(), 3);
/// assert_eq!(frame.plane::<u8>(1).unwrap().dimensions(), (32, 24));
/// ```
#[derive(Debug, Clone)]
pub struct Frame {
    inner: Arc<FrameData>,
}

impl Frame {
    /// Create a frame with all samples set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 and
    /// [`Error::UnsupportedSampleType`] if the format cannot be stored.
    pub fn new(format: VideoFormat, width: u32, height: u32) -> Result<Self> {
        check_storable(&format)?;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let n = format.num_planes();
        let planes = if format.bytes_per_sample() == u8::BYTES {
            FramePlanes::U8(Self::alloc_planes(&format, width, height, n)?)
        } else {
            FramePlanes::U16(Self::alloc_planes(&format, width, height, n)?)
        };

        Ok(Frame {
            inner: Arc::new(FrameData {
                format,
                width,
                height,
                planes,
            }),
        })
    }

    /// Create a zeroed frame matching a clip description.
    ///
    /// # Errors
    ///
    /// Same as [`Frame::new`].
    pub fn from_info(info: &VideoInfo) -> Result<Self> {
        Self::new(info.format, info.width, info.height)
    }

    fn alloc_planes<T: Sample>(
        format: &VideoFormat,
        width: u32,
        height: u32,
        n: usize,
    ) -> Result<Vec<Plane<T>>> {
        (0..n)
            .map(|i| {
                let (w, h) = format.plane_dimensions(i, width, height);
                Plane::new(w, h)
            })
            .collect()
    }

    /// Create a frame from existing planes.
    ///
    /// The luma dimensions are taken from plane 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SampleWidthMismatch`] if `T` does not match the
    /// format's sample width, [`Error::IndexOutOfBounds`] if the plane count
    /// is wrong, and [`Error::DimensionMismatch`] if a chroma plane has the
    /// wrong size.
    pub fn from_planes<T: Sample>(format: VideoFormat, planes: Vec<Plane<T>>) -> Result<Self> {
        check_storable(&format)?;
        if format.bytes_per_sample() != T::BYTES {
            return Err(Error::SampleWidthMismatch {
                stored: format.bytes_per_sample(),
                requested: T::BYTES,
            });
        }
        if planes.len() != format.num_planes() {
            return Err(Error::IndexOutOfBounds {
                index: planes.len(),
                len: format.num_planes(),
            });
        }

        let (width, height) = planes[0].dimensions();
        for (i, plane) in planes.iter().enumerate() {
            let expected = format.plane_dimensions(i, width, height);
            if plane.dimensions() != expected {
                return Err(Error::DimensionMismatch {
                    expected,
                    actual: plane.dimensions(),
                });
            }
        }

        let storage = T::wrap(planes);

        Ok(Frame {
            inner: Arc::new(FrameData {
                format,
                width,
                height,
                planes: storage,
            }),
        })
    }

    /// Get the sample layout.
    #[inline]
    pub fn format(&self) -> &VideoFormat {
        &self.inner.format
    }

    /// Get the luma width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the luma height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the clip description matching this frame.
    pub fn info(&self) -> VideoInfo {
        VideoInfo {
            format: self.inner.format,
            width: self.inner.width,
            height: self.inner.height,
        }
    }

    /// Number of planes.
    #[inline]
    pub fn num_planes(&self) -> usize {
        self.inner.planes.len()
    }

    /// Get the plane storage.
    #[inline]
    pub fn planes(&self) -> &FramePlanes {
        &self.inner.planes
    }

    /// Get plane `index` as samples of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SampleWidthMismatch`] if the frame stores a different
    /// sample width and [`Error::IndexOutOfBounds`] for a missing plane.
    pub fn plane<T: Sample>(&self, index: usize) -> Result<&Plane<T>> {
        let planes = T::planes(&self.inner.planes).ok_or(Error::SampleWidthMismatch {
            stored: self.inner.planes.bytes_per_sample(),
            requested: T::BYTES,
        })?;
        planes.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: planes.len(),
        })
    }

    /// Get the number of strong references to this frame.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if two frames have the same format and dimensions.
    pub fn sizes_equal(&self, other: &Frame) -> bool {
        self.inner.format == other.inner.format
            && self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
    }

    /// Create an independent copy of this frame.
    pub fn deep_clone(&self) -> Self {
        Frame {
            inner: Arc::new(self.inner.duplicate()),
        }
    }

    /// Try to get mutable access to the frame.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<FrameMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(FrameMut { inner: data }),
            Err(arc) => Err(Frame { inner: arc }),
        }
    }

    /// Create a mutable copy of this frame.
    pub fn to_mut(&self) -> FrameMut {
        FrameMut {
            inner: self.inner.duplicate(),
        }
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.sizes_equal(other) && self.inner.planes == other.inner.planes
    }
}

/// Mutable frame
///
/// Convert back to an immutable [`Frame`] using `Into<Frame>`.
#[derive(Debug)]
pub struct FrameMut {
    inner: FrameData,
}

impl FrameMut {
    /// Get the sample layout.
    #[inline]
    pub fn format(&self) -> &VideoFormat {
        &self.inner.format
    }

    /// Get the luma width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the luma height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of planes.
    #[inline]
    pub fn num_planes(&self) -> usize {
        self.inner.planes.len()
    }

    /// Get the plane storage mutably.
    #[inline]
    pub fn planes_mut(&mut self) -> &mut FramePlanes {
        &mut self.inner.planes
    }

    /// Get plane `index` as samples of type `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Frame::plane`].
    pub fn plane<T: Sample>(&self, index: usize) -> Result<&Plane<T>> {
        let planes = T::planes(&self.inner.planes).ok_or(Error::SampleWidthMismatch {
            stored: self.inner.planes.bytes_per_sample(),
            requested: T::BYTES,
        })?;
        planes.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: planes.len(),
        })
    }

    /// Get plane `index` mutably as samples of type `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Frame::plane`].
    pub fn plane_mut<T: Sample>(&mut self, index: usize) -> Result<&mut Plane<T>> {
        let stored = self.inner.planes.bytes_per_sample();
        let planes = T::planes_mut(&mut self.inner.planes).ok_or(Error::SampleWidthMismatch {
            stored,
            requested: T::BYTES,
        })?;
        let len = planes.len();
        planes
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Replace plane `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `plane` has a different size
    /// than the plane it replaces, plus the errors of [`FrameMut::plane_mut`].
    pub fn set_plane<T: Sample>(&mut self, index: usize, plane: Plane<T>) -> Result<()> {
        let slot = self.plane_mut::<T>(index)?;
        if !slot.sizes_equal(&plane) {
            return Err(Error::DimensionMismatch {
                expected: slot.dimensions(),
                actual: plane.dimensions(),
            });
        }
        *slot = plane;
        Ok(())
    }
}

impl From<FrameMut> for Frame {
    fn from(frame_mut: FrameMut) -> Self {
        Frame {
            inner: Arc::new(frame_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ColorFamily;

    #[test]
    fn test_new_allocates_subsampled_planes() {
        let frame = Frame::new(VideoFormat::yuv420p8(), 9, 7).unwrap();
        assert_eq!(frame.num_planes(), 3);
        assert_eq!(frame.plane::<u8>(0).unwrap().dimensions(), (9, 7));
        assert_eq!(frame.plane::<u8>(1).unwrap().dimensions(), (5, 4));
        assert_eq!(frame.plane::<u8>(2).unwrap().dimensions(), (5, 4));
    }

    #[test]
    fn test_new_picks_storage_width() {
        let frame = Frame::new(VideoFormat::gray16(), 4, 4).unwrap();
        assert!(matches!(frame.planes(), FramePlanes::U16(_)));
        assert!(frame.plane::<u8>(0).is_err());
        assert!(frame.plane::<u16>(0).is_ok());

        let fmt10 = VideoFormat::integer_format(ColorFamily::Gray, 10, 0, 0).unwrap();
        let frame = Frame::new(fmt10, 4, 4).unwrap();
        assert!(matches!(frame.planes(), FramePlanes::U16(_)));
    }

    #[test]
    fn test_new_rejects_unstorable() {
        let float = VideoFormat::new(ColorFamily::Gray, SampleType::Float, 32, 0, 0).unwrap();
        assert!(Frame::new(float, 4, 4).is_err());
        let wide = VideoFormat::integer_format(ColorFamily::Gray, 24, 0, 0).unwrap();
        assert!(Frame::new(wide, 4, 4).is_err());
        assert!(Frame::new(VideoFormat::gray8(), 0, 4).is_err());
    }

    #[test]
    fn test_mutation_round_trip() {
        let frame = Frame::new(VideoFormat::gray8(), 4, 4).unwrap();
        let mut fm = frame.try_into_mut().unwrap();
        fm.plane_mut::<u8>(0).unwrap().set_pixel(1, 1, 42).unwrap();
        let frame: Frame = fm.into();
        assert_eq!(frame.plane::<u8>(0).unwrap().get_pixel(1, 1), Some(42));
    }

    #[test]
    fn test_try_into_mut_shared_fails() {
        let frame = Frame::new(VideoFormat::gray8(), 4, 4).unwrap();
        let other = frame.clone();
        assert_eq!(frame.ref_count(), 2);
        assert!(frame.try_into_mut().is_err());
        drop(other);
    }

    #[test]
    fn test_to_mut_does_not_alias() {
        let frame = Frame::new(VideoFormat::gray8(), 2, 2).unwrap();
        let mut copy = frame.to_mut();
        copy.plane_mut::<u8>(0).unwrap().fill(9);
        assert_eq!(frame.plane::<u8>(0).unwrap().get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_from_planes_validates() {
        let y = Plane::<u8>::new(8, 8).unwrap();
        let u = Plane::<u8>::new(4, 4).unwrap();
        let v = Plane::<u8>::new(4, 4).unwrap();
        let frame = Frame::from_planes(VideoFormat::yuv420p8(), vec![y.clone(), u.clone(), v]);
        assert!(frame.is_ok());

        let bad_v = Plane::<u8>::new(8, 8).unwrap();
        assert!(Frame::from_planes(VideoFormat::yuv420p8(), vec![y.clone(), u, bad_v]).is_err());
        assert!(Frame::from_planes(VideoFormat::yuv420p8(), vec![y.clone()]).is_err());
        assert!(Frame::from_planes(VideoFormat::gray16(), vec![y]).is_err());
    }

    #[test]
    fn test_set_plane_checks_size() {
        let mut fm = Frame::new(VideoFormat::gray8(), 4, 4).unwrap().to_mut();
        assert!(fm.set_plane(0, Plane::<u8>::new_with_value(4, 4, 3).unwrap()).is_ok());
        assert!(fm.set_plane(0, Plane::<u8>::new(3, 4).unwrap()).is_err());
        assert!(fm.set_plane(1, Plane::<u8>::new(4, 4).unwrap()).is_err());
    }
}
