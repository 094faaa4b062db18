//! Video format descriptors
//!
//! A [`VideoFormat`] describes how the samples of a frame are laid out:
//! color family, sample type, bit depth and chroma subsampling.
//! A [`VideoInfo`] adds the luma dimensions of a clip; it is what a filter
//! instance is constructed from.

use crate::error::{Error, Result};

/// Color family of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFamily {
    /// Single luma plane
    Gray,
    /// Three full-resolution R, G, B planes
    Rgb,
    /// Luma plane plus two (possibly subsampled) chroma planes
    Yuv,
}

impl ColorFamily {
    /// Number of planes carried by this family.
    pub fn num_planes(self) -> usize {
        match self {
            ColorFamily::Gray => 1,
            ColorFamily::Rgb | ColorFamily::Yuv => 3,
        }
    }
}

/// Numeric type of the samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    /// Unsigned integer samples
    Integer,
    /// IEEE floating point samples
    Float,
}

/// Layout of the samples of a frame.
///
/// Subsampling factors are log2 values: a chroma plane of a frame with
/// `sub_sampling_w == 1` is half as wide as the luma plane (rounded up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoFormat {
    /// Color family
    pub color_family: ColorFamily,
    /// Sample type
    pub sample_type: SampleType,
    /// Significant bits per sample
    pub bits_per_sample: u32,
    /// Horizontal chroma subsampling (log2)
    pub sub_sampling_w: u32,
    /// Vertical chroma subsampling (log2)
    pub sub_sampling_h: u32,
}

impl VideoFormat {
    /// Create a format description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the bit depth is outside 1..=32,
    /// a float format is not 16 or 32 bits, a non-YUV format is subsampled,
    /// or a subsampling factor exceeds 4.
    pub fn new(
        color_family: ColorFamily,
        sample_type: SampleType,
        bits_per_sample: u32,
        sub_sampling_w: u32,
        sub_sampling_h: u32,
    ) -> Result<Self> {
        if bits_per_sample == 0 || bits_per_sample > 32 {
            return Err(Error::InvalidFormat(format!(
                "bits per sample must be in 1..=32, got {bits_per_sample}"
            )));
        }
        if sample_type == SampleType::Float && !matches!(bits_per_sample, 16 | 32) {
            return Err(Error::InvalidFormat(format!(
                "float samples must be 16 or 32 bits, got {bits_per_sample}"
            )));
        }
        if color_family != ColorFamily::Yuv && (sub_sampling_w != 0 || sub_sampling_h != 0) {
            return Err(Error::InvalidFormat(
                "only YUV formats can be subsampled".to_string(),
            ));
        }
        if sub_sampling_w > 4 || sub_sampling_h > 4 {
            return Err(Error::InvalidFormat(format!(
                "subsampling factors must be <= 4, got {sub_sampling_w}x{sub_sampling_h}"
            )));
        }

        Ok(Self {
            color_family,
            sample_type,
            bits_per_sample,
            sub_sampling_w,
            sub_sampling_h,
        })
    }

    /// 8-bit grayscale.
    pub fn gray8() -> Self {
        Self::integer(ColorFamily::Gray, 8, 0, 0)
    }

    /// 16-bit grayscale.
    pub fn gray16() -> Self {
        Self::integer(ColorFamily::Gray, 16, 0, 0)
    }

    /// 8-bit RGB.
    pub fn rgb24() -> Self {
        Self::integer(ColorFamily::Rgb, 8, 0, 0)
    }

    /// 16-bit RGB.
    pub fn rgb48() -> Self {
        Self::integer(ColorFamily::Rgb, 16, 0, 0)
    }

    /// 8-bit YUV 4:2:0.
    pub fn yuv420p8() -> Self {
        Self::integer(ColorFamily::Yuv, 8, 1, 1)
    }

    /// 8-bit YUV 4:2:2.
    pub fn yuv422p8() -> Self {
        Self::integer(ColorFamily::Yuv, 8, 1, 0)
    }

    /// 8-bit YUV 4:4:4.
    pub fn yuv444p8() -> Self {
        Self::integer(ColorFamily::Yuv, 8, 0, 0)
    }

    /// 16-bit YUV 4:4:4.
    pub fn yuv444p16() -> Self {
        Self::integer(ColorFamily::Yuv, 16, 0, 0)
    }

    /// Integer format with an arbitrary bit depth, e.g. 10-bit 4:2:0.
    ///
    /// # Errors
    ///
    /// Same as [`VideoFormat::new`].
    pub fn integer_format(
        color_family: ColorFamily,
        bits_per_sample: u32,
        sub_sampling_w: u32,
        sub_sampling_h: u32,
    ) -> Result<Self> {
        Self::new(
            color_family,
            SampleType::Integer,
            bits_per_sample,
            sub_sampling_w,
            sub_sampling_h,
        )
    }

    fn integer(
        color_family: ColorFamily,
        bits_per_sample: u32,
        sub_sampling_w: u32,
        sub_sampling_h: u32,
    ) -> Self {
        Self {
            color_family,
            sample_type: SampleType::Integer,
            bits_per_sample,
            sub_sampling_w,
            sub_sampling_h,
        }
    }

    /// Number of planes.
    #[inline]
    pub fn num_planes(&self) -> usize {
        self.color_family.num_planes()
    }

    /// Bytes used to store one sample.
    #[inline]
    pub fn bytes_per_sample(&self) -> u32 {
        self.bits_per_sample.div_ceil(8)
    }

    /// Largest representable sample value, `2^bits - 1`.
    #[inline]
    pub fn peak(&self) -> u32 {
        if self.bits_per_sample >= 32 {
            u32::MAX
        } else {
            (1u32 << self.bits_per_sample) - 1
        }
    }

    /// Check for the YUV color family.
    #[inline]
    pub fn is_yuv(&self) -> bool {
        self.color_family == ColorFamily::Yuv
    }

    /// Check whether the chroma planes are subsampled in both directions.
    #[inline]
    pub fn is_subsampled_both(&self) -> bool {
        self.sub_sampling_w != 0 && self.sub_sampling_h != 0
    }

    /// Dimensions of `plane` for a frame whose luma plane is `width` x `height`.
    pub fn plane_dimensions(&self, plane: usize, width: u32, height: u32) -> (u32, u32) {
        if plane == 0 || !self.is_yuv() {
            (width, height)
        } else {
            (
                width.div_ceil(1 << self.sub_sampling_w),
                height.div_ceil(1 << self.sub_sampling_h),
            )
        }
    }
}

/// Format and luma dimensions of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoInfo {
    /// Sample layout
    pub format: VideoFormat,
    /// Luma width in pixels
    pub width: u32,
    /// Luma height in pixels
    pub height: u32,
}

impl VideoInfo {
    /// Create a clip description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(format: VideoFormat, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            format,
            width,
            height,
        })
    }

    /// Dimensions of `plane`.
    #[inline]
    pub fn plane_dimensions(&self, plane: usize) -> (u32, u32) {
        self.format.plane_dimensions(plane, self.width, self.height)
    }
}
