//! Integer sample types
//!
//! Frames store either 8-bit samples (`u8`) or 9..16-bit samples in a
//! 16-bit container (`u16`). Filters are written once, generic over
//! [`Sample`], and instantiated for both widths.

use crate::frame::FramePlanes;
use crate::plane::Plane;
use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// An unsigned integer sample that a [`Plane`] can hold.
///
/// The trait is sealed: frames only know how to store `u8` and `u16`.
pub trait Sample: Copy + Default + Eq + Debug + Send + Sync + 'static + sealed::Sealed {
    /// Size of the sample container in bytes.
    const BYTES: u32;

    /// Widest bit depth this container can carry.
    const MAX_BITS: u32;

    /// Sample value as `f32`.
    fn to_f32(self) -> f32;

    /// Sample value as a table index.
    fn to_index(self) -> usize;

    /// Round `value` to the nearest integer and clamp it to `[0, peak]`.
    fn from_f32_clamped(value: f32, peak: u32) -> Self;

    /// Borrow the frame planes if they are stored with this sample type.
    fn planes(planes: &FramePlanes) -> Option<&[Plane<Self>]>;

    /// Mutably borrow the frame planes if they are stored with this sample type.
    fn planes_mut(planes: &mut FramePlanes) -> Option<&mut [Plane<Self>]>;

    /// Wrap planes of this sample type into frame storage.
    fn wrap(planes: Vec<Plane<Self>>) -> FramePlanes;
}

impl Sample for u8 {
    const BYTES: u32 = 1;
    const MAX_BITS: u32 = 8;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn to_index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_f32_clamped(value: f32, peak: u32) -> Self {
        value.round().clamp(0.0, peak.min(u8::MAX as u32) as f32) as u8
    }

    fn planes(planes: &FramePlanes) -> Option<&[Plane<Self>]> {
        match planes {
            FramePlanes::U8(p) => Some(p),
            FramePlanes::U16(_) => None,
        }
    }

    fn planes_mut(planes: &mut FramePlanes) -> Option<&mut [Plane<Self>]> {
        match planes {
            FramePlanes::U8(p) => Some(p),
            FramePlanes::U16(_) => None,
        }
    }

    fn wrap(planes: Vec<Plane<Self>>) -> FramePlanes {
        FramePlanes::U8(planes)
    }
}

impl Sample for u16 {
    const BYTES: u32 = 2;
    const MAX_BITS: u32 = 16;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn to_index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_f32_clamped(value: f32, peak: u32) -> Self {
        value.round().clamp(0.0, peak.min(u16::MAX as u32) as f32) as u16
    }

    fn planes(planes: &FramePlanes) -> Option<&[Plane<Self>]> {
        match planes {
            FramePlanes::U16(p) => Some(p),
            FramePlanes::U8(_) => None,
        }
    }

    fn planes_mut(planes: &mut FramePlanes) -> Option<&mut [Plane<Self>]> {
        match planes {
            FramePlanes::U16(p) => Some(p),
            FramePlanes::U8(_) => None,
        }
    }

    fn wrap(planes: Vec<Plane<Self>>) -> FramePlanes {
        FramePlanes::U16(planes)
    }
}
