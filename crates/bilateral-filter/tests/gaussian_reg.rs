//! Gaussian blur regression test
//!
//! Checks the companion Gaussian filter: flat planes are unchanged, an
//! impulse spreads symmetrically, chroma planes are handled with the
//! subsampled sigmas, and a zero sigma copies the plane through.

use bilateral_core::{Plane, VideoFormat, VideoInfo};
use bilateral_filter::{Gaussian, GaussianOptions, SpatialTable, gaussian_blur_plane};
use bilateral_test::{RegParams, build_frame, flat_plane, noise_plane};

#[test]
fn gaussian_reg_planes() {
    let mut rp = RegParams::new("gaussian_planes");

    let flat = flat_plane::<u8>(15, 11, 77, 255).expect("flat");
    let table = SpatialTable::new(2.0).expect("table");
    let mut out = Plane::new(15, 11).expect("plane");
    gaussian_blur_plane(&flat, Some(&table), Some(&table), 255, &mut out).expect("blur");
    rp.compare_planes(&flat, &out);

    // Centered impulse spreads the same way on both axes
    let mut impulse = flat_plane::<u16>(9, 9, 0, 65535).expect("flat");
    impulse.set_pixel(4, 4, 60000).expect("set pixel");
    let mut out = Plane::new(9, 9).expect("plane");
    gaussian_blur_plane(&impulse, Some(&table), Some(&table), 65535, &mut out).expect("blur");
    let at = |x, y| out.get_pixel(x, y).expect("pixel") as f64;
    rp.compare_values(at(3, 4), at(4, 3), 1.0);
    rp.compare_values(at(5, 4), at(4, 5), 1.0);
    rp.compare_values(at(3, 4), at(5, 4), 1.0);
    rp.check(at(4, 4) > at(3, 4), "center is the maximum");
    rp.check(at(3, 4) > at(3, 3), "falls off diagonally");

    assert!(rp.cleanup(), "gaussian_planes regression test failed");
}

#[test]
fn gaussian_reg_frames() {
    let mut rp = RegParams::new("gaussian_frames");

    let info = VideoInfo::new(VideoFormat::yuv420p8(), 20, 16).expect("info");
    let frame = build_frame::<u8>(&info, |i, w, h| noise_plane(w, h, 255, 60 + i as u64))
        .expect("frame");

    // Every plane is blurred; chroma uses half the sigma
    let filter = Gaussian::new(&info, &GaussianOptions::with_sigma(2.0)).expect("filter");
    let out = filter.process(&frame).expect("process");
    for i in 0..3 {
        let src = frame.plane::<u8>(i).expect("plane");
        let dst = out.plane::<u8>(i).expect("plane");
        rp.compare_values(src.width() as f64, dst.width() as f64, 0.0);
        rp.check(dst != src, "plane blurred");

        let sigma = if i == 0 { 2.0 } else { 1.0 };
        let table = SpatialTable::new(sigma).expect("table");
        let mut expected = Plane::new(src.width(), src.height()).expect("plane");
        gaussian_blur_plane(src, Some(&table), Some(&table), 255, &mut expected).expect("blur");
        rp.compare_planes(&expected, dst);
    }

    // Zero sigma on luma copies it through
    let options = GaussianOptions {
        sigma: vec![0.0, 1.0],
        sigma_v: vec![0.0, 1.0],
    };
    let filter = Gaussian::new(&info, &options).expect("filter");
    rp.check(!filter.is_processed(0), "luma copied");
    let out = filter.process(&frame).expect("process");
    rp.compare_planes(
        frame.plane::<u8>(0).expect("plane"),
        out.plane::<u8>(0).expect("plane"),
    );

    // Horizontal-only blur leaves horizontal stripes intact
    let gray = VideoInfo::new(VideoFormat::gray8(), 8, 8).expect("info");
    let stripes = build_frame::<u8>(&gray, |_, w, h| {
        let data = (0..w * h).map(|i| if (i / w) % 2 == 0 { 30 } else { 220 }).collect();
        Ok(Plane::from_vec(w, h, data)?)
    })
    .expect("frame");
    let options = GaussianOptions {
        sigma: vec![3.0],
        sigma_v: vec![0.0],
    };
    let filter = Gaussian::new(&gray, &options).expect("filter");
    let out = filter.process(&stripes).expect("process");
    rp.compare_frames(&stripes, &out);

    assert!(rp.cleanup(), "gaussian_frames regression test failed");
}

#[test]
fn gaussian_reg_tiny_sigma() {
    let mut rp = RegParams::new("gaussian_tiny_sigma");

    // Every neighbor weight underflows to zero, leaving only the center tap
    let info = VideoInfo::new(VideoFormat::gray8(), 8, 8).expect("info");
    let frame = build_frame::<u8>(&info, |_, w, h| noise_plane(w, h, 255, 7)).expect("frame");
    let filter = Gaussian::new(&info, &GaussianOptions::with_sigma(1e-200)).expect("filter");
    rp.check(filter.is_processed(0), "luma processed");
    let out = filter.process(&frame).expect("process");
    rp.compare_frames(&frame, &out);

    assert!(rp.cleanup(), "gaussian_tiny_sigma regression test failed");
}
