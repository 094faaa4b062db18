//! Plane dispatch regression test
//!
//! Checks which planes are filtered for each format and option set, that
//! copied planes are bit-identical, and that bad options are rejected at
//! construction.

use bilateral_core::{ColorFamily, VideoFormat, VideoInfo};
use bilateral_filter::{Algorithm, Bilateral, BilateralOptions, FilterError};
use bilateral_test::{RegParams, build_frame, noise_plane};

#[test]
fn bilateral_dispatch_reg_yuv_planes() {
    let mut rp = RegParams::new("bilateral_dispatch_yuv_planes");

    let info = VideoInfo::new(VideoFormat::yuv420p8(), 24, 18).expect("info");
    let frame = build_frame::<u8>(&info, |i, w, h| noise_plane(w, h, 255, 40 + i as u64))
        .expect("frame");

    // Default: luma only
    let filter = Bilateral::new(&info, &BilateralOptions::with_sigmas(1.5, 0.2)).expect("filter");
    let out = filter.process(&frame, None).expect("process");
    rp.check(
        out.plane::<u8>(0).expect("plane") != frame.plane::<u8>(0).expect("plane"),
        "luma filtered",
    );
    for i in 1..3 {
        rp.compare_planes(
            frame.plane::<u8>(i).expect("plane"),
            out.plane::<u8>(i).expect("plane"),
        );
    }

    // Chroma only; chroma sigma_s follows the 4:2:0 reduction
    let options = BilateralOptions {
        planes: vec![1, 2],
        ..BilateralOptions::with_sigmas(3.0, 0.2)
    };
    let filter = Bilateral::new(&info, &options).expect("filter");
    rp.compare_values(1.5, filter.plane_params()[1].sigma_s, 1e-12);
    rp.compare_values(1.5, filter.plane_params()[2].sigma_s, 1e-12);
    let out = filter.process(&frame, None).expect("process");
    rp.compare_planes(
        frame.plane::<u8>(0).expect("plane"),
        out.plane::<u8>(0).expect("plane"),
    );
    for i in 1..3 {
        let (w, h) = info.plane_dimensions(i);
        let plane = out.plane::<u8>(i).expect("plane");
        rp.compare_values(w as f64, plane.width() as f64, 0.0);
        rp.compare_values(h as f64, plane.height() as f64, 0.0);
        rp.check(plane != frame.plane::<u8>(i).expect("plane"), "chroma filtered");
    }

    assert!(rp.cleanup(), "bilateral_dispatch_yuv_planes regression test failed");
}

#[test]
fn bilateral_dispatch_reg_zero_sigma() {
    let mut rp = RegParams::new("bilateral_dispatch_zero_sigma");

    let info = VideoInfo::new(VideoFormat::rgb48(), 12, 12).expect("info");
    let frame = build_frame::<u16>(&info, |i, w, h| noise_plane(w, h, 65535, i as u64))
        .expect("frame");

    // Plane 1 gets sigma_r 0 and is copied through; plane 2 repeats it
    let options = BilateralOptions {
        sigma_s: vec![1.0],
        sigma_r: vec![0.2, 0.0],
        ..BilateralOptions::default()
    };
    let filter = Bilateral::new(&info, &options).expect("filter");
    rp.check(filter.evaluator(0).is_some(), "plane 0 processed");
    rp.check(filter.evaluator(1).is_none(), "plane 1 copied");
    rp.check(filter.evaluator(2).is_none(), "plane 2 copied");

    let out = filter.process(&frame, None).expect("process");
    rp.check(
        out.plane::<u16>(0).expect("plane") != frame.plane::<u16>(0).expect("plane"),
        "plane 0 filtered",
    );
    for i in 1..3 {
        rp.compare_planes(
            frame.plane::<u16>(i).expect("plane"),
            out.plane::<u16>(i).expect("plane"),
        );
    }

    assert!(rp.cleanup(), "bilateral_dispatch_zero_sigma regression test failed");
}

#[test]
fn bilateral_dispatch_reg_bad_options() {
    let mut rp = RegParams::new("bilateral_dispatch_bad_options");

    let info = VideoInfo::new(VideoFormat::rgb24(), 8, 8).expect("info");
    let build = |options: BilateralOptions| Bilateral::new(&info, &options);

    let err = build(BilateralOptions {
        planes: vec![3],
        ..BilateralOptions::default()
    });
    rp.check(
        matches!(err, Err(FilterError::PlaneOutOfRange { index: 3, .. })),
        "plane index out of range",
    );

    let err = build(BilateralOptions {
        planes: vec![0, 2, 0],
        ..BilateralOptions::default()
    });
    rp.check(
        matches!(err, Err(FilterError::DuplicatePlane(0))),
        "duplicate plane",
    );

    let err = build(BilateralOptions {
        algorithm: vec![1, 3],
        ..BilateralOptions::default()
    });
    rp.check(
        matches!(err, Err(FilterError::InvalidAlgorithm(3))),
        "algorithm code",
    );

    for bad in [1i64, 257, -1] {
        let err = build(BilateralOptions {
            level_count: vec![bad],
            ..BilateralOptions::default()
        });
        rp.check(
            matches!(err, Err(FilterError::InvalidLevelCount(n)) if n == bad),
            "level count",
        );
    }

    let err = build(BilateralOptions::with_sigmas(-1.0, 0.1));
    rp.check(
        matches!(err, Err(FilterError::InvalidParameters(_))),
        "negative sigma_s",
    );

    // Formats the filter cannot handle
    let float = VideoFormat::new(ColorFamily::Gray, bilateral_core::SampleType::Float, 32, 0, 0)
        .expect("format");
    let float_info = VideoInfo::new(float, 8, 8).expect("info");
    rp.check(
        matches!(
            Bilateral::new(&float_info, &BilateralOptions::default()),
            Err(FilterError::UnsupportedFormat(_))
        ),
        "float samples",
    );
    let wide = VideoFormat::integer_format(ColorFamily::Gray, 20, 0, 0).expect("format");
    let wide_info = VideoInfo::new(wide, 8, 8).expect("info");
    rp.check(
        matches!(
            Bilateral::new(&wide_info, &BilateralOptions::default()),
            Err(FilterError::UnsupportedFormat(_))
        ),
        "20-bit samples",
    );

    assert!(rp.cleanup(), "bilateral_dispatch_bad_options regression test failed");
}

#[test]
fn bilateral_dispatch_reg_huge_spatial_sigma() {
    let mut rp = RegParams::new("bilateral_dispatch_huge_spatial_sigma");

    // The window is limited to the plane, which it already covers
    let info = VideoInfo::new(VideoFormat::yuv444p8(), 8, 6).expect("info");
    let options = BilateralOptions {
        planes: vec![0, 1, 2],
        ..BilateralOptions::with_sigmas(1e10, 0.1)
    };
    let filter = Bilateral::new(&info, &options).expect("filter");
    for i in 0..3 {
        let radius = filter.spatial_table(i).expect("table").radius();
        rp.compare_values(7.0, radius as f64, 0.0);
    }

    let frame = build_frame::<u8>(&info, |i, w, h| noise_plane(w, h, 255, 90 + i as u64))
        .expect("frame");
    let out = filter.process(&frame, None).expect("process");
    rp.compare_values(8.0, out.plane::<u8>(0).expect("plane").width() as f64, 0.0);

    // Any sigma this wide weighs the whole plane uniformly
    let direct = BilateralOptions {
        algorithm: vec![Algorithm::Direct as i64],
        ..options.clone()
    };
    let spanning = BilateralOptions {
        sigma_s: vec![1e6],
        ..direct.clone()
    };
    let a = Bilateral::new(&info, &direct).expect("direct").process(&frame, None).expect("a");
    let b = Bilateral::new(&info, &spanning).expect("spanning").process(&frame, None).expect("b");
    rp.compare_frames(&a, &b);

    assert!(rp.cleanup(), "bilateral_dispatch_huge_spatial_sigma regression test failed");
}
