//! End-to-end pipeline tests on synthetic images.
mod common;

use common::synthetic_image::gray_alpha_image;
use sdfgen::image::ImageU8;
use sdfgen::{ChannelSelector, SdfGenerator, SdfParams};

fn view(data: &[u8], w: usize, h: usize) -> ImageU8<'_> {
    ImageU8 {
        w,
        h,
        channels: 2,
        data,
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn center_pixel_shape_symmetric_window() {
    init_logger();
    let data = gray_alpha_image(3, 3, |x, y| x == 1 && y == 1);
    let params = SdfParams {
        spread: 2,
        ..Default::default()
    };
    let sdf = SdfGenerator::new(params).process(&view(&data, 3, 3)).unwrap();

    // Signed values: 0 at the center, 1 at the edge pixels, sqrt(2) at the
    // corners; [-2, 2] maps onto [0, 255].
    assert_eq!(sdf.get(1, 1), 128);
    for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
        assert_eq!(sdf.get(x, y), 191, "edge ({x},{y})");
    }
    for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
        assert_eq!(sdf.get(x, y), 218, "corner ({x},{y})");
    }
}

#[test]
fn center_pixel_shape_asymmetric_window() {
    init_logger();
    let data = gray_alpha_image(3, 3, |x, y| x == 1 && y == 1);
    let params = SdfParams {
        spread: 2,
        asymmetric: true,
        ..Default::default()
    };
    let sdf = SdfGenerator::new(params).process(&view(&data, 3, 3)).unwrap();

    // [0, 2] maps onto [0, 255]; the inside value 0 lands on byte 0.
    assert_eq!(sdf.get(1, 1), 0);
    assert_eq!(sdf.get(1, 0), 128);
    assert_eq!(sdf.get(0, 0), 180);
}

#[test]
fn fully_empty_image_saturates_high() {
    init_logger();
    let data = gray_alpha_image(4, 3, |_, _| false);
    let sdf = SdfGenerator::new(SdfParams::default())
        .process(&view(&data, 4, 3))
        .unwrap();
    assert!(sdf.data.iter().all(|&b| b == 255));
}

#[test]
fn fully_full_image_saturates_low() {
    init_logger();
    let data = gray_alpha_image(4, 3, |_, _| true);
    let sdf = SdfGenerator::new(SdfParams::default())
        .process(&view(&data, 4, 3))
        .unwrap();
    assert!(sdf.data.iter().all(|&b| b == 0));
}

#[test]
fn invert_flips_inside_and_outside() {
    init_logger();
    let data = gray_alpha_image(4, 3, |_, _| true);
    let params = SdfParams {
        invert: true,
        ..Default::default()
    };
    let sdf = SdfGenerator::new(params).process(&view(&data, 4, 3)).unwrap();
    assert!(sdf.data.iter().all(|&b| b == 255));
}

#[test]
fn luminance_selector_reads_the_other_channel() {
    init_logger();
    // gray_alpha_image writes luminance 255 exactly where alpha is 0.
    let data = gray_alpha_image(3, 3, |_, _| false);
    let by_alpha = SdfGenerator::new(SdfParams::default())
        .process(&view(&data, 3, 3))
        .unwrap();
    let by_luma = SdfGenerator::new(SdfParams {
        channel: ChannelSelector::Luminance,
        ..Default::default()
    })
    .process(&view(&data, 3, 3))
    .unwrap();
    assert!(by_alpha.data.iter().all(|&b| b == 255));
    assert!(by_luma.data.iter().all(|&b| b == 0));
}

#[test]
fn disc_shape_separates_sides_around_middle_grey() {
    init_logger();
    let (w, h) = (32usize, 32usize);
    let inside = |x: usize, y: usize| {
        let dx = x as i32 - 16;
        let dy = y as i32 - 16;
        dx * dx + dy * dy <= 81
    };
    let data = gray_alpha_image(w, h, inside);
    let sdf = SdfGenerator::new(SdfParams::default())
        .process(&view(&data, w, h))
        .unwrap();

    assert_eq!(sdf.get(16, 16), 0, "deep inside saturates low");
    assert_eq!(sdf.get(0, 0), 255, "far outside saturates high");
    for y in 0..h {
        for x in 0..w {
            let byte = sdf.get(x, y);
            if inside(x, y) {
                assert!(byte <= 128, "inside ({x},{y}) got {byte}");
            } else {
                assert!(byte >= 128, "outside ({x},{y}) got {byte}");
            }
        }
    }
}

#[test]
fn diagnostics_report_covers_every_stage() {
    init_logger();
    let data = gray_alpha_image(3, 3, |x, y| x == 1 && y == 1);
    let report = SdfGenerator::new(SdfParams {
        spread: 2,
        ..Default::default()
    })
    .process_with_diagnostics(&view(&data, 3, 3))
    .unwrap();

    assert_eq!(report.trace.input.width, 3);
    assert_eq!(report.trace.input.height, 3);
    assert_eq!(report.trace.input.channels, 2);
    assert_eq!(report.trace.inside_pixels, 1);

    let labels: Vec<&str> = report
        .trace
        .timings
        .stages
        .iter()
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(
        labels,
        vec!["threshold", "seed", "edt", "combine", "quantize"]
    );

    let json = serde_json::to_string_pretty(&report.trace).unwrap();
    let parsed: sdfgen::PipelineTrace = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.inside_pixels, 1);
    assert_eq!(parsed.timings.stages.len(), 5);
}

#[test]
fn process_and_diagnostics_paths_agree() {
    init_logger();
    let data = gray_alpha_image(8, 5, |x, y| (x + y) % 3 == 0);
    let generator = SdfGenerator::new(SdfParams::default());
    let plain = generator.process(&view(&data, 8, 5)).unwrap();
    let report = generator
        .process_with_diagnostics(&view(&data, 8, 5))
        .unwrap();
    assert_eq!(plain, report.image);
}
