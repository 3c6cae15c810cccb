//! End-to-end tests for rendering a single PNG file.

mod common;

use bitmap_dither::{AlphaPolicy, DitherMethod, OutputMode, Rgb, TwoColorPalette};
use common::*;
use ditherlab::error::RenderError;
use ditherlab::models::RenderSettings;
use ditherlab::rendering::UpscalePolicy;
use ditherlab::services::RenderService;
use pretty_assertions::assert_eq;

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

#[test]
fn test_render_mono_default() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "ramp.png", &gray_ramp(32, 8));
    let output = dir.path().join("dithered.png");

    let service = RenderService::new(RenderSettings::default());
    let report = service.render_file(&input, &output).unwrap();

    assert_eq!(report.path, output);
    assert_eq!((report.width, report.height), (32, 8));
    assert!(report.bytes > 0);

    let image = assert_png_file(&output);
    assert_dimensions(&image, 32, 8);
    assert_only_colors(&image, &[BLACK, WHITE]);

    // The ramp must produce both tones
    assert_eq!(distinct_pixels(&image).len(), 2);
}

#[test]
fn test_render_palette_at_working_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "ramp.png", &gray_ramp(40, 20));
    let output = dir.path().join("palette.png");

    let fg = Rgb::new(255, 176, 0);
    let bg = Rgb::new(30, 10, 60);
    let settings = RenderSettings {
        method: DitherMethod::Atkinson,
        mode: OutputMode::Palette,
        scale_percent: 50.0,
        palette: TwoColorPalette::new(fg, bg),
        upscale: UpscalePolicy::None,
        ..Default::default()
    };
    RenderService::new(settings)
        .render_file(&input, &output)
        .unwrap();

    let image = assert_png_file(&output);
    assert_dimensions(&image, 20, 10);
    assert_only_colors(&image, &[fg.to_rgba(), bg.to_rgba()]);
}

#[test]
fn test_render_factor_upscale_replicates_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "ramp.png", &gray_ramp(16, 4));
    let output = dir.path().join("big.png");

    let settings = RenderSettings {
        scale_percent: 50.0,
        upscale: UpscalePolicy::Factor(3),
        ..Default::default()
    };
    RenderService::new(settings)
        .render_file(&input, &output)
        .unwrap();

    let image = assert_png_file(&output);
    assert_dimensions(&image, 24, 6);
    for by in 0..2 {
        for bx in 0..8 {
            let expected = image.pixel(bx * 3, by * 3);
            for dy in 0..3 {
                for dx in 0..3 {
                    assert_eq!(
                        image.pixel(bx * 3 + dx, by * 3 + dy),
                        expected,
                        "block ({bx}, {by}) is not uniform"
                    );
                }
            }
        }
    }
}

#[test]
fn test_render_is_deterministic_without_glitch() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "ramp.png", &gray_ramp(24, 12));
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");

    let service = RenderService::new(RenderSettings {
        method: DitherMethod::SierraLite,
        ..Default::default()
    });
    service.render_file(&input, &first).unwrap();
    service.render_file(&input, &second).unwrap();

    assert_eq!(assert_png_file(&first), assert_png_file(&second));
}

#[test]
fn test_seeded_glitch_is_reproducible() {
    let source = gray_ramp(24, 12);
    let settings = RenderSettings {
        glitch: 40.0,
        seed: Some(1234),
        ..Default::default()
    };

    let a = RenderService::new(settings.clone()).render_buffer("ramp", &source);
    let b = RenderService::new(settings).render_buffer("ramp", &source);
    assert_eq!(a, b);
}

#[test]
fn test_ordered_flat_gray_lights_half_the_cells() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "flat.png", &flat_gray(4, 4, 128));
    let output = dir.path().join("ordered.png");

    let settings = RenderSettings {
        method: DitherMethod::Ordered,
        ..Default::default()
    };
    RenderService::new(settings)
        .render_file(&input, &output)
        .unwrap();

    let image = assert_png_file(&output);
    let white = image.pixels().filter(|px| *px == WHITE).count();
    assert_eq!(white, 8, "128/255 clears the Bayer ranks 0..=7 only");
}

#[test]
fn test_rgb_mode_emits_channel_bits() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "card.png", &half_transparent_card(16, 16));
    let output = dir.path().join("rgb.png");

    let settings = RenderSettings {
        mode: OutputMode::Rgb,
        ..Default::default()
    };
    RenderService::new(settings)
        .render_file(&input, &output)
        .unwrap();

    let image = assert_png_file(&output);
    for px in image.pixels() {
        assert!(px[..3].iter().all(|&c| c == 0 || c == 255), "{px:?}");
        assert_eq!(px[3], 255, "dithered output is opaque");
    }
}

#[test]
fn test_gray_preview_alpha_policy() {
    let source = half_transparent_card(8, 4);

    let opaque = RenderService::new(RenderSettings {
        mode: OutputMode::Gray,
        ..Default::default()
    })
    .render_buffer("card", &source);
    assert!(opaque.rgba.chunks_exact(4).all(|px| px[3] == 255));

    let preserved = RenderService::new(RenderSettings {
        mode: OutputMode::Gray,
        alpha: AlphaPolicy::PreserveSource,
        ..Default::default()
    })
    .render_buffer("card", &source);
    for (i, px) in preserved.rgba.chunks_exact(4).enumerate() {
        let expected = if i % 8 < 4 { 0 } else { 255 };
        assert_eq!(px[3], expected, "alpha at pixel {i}");
        assert!(px[0] == px[1] && px[1] == px[2], "gray preview is neutral");
    }
}

#[test]
fn test_preserve_alpha_is_ignored_when_dithering() {
    let source = half_transparent_card(8, 4);
    let image = RenderService::new(RenderSettings {
        mode: OutputMode::Mono,
        alpha: AlphaPolicy::PreserveSource,
        ..Default::default()
    })
    .render_buffer("card", &source);
    assert!(image.rgba.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RenderService::new(RenderSettings::default())
        .render_file(&dir.path().join("nope.png"), &dir.path().join("out.png"))
        .unwrap_err();
    assert!(matches!(err, RenderError::Io(_)), "got {err:?}");
}

#[test]
fn test_corrupt_input_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.png");
    std::fs::write(&input, b"\x89PNG\r\n\x1a\nnot really").unwrap();

    let err = RenderService::new(RenderSettings::default())
        .render_file(&input, &dir.path().join("out.png"))
        .unwrap_err();
    assert!(matches!(err, RenderError::PngDecode(_)), "got {err:?}");
}
