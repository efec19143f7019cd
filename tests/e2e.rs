mod common;

use common::synthetic_image::{grey_ramp, solid_rgba, white_square};
use mountain_blocks::blocks::build_grid;
use mountain_blocks::sampler::{self, CropRegion};
use mountain_blocks::sheets::{self, PageSpec};
use mountain_blocks::skyline::{self, SkylineOptions};
use mountain_blocks::{BlockPipeline, RenderParams};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn white_image_yields_full_fraction_grid_and_valley_floor_peaks() {
    let source = white_square(10);
    let params = RenderParams {
        pixels_wide: 10,
        block_size: 10,
        sharp_adjust: 0,
        ..Default::default()
    };
    let mut rng = SmallRng::seed_from_u64(3);
    let out = BlockPipeline::new()
        .process(&source, &params, &mut rng)
        .unwrap();

    assert_eq!(out.grid.rows(), 10);
    assert_eq!(out.grid.cols(), 10);
    for row in out.grid.iter_rows() {
        for cell in row {
            assert_eq!(cell.fraction, 1.0, "cell ({},{})", cell.x, cell.y);
            assert_eq!(cell.alpha, 255);
        }
    }

    // exact heights, with jitter disabled
    let opts = SkylineOptions::new(10.0).without_jitter();
    let paths = skyline::grid_paths(&out.grid, &opts, &mut rng);
    let min_height = 10.0 * 0.1;
    for path in &paths {
        let y_bottom = 10.0 * (path.row as f32 + 1.0);
        // interior columns sit at the valley floor above the baseline
        for c in 0..9 {
            assert_eq!(
                path.vertices[c + 1][1],
                y_bottom - min_height,
                "row {} col {c}",
                path.row
            );
        }
        // last column closes to the baseline
        assert_eq!(path.vertices[10][1], y_bottom);
    }
}

#[test]
fn single_transparent_pixel_notches_the_silhouette() {
    let mut source = white_square(10);
    source.set(5, 5, [255, 255, 255, 0]);

    let params = RenderParams {
        pixels_wide: 10,
        block_size: 10,
        ..Default::default()
    };
    let mut rng = SmallRng::seed_from_u64(3);
    let out = BlockPipeline::new()
        .process(&source, &params, &mut rng)
        .unwrap();

    let cell = out.grid.get(5, 5).unwrap();
    assert_eq!(cell.fraction, 0.0);
    assert_eq!(cell.alpha, 0);
    assert_eq!(cell.brightness, 0.0);

    let opts = SkylineOptions::new(10.0).without_jitter();
    let paths = skyline::grid_paths(&out.grid, &opts, &mut rng);
    let y_bottom = 10.0 * 6.0;
    assert_eq!(paths[5].vertices[5 + 1][1], y_bottom - 1.0);
    // neighbours keep the full-brightness height
    assert_eq!(paths[5].vertices[4 + 1][1], y_bottom - 1.0 * 10.0 * 0.1);
}

#[test]
fn identity_crop_is_pixel_for_pixel_identical() {
    let source = grey_ramp(33, 21);
    let out = sampler::sample(&source, CropRegion::IDENTITY, None, None, 0.0).unwrap();
    assert_eq!(out, source);
}

#[test]
fn cropped_dimensions_follow_the_normalized_window() {
    let source = white_square(100);
    for (l, r, t, b) in [(0.0, 0.5, 0.0, 1.0), (0.1, 0.9, 0.25, 0.75), (0.32, 0.8, 0.0, 0.75)] {
        let out = sampler::sample(&source, CropRegion::new(l, r, t, b), None, None, 0.0).unwrap();
        let expect_w = (100.0 * (r - l)).round() as usize;
        let expect_h = (100.0 * (b - t)).round() as usize;
        assert!(
            (out.w as i64 - expect_w as i64).abs() <= 1,
            "width {} vs {expect_w} for crop ({l},{r},{t},{b})",
            out.w
        );
        assert!(
            (out.h as i64 - expect_h as i64).abs() <= 1,
            "height {} vs {expect_h} for crop ({l},{r},{t},{b})",
            out.h
        );
    }
}

#[test]
fn two_hundred_square_grid_paginates_to_seventy_sheets() {
    let source = white_square(200);
    let grid = build_grid(&source).unwrap();
    let layout = sheets::sheet_layout(&grid, 7, PageSpec::default());
    assert_eq!(layout.rows_per_sheet, 30);
    assert_eq!(layout.cols_per_sheet, 21);
    assert_eq!(layout.sheets_down, 7);
    assert_eq!(layout.sheets_across, 10);

    let all = sheets::partition(&grid, 7, PageSpec::default());
    assert_eq!(all.len(), 70);
    // row-major reading order: second sheet is the next one across
    assert_eq!(all[0].start_col, 0);
    assert_eq!(all[1].start_col, 21);
    assert_eq!(all[10].start_row, 30);
}

#[test]
fn silhouettes_continue_across_the_sheet_cut() {
    let source = solid_rgba(30, 5, [255, 255, 255, 255]);
    let grid = build_grid(&source).unwrap();
    let all = sheets::partition(&grid, 7, PageSpec::default());
    assert_eq!(all.len(), 2, "expected two sheets across");

    let opts = SkylineOptions::new(7.0).without_jitter();
    let mut rng = SmallRng::seed_from_u64(9);
    let min_height = 7.0 * 0.1;

    // left sheet: the cut edge keeps its computed height
    let left = skyline::sheet_paths(&all[0], &grid, &opts, &mut rng);
    let cols = all[0].cols();
    for path in &left {
        let y_bottom = 7.0 * (path.row as f32 + 1.0);
        assert_eq!(path.vertices[cols][1], y_bottom - min_height);
    }

    // right sheet is the end of the range and drops to the baseline
    let right = skyline::sheet_paths(&all[1], &grid, &opts, &mut rng);
    let cols = all[1].cols();
    for path in &right {
        let y_bottom = 7.0 * (path.row as f32 + 1.0);
        assert_eq!(path.vertices[cols][1], y_bottom);
    }
}

#[test]
fn rebuild_with_same_seed_is_reproducible() {
    let source = grey_ramp(24, 16);
    let params = RenderParams {
        pixels_wide: 24,
        block_size: 12,
        ..Default::default()
    };
    let pipeline = BlockPipeline::new();
    let a = pipeline
        .process(&source, &params, &mut SmallRng::seed_from_u64(11))
        .unwrap();
    let b = pipeline
        .process(&source, &params, &mut SmallRng::seed_from_u64(11))
        .unwrap();
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.paths, b.paths);
    assert_eq!(a.preview, b.preview);
}
