use mountain_blocks::config::{self, RuntimeConfig};
use mountain_blocks::image::{load_rgba_image, save_rgba_png, write_json_file};
use mountain_blocks::svg;
use mountain_blocks::{BlockPipeline, RenderOutput};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "mountains_demo".to_string());
    let config = config::parse_cli(&program)?;

    let source = load_rgba_image(&config.input_path)?;

    let mut rng = SmallRng::from_entropy();
    let out = BlockPipeline::new()
        .process(&source, &config.render_params, &mut rng)
        .map_err(|e| e.to_string())?;

    print_summary(&out);
    save_artifacts(&config, &out)?;

    Ok(())
}

fn print_summary(out: &RenderOutput) {
    let report = &out.report;
    println!("Render summary");
    println!("  grid: {}x{}", report.grid_cols, report.grid_rows);
    println!(
        "  sheets: {} ({} across x {} down, {}x{} cells each)",
        report.sheet_count,
        report.sheet_layout.sheets_across,
        report.sheet_layout.sheets_down,
        report.sheet_layout.cols_per_sheet,
        report.sheet_layout.rows_per_sheet,
    );
    println!(
        "  timings (ms): sample={:.3} grid={:.3} paths={:.3} sheets={:.3} raster={:.3} total={:.3}",
        report.sample_ms,
        report.grid_ms,
        report.paths_ms,
        report.sheets_ms,
        report.raster_ms,
        report.total_ms,
    );
}

fn save_artifacts(config: &RuntimeConfig, out: &RenderOutput) -> Result<(), String> {
    let params = &config.render_params;

    if let Some(path) = &config.output.preview_png {
        save_rgba_png(&out.preview, path)?;
        println!("Preview written to {}", path.display());
    }

    if let Some(path) = &config.output.svg_out {
        let doc = svg::svg_document(
            &out.paths,
            out.preview.w as f32,
            out.preview.h as f32,
            params.show_as_outlines,
        );
        write_text_file(path, &doc)?;
        println!("SVG written to {}", path.display());
    }

    if let Some(dir) = &config.output.sheet_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create sheet dir {}: {e}", dir.display()))?;
        for (i, page) in out.pages.iter().enumerate() {
            let doc = svg::sheet_document(&page.paths, Default::default(), params.block_size);
            write_text_file(&dir.join(format!("sheet_{i:02}.svg")), &doc)?;
        }
        println!("{} sheet pages written to {}", out.pages.len(), dir.display());
    }

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &out.report)?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}

fn write_text_file(path: &Path, contents: &str) -> Result<(), String> {
    std::fs::write(path, contents)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
