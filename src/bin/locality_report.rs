use blocked_grid::config::report::{self, ReportConfig};
use blocked_grid::config::LayoutConfig;
use blocked_grid::diagnostics::{
    time_ns, InputDescriptor, LayoutTiming, LocalityReport, TimingBreakdown,
};
use blocked_grid::image::io::{load_ppm, save_ppm, write_json_file};
use blocked_grid::image::{Pixmap, Rgb};
use blocked_grid::MethodSuite;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = report::load_config(Path::new(&config_path))?;

    let mut layouts = Vec::with_capacity(config.layouts.len());
    let mut input = None;
    let mut last = None;
    for layout in &config.layouts {
        let pixmap = load_input(&config, layout)?;
        input.get_or_insert_with(|| InputDescriptor {
            width: pixmap.width(),
            height: pixmap.height(),
            source: config.input.as_ref().map(|p| p.display().to_string()),
        });
        let (timing, out) = time_layout(&config, layout, pixmap)?;
        println!(
            "{:<13} total {:>10.3} ms  {:>8.2} ns/pixel",
            timing.layout.name(),
            timing.timings.total_ms,
            timing.ns_per_pixel
        );
        layouts.push(timing);
        last = Some(out);
    }

    let input = input.ok_or("No layouts configured")?;
    let report = LocalityReport { input, layouts };
    if let Some(best) = report.fastest() {
        println!("Fastest layout: {}", best.layout);
    }
    write_json_file(&config.output.report_json, &report)?;
    println!("Saved report to {}", config.output.report_json.display());

    if let (Some(path), Some(pixmap)) = (&config.output.last_image, &last) {
        save_ppm(pixmap, path)?;
        println!("Saved last transformed image to {}", path.display());
    }
    Ok(())
}

fn load_input(config: &ReportConfig, layout: &LayoutConfig) -> Result<Pixmap, String> {
    let suite: MethodSuite<Rgb> = layout.suite();
    match &config.input {
        Some(path) => load_ppm(path, suite),
        None => Pixmap::gradient(suite, config.synthetic.width, config.synthetic.height)
            .map_err(|e| format!("Failed to build synthetic image: {e}")),
    }
}

fn time_layout(
    config: &ReportConfig,
    layout: &LayoutConfig,
    mut pixmap: Pixmap,
) -> Result<(LayoutTiming, Pixmap), String> {
    let map = pixmap.suite().map_default();
    let mut timings = TimingBreakdown::default();
    let mut pixels = 0usize;
    for &transform in &config.transforms {
        pixels += pixmap.width() * pixmap.height();
        let (result, elapsed_ns) = time_ns(|| pixmap.transform_with(map, transform));
        pixmap = result.map_err(|e| format!("Failed to {transform} on {}: {e}", layout.kind))?;
        timings.push(transform.to_string(), elapsed_ns / 1e6);
    }
    let ns_per_pixel = if pixels == 0 {
        0.0
    } else {
        timings.total_ms * 1e6 / pixels as f64
    };
    let timing = LayoutTiming {
        layout: layout.kind,
        blocksize: layout.blocksize,
        traversal: map.traversal().to_string(),
        timings,
        ns_per_pixel,
    };
    Ok((timing, pixmap))
}

fn usage() -> String {
    "Usage: locality_report <config.json>".to_string()
}
