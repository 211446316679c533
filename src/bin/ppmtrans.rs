use blocked_grid::config::ppmtrans::{self, RuntimeConfig};
use blocked_grid::diagnostics::{append_timing, time_ns};
use blocked_grid::image::io::{load_ppm, read_ppm, write_ppm};
use blocked_grid::image::{Pixmap, Rgb};
use blocked_grid::MethodSuite;
use std::env;
use std::io::{self, BufWriter, Write};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "ppmtrans".to_string());
    let config = ppmtrans::parse_cli(&program, args)?;

    let suite: MethodSuite<Rgb> = config.layout.suite();
    // Checked before reading the image: an unsupported traversal is a
    // configuration error, not something to discover mid-run.
    let map = config.resolve_map(&suite).map_err(|e| format!("{program}: {e}"))?;

    let pixmap = read_input(&config, suite)?;
    let pixels = pixmap.width() * pixmap.height();
    let (result, elapsed_ns) = time_ns(|| pixmap.transform_with(map, config.transform));
    let pixmap = result.map_err(|e| format!("Failed to {}: {e}", config.transform))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_ppm(&mut out, &pixmap)?;
    out.flush()
        .map_err(|e| format!("Failed to write image to stdout: {e}"))?;

    if let Some(path) = &config.time_file {
        append_timing(path, config.transform, elapsed_ns, pixels)?;
    }
    log::debug!(
        "{} on {} layout with {} map: {elapsed_ns:.0} ns",
        config.transform,
        suite.kind(),
        map.traversal()
    );
    Ok(())
}

fn read_input(config: &RuntimeConfig, suite: MethodSuite<Rgb>) -> Result<Pixmap, String> {
    match &config.input {
        Some(path) => load_ppm(path, suite),
        None => read_ppm(io::stdin().lock(), suite),
    }
}
