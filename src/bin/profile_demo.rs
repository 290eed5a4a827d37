//! Extract the three principal-axis profiles of a voxelized solid.
//!
//! Steps:
//! 1. Load the occupancy grid (voxel-set JSON or a synthetic shape).
//! 2. Extract the principal frame and pad the volume by the scan budget.
//! 3. Sweep a plane along each axis and record the silhouette.
//! 4. Write `<prefix>_m`, `<prefix>_s`, `<prefix>_t` images, the JSON report
//!    and, optionally, the debug voxel sets.

use std::env;
use std::path::Path;
use std::time::Instant;
use voxel_profile::config::profile_demo::{self as demo_cfg, ProfileDemoConfig};
use voxel_profile::image::io::{save_profile_image, write_json_file};
use voxel_profile::volume::io::write_voxel_set;
use voxel_profile::volume::OccupancyGrid;
use voxel_profile::{ProfilePipeline, ProfileResult};

fn main() {
    let start = Instant::now();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
    println!(
        "Total execution time: {:.2} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
}

fn run() -> Result<(), String> {
    let config = load_config_from_args()?;

    let load_start = Instant::now();
    let grid = config.input.load()?;
    let load_ms = load_start.elapsed().as_secs_f64() * 1000.0;
    println!(
        "Loaded {} occupied voxels in {:.2} ms",
        grid.occupied_count(),
        load_ms
    );

    let pipeline = ProfilePipeline::new(config.pipeline.clone());
    let mut result = pipeline.run(&grid).map_err(|e| e.to_string())?;
    result.report.timings.push("load", load_ms);

    print_summary(&result);
    save_profiles(&config, &result)?;

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &result.report)?;
        println!("Report written to {}", path.display());
    }
    if let Some(dir) = &config.output.debug_volumes {
        save_debug_volumes(&pipeline, &grid, &result, dir)?;
    }
    Ok(())
}

fn usage() -> String {
    "Usage: profile_demo <config.json>".to_string()
}

fn load_config_from_args() -> Result<ProfileDemoConfig, String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    demo_cfg::load_config(Path::new(&config_path))
}

fn print_summary(result: &ProfileResult) {
    let axes = &result.report.axes;
    println!(
        "Principal frame: eigenvalues [{:.3}, {:.3}, {:.3}]",
        axes.eigenvalues[0], axes.eigenvalues[1], axes.eigenvalues[2]
    );
    for scan in &result.report.scans {
        println!(
            "  {}: normal ({:.3}, {:.3}, {:.3}) contact {} steps {} hits {}{}",
            scan.label,
            scan.normal[0],
            scan.normal[1],
            scan.normal[2],
            scan.contact_step,
            scan.steps,
            scan.hit_pixels,
            if scan.truncated { " (truncated)" } else { "" }
        );
    }
    for stage in &result.report.timings.stages {
        println!("  {:<8} {:>9.3} ms", stage.label, stage.elapsed_ms);
    }
}

fn save_profiles(config: &ProfileDemoConfig, result: &ProfileResult) -> Result<(), String> {
    for (label, image) in result.labelled_profiles() {
        let path = config.output.image_path(label);
        save_profile_image(image, &path)?;
        println!("Profile {label} written to {}", path.display());
    }
    Ok(())
}

fn save_debug_volumes(
    pipeline: &ProfilePipeline,
    grid: &OccupancyGrid,
    result: &ProfileResult,
    dir: &Path,
) -> Result<(), String> {
    let volumes = pipeline
        .overlay_volumes(grid, result)
        .map_err(|e| e.to_string())?;
    for (name, volume) in &volumes {
        write_voxel_set(&dir.join(format!("{name}.json")), volume)?;
    }
    println!("{} debug volumes written to {}", volumes.len(), dir.display());
    Ok(())
}
