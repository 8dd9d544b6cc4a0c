use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use roofscan::detection::{build_standard_pipeline, steps::detection_from_item};
use roofscan::{load_image, render, BuildingDetection, DetectionMode};

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Light and dark roofs
    Combined,
    /// Light roofs only
    Light,
}

impl From<Mode> for DetectionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Combined => DetectionMode::Combined,
            Mode::Light => DetectionMode::LightOnly,
        }
    }
}

#[derive(Parser)]
#[command(name = "roofscan")]
#[command(about = "Detect building outlines in an aerial map image")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE", default_value = "resources/bing.png")]
    image_path: PathBuf,

    /// Which roof masks to combine
    #[arg(long, value_enum, default_value_t = Mode::Combined)]
    mode: Mode,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Save the annotated image
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Do not open the viewer window
    #[arg(long)]
    no_window: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let mode = DetectionMode::from(args.mode);

    if args.verbose {
        println!("Loading image: {:?}", args.image_path);
    }

    let img = load_image(&args.image_path)?;

    if args.verbose {
        println!("Image loaded: {}x{}\n", img.width(), img.height());
    }

    let mut pipeline = build_standard_pipeline(mode, args.verbose);
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    if args.verbose {
        println!("Running pipeline...\n");
    }
    let results = pipeline.run(img.clone())?;
    let detections: Vec<BuildingDetection> = results.iter().filter_map(detection_from_item).collect();

    println!("\n=== Building Detection Results ===");
    println!("Total buildings detected: {}", detections.len());

    if detections.is_empty() {
        println!("No buildings detected.");
    } else if args.verbose {
        println!("\nDetected buildings:");
        for (i, detection) in detections.iter().enumerate() {
            let (cx, cy) = detection.rect.center();
            let (short, long) = detection.rect.sides();
            println!(
                "  Building {} at ({:.0}, {:.0}) - {:.0}x{:.0} px, angle {:.1}°, area {:.0}",
                i + 1,
                cx,
                cy,
                long,
                short,
                detection.rect.angle(),
                detection.area
            );
        }
    }

    let annotated = render::annotate(&img, &detections);

    if let Some(output) = &args.output {
        annotated
            .save(output)
            .with_context(|| format!("Failed to save annotated image to {}", output.display()))?;
        if args.verbose {
            println!("\nSaved annotated image: {:?}", output);
        }
    }

    if !args.no_window {
        show(mode.window_title(), &annotated)?;
    }

    Ok(())
}

#[cfg(feature = "gui")]
fn show(title: &'static str, img: &image::RgbImage) -> anyhow::Result<()> {
    roofscan::viewer::show(title, img)
}

#[cfg(not(feature = "gui"))]
fn show(_title: &'static str, _img: &image::RgbImage) -> anyhow::Result<()> {
    println!("Built without the `gui` feature; skipping the viewer window.");
    Ok(())
}
