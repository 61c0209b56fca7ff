use salient_region::config::{load_config, OutputFormat, ToolConfig};
use salient_region::image::io::{load_rgb_image, save_rgb_image, write_json_file};
use salient_region::saliency::render_saliency;
use salient_region::segmentation::RegionGrowSegmenter;
use salient_region::{DetectionReport, RgbImage, SalientRegionDetector};
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let detector = SalientRegionDetector::new(config.params.clone());

    let mut failures = 0usize;
    for input in &config.inputs {
        if let Err(err) = process_one(&detector, &config, input) {
            eprintln!("Error: {}: {err}", input.display());
            failures += 1;
        }
    }
    if failures > 0 {
        return Err(format!("{failures} of {} images failed", config.inputs.len()));
    }
    Ok(())
}

fn process_one(
    detector: &SalientRegionDetector,
    config: &ToolConfig,
    input: &Path,
) -> Result<(), String> {
    let image = load_rgb_image(input)?;
    let detection = detector
        .process(&image, &RegionGrowSegmenter, None)
        .map_err(|e| e.to_string())?;

    let out = |suffix: &str, ext: &str| output_path(&config.output.dir, input, suffix, ext);

    save_rgb_image(&render_saliency(&detection.saliency_map), &out("_1_salmap", "png"))?;
    let segmented = detection
        .segmented_image(&image, detector.params())
        .map_err(|e| e.to_string())?;
    save_rgb_image(&segmented, &out("_2_segments", "png"))?;
    save_rgb_image(&detection.object.masked, &out("_3_object", "png"))?;
    let overlay = detection
        .box_overlay(&image, config.output.box_color)
        .map_err(|e| e.to_string())?;
    save_rgb_image(&overlay, &out("_4_boxes", "png"))?;

    write_json_file(&out("_report", "json"), &detection.report)?;

    match config.output.format {
        OutputFormat::Text => {
            println!("{}", input.display());
            print_text_summary(&detection.report, &image);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string(&detection.report)
                .map_err(|e| format!("Failed to serialize report: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn output_path(dir: &Path, input: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    dir.join(format!("{stem}{suffix}.{ext}"))
}

fn print_text_summary(report: &DetectionReport, image: &RgbImage) {
    let sel = &report.selection;
    println!("  size: {}x{}", image.w, image.h);
    println!("  segments: {} ({} touch the border)", sel.numlabels, sel.border_segments);
    println!(
        "  average saliency: {:.4} (threshold {:.4})",
        sel.image_average_saliency, sel.threshold
    );
    println!(
        "  selected: {:?} ({} px){}",
        sel.selected_labels,
        sel.selected_pixels,
        if sel.used_fallback { " [fallback]" } else { "" }
    );
    for b in &report.boxes {
        println!(
            "  box label={} x=[{}, {}] y=[{}, {}]",
            b.label, b.bbox.x_min, b.bbox.x_max, b.bbox.y_min, b.bbox.y_max
        );
    }
    println!("  total_ms: {:.3}", report.timings.total_ms);
    for stage in &report.timings.stages {
        println!("    {:<12} {:.3}", stage.label, stage.elapsed_ms);
    }
}

fn usage() -> String {
    "Usage: salient_region <config.json>".to_string()
}
