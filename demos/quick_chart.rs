//! Minimal example demonstrating the chart engine API
//!
//! Run with: cargo run --example quick_chart

use chrono::NaiveDate;
use gantry::{starter_project, ChartConfig, GanttEngine, ProjectSize};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Gantry - Quick Chart Example\n");

    // Seed a ten-task project starting on a fixed Monday
    let anchor = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let tasks = starter_project(ProjectSize::Medium, anchor);
    println!("Seeded {} tasks starting {}", tasks.len(), anchor);

    let config = ChartConfig::default();
    let (page_w, page_h) = (config.page_width_px(), config.page_height_px());
    let mut engine = GanttEngine::new(config);
    let scene = engine.render(&tasks)?;
    println!(
        "Laid out {} rows on a {page_w:.0}x{page_h:.0} px page",
        scene.rows.len()
    );

    let svg = engine.export_svg()?;
    std::fs::write("quick_chart.svg", &svg)?;
    println!("Wrote quick_chart.svg ({} bytes)", svg.len());

    println!("Done.");
    Ok(())
}
