//! Custom project example - hand-built tasks, a dependency chain and a milestone
//!
//! Run with: cargo run --example custom_project

use chrono::NaiveDate;
use gantry::rendering::layout::RowShape;
use gantry::{ChartConfig, Color, GanttEngine, Task, TaskId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Gantry - Custom Project Example\n");

    let tasks = vec![
        Task {
            id: TaskId(1),
            name: "Requirements".to_string(),
            start_date: date(2024, 6, 3),
            duration_days: 5,
            color: Color::DarkBlue,
            dependency: None,
        },
        Task {
            id: TaskId(2),
            name: "Design".to_string(),
            start_date: date(2024, 6, 10),
            duration_days: 8,
            color: Color::SteelBlue,
            dependency: Some(TaskId(1)),
        },
        Task {
            id: TaskId(3),
            name: "Build".to_string(),
            start_date: date(2024, 6, 20),
            duration_days: 12,
            color: Color::Teal,
            dependency: Some(TaskId(2)),
        },
        Task {
            id: TaskId(4),
            name: "Launch".to_string(),
            start_date: date(2024, 7, 4),
            duration_days: 0,
            color: Color::Charcoal,
            dependency: Some(TaskId(3)),
        },
    ];

    // Pin the today rule so the output stays reproducible
    let mut config = ChartConfig::default();
    config.title = "Website Relaunch".to_string();
    config.today = Some(date(2024, 6, 24));

    let mut engine = GanttEngine::new(config);
    let scene = engine.render(&tasks)?;

    for row in &scene.rows {
        let kind = match row.shape {
            RowShape::Bar { .. } => "bar",
            RowShape::Milestone { .. } => "milestone",
        };
        println!("  {} {:<14} {}", row.cells[0], row.cells[1], kind);
    }

    let svg = engine.export_svg()?;
    std::fs::write("custom_project.svg", &svg)?;
    println!("\nWrote custom_project.svg ({} bytes)", svg.len());

    #[cfg(feature = "raster")]
    {
        let png = engine.export_png()?;
        std::fs::write("custom_project.png", &png)?;
        println!("Wrote custom_project.png ({} bytes)", png.len());
    }
    #[cfg(not(feature = "raster"))]
    println!("PNG export needs the `raster` feature; rerun with --features raster");

    println!("Done.");
    Ok(())
}
