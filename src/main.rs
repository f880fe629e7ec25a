//! Gantry CLI - render Gantt charts from task list JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;

use gantry::{starter_project, ChartConfig, GanttEngine, ProjectSize, Task};

#[derive(Parser)]
#[command(
    name = "gantry",
    about = "A headless Gantt chart rendering engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a starter task list to edit and render
    New {
        /// Project size preset (quick-win, small, medium, large, enterprise)
        size: ProjectSize,

        /// Anchor date for the starter tasks (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Output path for the task list JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a task list JSON file to SVG (and optionally PNG)
    Render {
        /// Path to the task list JSON
        tasks: PathBuf,

        /// Output path for the SVG document
        #[arg(short, long, default_value = "gantt.svg")]
        output: PathBuf,

        /// Also rasterize to PNG at this path
        #[arg(long)]
        png: Option<PathBuf>,

        /// Reference date for the today rule (omit for date-independent output)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Dump the computed scene as JSON at this path
        #[arg(long)]
        scene: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::New {
            size,
            start,
            output,
        } => {
            let anchor = start.unwrap_or_else(|| chrono::Local::now().date_naive());
            let tasks = starter_project(size, anchor);
            let json =
                serde_json::to_string_pretty(&tasks).context("Failed to serialize task list")?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote {} starter tasks to {}", tasks.len(), path.display());
                }
                None => println!("{json}"),
            }
        }

        Command::Render {
            tasks,
            output,
            png,
            today,
            title,
            scene,
        } => {
            let data = fs::read_to_string(&tasks)
                .with_context(|| format!("Failed to read {}", tasks.display()))?;
            let list: Vec<Task> = serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse task list {}", tasks.display()))?;

            let mut config = ChartConfig::default();
            config.today = today;
            if let Some(title) = title {
                config.title = title;
            }

            let mut engine = GanttEngine::new(config);
            engine.render(&list).context("Failed to render chart")?;

            if let Some(path) = scene {
                let json = serde_json::to_string_pretty(
                    engine.scene().context("No scene after render")?,
                )
                .context("Failed to serialize scene")?;
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Wrote scene to {}", path.display());
            }

            let svg = engine.export_svg()?;
            fs::write(&output, svg)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {}", output.display());

            if let Some(path) = png {
                write_png(&engine, &path)?;
            }
        }
    }
    Ok(())
}

#[cfg(feature = "raster")]
fn write_png(engine: &GanttEngine, path: &Path) -> Result<()> {
    let bytes = engine.export_png()?;
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(not(feature = "raster"))]
fn write_png(_engine: &GanttEngine, _path: &Path) -> Result<()> {
    anyhow::bail!("this build has no PNG support; rebuild with the `raster` feature")
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();
    info!("command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
