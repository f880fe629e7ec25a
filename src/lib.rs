//! Gantry: a headless Gantt chart rendering engine
//!
//! Gantry turns a list of tasks into a print-ready project chart. The
//! pipeline is deliberately linear: dependency resolution validates the
//! task graph, the layout stage maps dates and rows onto a fixed
//! landscape page, the painter emits SVG, and an optional resvg-backed
//! rasterizer produces PNG bytes. Every stage is deterministic; the
//! same tasks and configuration always yield byte-identical output.
//!
//! # Features
//!
//! - **`raster`** (default): PNG export via `usvg`/`resvg`. Without it the
//!   engine still lays out and exports SVG.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use gantry::{ChartConfig, Color, GanttEngine, Task, TaskId};
//!
//! # fn main() -> gantry::Result<()> {
//! let tasks = vec![
//!     Task {
//!         id: TaskId(1),
//!         name: "Design".to_string(),
//!         start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         duration_days: 10,
//!         color: Color::DarkBlue,
//!         dependency: None,
//!     },
//!     Task {
//!         id: TaskId(2),
//!         name: "Design sign-off".to_string(),
//!         start_date: NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
//!         duration_days: 0,
//!         color: Color::Teal,
//!         dependency: Some(TaskId(1)),
//!     },
//! ];
//!
//! let mut engine = GanttEngine::new(ChartConfig::default());
//! let scene = engine.render(&tasks)?;
//! assert_eq!(scene.rows.len(), 2);
//!
//! let svg = engine.export_svg()?;
//! assert!(svg.starts_with(b"<svg"));
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDate;

pub mod error;
pub use error::{Error, Result};

pub mod engine;
pub mod rendering;
pub mod resolve;
pub mod task;

pub use engine::GanttEngine;
pub use rendering::layout::Scene;
pub use rendering::RenderedChart;
pub use task::{starter_project, Color, ProjectSize, Task, TaskId};

/// Configuration for the chart engine
///
/// The defaults describe an A3 landscape page at 96 dpi with the stock
/// document theme. Page size and orientation are fixed per engine; the
/// chart never grows to fit its task list, rows shrink instead.
///
/// # Examples
///
/// ```
/// let cfg = gantry::ChartConfig::default();
/// assert_eq!(cfg.page_width_in, 16.54);
/// assert!(cfg.today.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Physical page width in inches (A3 landscape)
    pub page_width_in: f64,
    /// Physical page height in inches
    pub page_height_in: f64,
    /// Pixels per inch for the page coordinate system
    pub dpi: f64,
    /// Outer page margin in pixels
    pub margin: f64,
    /// Share of the page width given to the task panel
    pub panel_fraction: f64,
    /// Nominal row height in pixels; reduced uniformly when the task
    /// list would overflow the page
    pub row_height: f64,
    /// Bar height as a share of the row height
    pub bar_fraction: f64,
    /// Distance from a milestone diamond's centre to its vertices
    pub milestone_half: f64,
    /// Horizontal elbow offset for dependency arrows in pixels
    pub arrow_elbow: f64,
    /// Minimum bar width in pixels before the task name is drawn inside
    pub bar_label_min_width: f64,
    /// Font family for every text element
    pub font_family: String,
    /// Chart title
    pub title: String,
    /// Reference date for the today rule and the subtitle; `None` leaves
    /// both out, keeping output independent of the wall clock
    pub today: Option<NaiveDate>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            page_width_in: 16.54,
            page_height_in: 11.69,
            dpi: 96.0,
            margin: 18.0,
            panel_fraction: 0.28,
            row_height: 46.0,
            bar_fraction: 0.58,
            milestone_half: 9.0,
            arrow_elbow: 10.0,
            bar_label_min_width: 90.0,
            font_family: "DejaVu Sans".to_string(),
            title: "Project Gantt Chart".to_string(),
            today: None,
        }
    }
}

impl ChartConfig {
    /// Page width in pixels
    pub fn page_width_px(&self) -> f64 {
        self.page_width_in * self.dpi
    }

    /// Page height in pixels
    pub fn page_height_px(&self) -> f64 {
        self.page_height_in * self.dpi
    }
}

/// Build a [`Scene`] for `tasks` without keeping any engine state
///
/// Runs dependency resolution and layout only; use [`GanttEngine`] when
/// you also want the painted chart and exports.
pub fn render_scene(tasks: &[Task], config: &ChartConfig) -> Result<Scene> {
    let resolution = resolve::resolve(tasks)?;
    rendering::layout::build_scene(tasks, &resolution, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.page_width_in, 16.54);
        assert_eq!(config.page_height_in, 11.69);
        assert_eq!(config.dpi, 96.0);
        assert_eq!(config.panel_fraction, 0.28);
        assert!(config.today.is_none());
    }

    #[test]
    fn page_pixels_follow_dpi() {
        let mut config = ChartConfig::default();
        config.dpi = 100.0;
        assert!((config.page_width_px() - 1654.0).abs() < 1e-9);
        assert!((config.page_height_px() - 1169.0).abs() < 1e-9);
    }

    #[test]
    fn render_scene_is_pure() {
        let anchor = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let tasks = starter_project(ProjectSize::Medium, anchor);
        let config = ChartConfig::default();
        let a = render_scene(&tasks, &config).unwrap();
        let b = render_scene(&tasks, &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows.len(), 10);
    }
}
