//! Stateful chart engine: validate, lay out, paint, export

use log::debug;

use crate::error::{Error, Result};
use crate::rendering::layout::{self, Scene};
use crate::rendering::paint;
#[cfg(feature = "raster")]
use crate::rendering::raster;
use crate::rendering::RenderedChart;
use crate::resolve;
use crate::task::Task;
use crate::ChartConfig;

/// A render cycle's outputs, kept until the next cycle replaces them
#[derive(Debug, Clone)]
struct Rendered {
    scene: Scene,
    chart: RenderedChart,
}

/// Chart engine holding the configuration and the last rendered chart
///
/// `render` runs the full pipeline (dependency resolution, layout,
/// painting) and keeps the result; the `export_*` methods reuse it
/// without re-rendering. A failed render clears any previous result, so
/// exports never return a chart that no longer matches the input.
pub struct GanttEngine {
    config: ChartConfig,
    rendered: Option<Rendered>,
}

impl GanttEngine {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            rendered: None,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Run a full render cycle over `tasks`
    ///
    /// Validation covers duplicate ids, unknown dependencies, cycles,
    /// empty projects and out-of-range dates; any failure aborts the
    /// cycle before a scene is produced.
    pub fn render(&mut self, tasks: &[Task]) -> Result<&Scene> {
        self.rendered = None;
        let resolution = resolve::resolve(tasks)?;
        let scene = layout::build_scene(tasks, &resolution, &self.config)?;
        let chart = paint::paint(&scene, &self.config);
        debug!(
            "rendered {} tasks into a {}x{} chart",
            tasks.len(),
            chart.width,
            chart.height
        );
        let rendered = self.rendered.insert(Rendered { scene, chart });
        Ok(&rendered.scene)
    }

    /// The scene from the last successful render, if any
    pub fn scene(&self) -> Option<&Scene> {
        self.rendered.as_ref().map(|r| &r.scene)
    }

    /// The painted chart from the last successful render, if any
    pub fn chart(&self) -> Option<&RenderedChart> {
        self.rendered.as_ref().map(|r| &r.chart)
    }

    /// Export the last rendered chart as an SVG document
    pub fn export_svg(&self) -> Result<Vec<u8>> {
        let rendered = self.rendered.as_ref().ok_or(Error::RenderNotReady)?;
        Ok(rendered.chart.svg_bytes())
    }

    /// Export the last rendered chart as a PNG image
    #[cfg(feature = "raster")]
    pub fn export_png(&self) -> Result<Vec<u8>> {
        let rendered = self.rendered.as_ref().ok_or(Error::RenderNotReady)?;
        raster::rasterize(&rendered.chart, &self.config)
    }
}

impl Default for GanttEngine {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Color, TaskId};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: u32, start: NaiveDate, duration_days: u32, dependency: Option<u32>) -> Task {
        Task {
            id: TaskId(id),
            name: format!("Task {id}"),
            start_date: start,
            duration_days,
            color: Color::DarkBlue,
            dependency: dependency.map(TaskId),
        }
    }

    #[test]
    fn export_before_render_is_rejected() {
        let engine = GanttEngine::default();
        assert_eq!(engine.export_svg(), Err(Error::RenderNotReady));
        assert!(engine.scene().is_none());
        assert!(engine.chart().is_none());
    }

    #[test]
    fn render_then_export_round_trip() {
        let mut engine = GanttEngine::default();
        let tasks = vec![
            task(1, date(2024, 1, 1), 10, None),
            task(2, date(2024, 1, 11), 0, Some(1)),
        ];
        let scene = engine.render(&tasks).unwrap();
        assert_eq!(scene.rows.len(), 2);
        let svg = engine.export_svg().unwrap();
        assert!(svg.starts_with(b"<svg"));
    }

    #[test]
    fn failed_render_clears_previous_output() {
        let mut engine = GanttEngine::default();
        engine.render(&[task(1, date(2024, 1, 1), 5, None)]).unwrap();
        assert!(engine.export_svg().is_ok());

        let bad = vec![task(1, date(2024, 1, 1), 5, Some(1))];
        assert_eq!(
            engine.render(&bad),
            Err(Error::Cycle { task_id: TaskId(1) })
        );
        assert_eq!(engine.export_svg(), Err(Error::RenderNotReady));
        assert!(engine.scene().is_none());
    }

    #[test]
    fn validation_errors_surface_unchanged() {
        let mut engine = GanttEngine::default();
        assert_eq!(engine.render(&[]), Err(Error::EmptyProject));
        assert_eq!(
            engine.render(&[task(1, date(2024, 1, 1), 5, Some(9))]),
            Err(Error::UnknownDependency {
                task_id: TaskId(1),
                dependency_id: TaskId(9),
            })
        );
    }

    #[test]
    fn repeated_renders_are_byte_identical() {
        let tasks = vec![
            task(1, date(2024, 1, 1), 10, None),
            task(2, date(2024, 1, 5), 8, Some(1)),
            task(3, date(2024, 1, 20), 0, Some(2)),
        ];
        let mut a = GanttEngine::default();
        let mut b = GanttEngine::default();
        a.render(&tasks).unwrap();
        b.render(&tasks).unwrap();
        assert_eq!(a.export_svg().unwrap(), b.export_svg().unwrap());
    }

    #[cfg(feature = "raster")]
    #[test]
    fn png_export_follows_the_same_gate() {
        let mut engine = GanttEngine::default();
        assert_eq!(engine.export_png(), Err(Error::RenderNotReady));
        engine.render(&[task(1, date(2024, 1, 1), 5, None)]).unwrap();
        let png = engine.export_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
