//! Scene construction: page regions, row geometry, arrows and the legend
//!
//! The layout stage turns a validated task list into a [`Scene`], a pure
//! geometric description in page pixels. Nothing here touches SVG or
//! fonts; the painter consumes the scene verbatim, which keeps layout
//! decisions testable without parsing markup.

use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;

use crate::error::Result;
use crate::rendering::axis::{AxisTick, TimeAxisMapper};
use crate::rendering::Rect;
use crate::resolve::Resolution;
use crate::task::{Color, Task, TaskId};
use crate::ChartConfig;

/// Vertical space reserved for the title and subtitle
const TITLE_BLOCK_H: f64 = 56.0;
/// Height of the dark header band
const HEADER_H: f64 = 28.0;
/// Strip under the plot area for month labels
const AXIS_LABEL_H: f64 = 22.0;
/// Strip at the page bottom for the legend
const LEGEND_H: f64 = 36.0;
/// Gap between the task panel and the plot area
const PANEL_GAP: f64 = 12.0;

/// Panel columns: title and share of the panel width
const PANEL_COLUMNS: [(&str, f64); 4] = [
    ("ID", 0.06),
    ("Task Name", 0.44),
    ("Duration", 0.24),
    ("Dates", 0.26),
];

const LEGEND_SWATCH_W: f64 = 16.0;
const LEGEND_LABEL_GAP: f64 = 7.0;
const LEGEND_SPACING: f64 = 22.0;
/// Estimated label glyph width at legend font size, for centering
const LEGEND_CHAR_W: f64 = 5.8;

/// Column of the task panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelColumn {
    pub title: String,
    pub x: f64,
    pub width: f64,
}

/// Left-hand task panel: a fixed four-column grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSpec {
    pub rect: Rect,
    pub columns: Vec<PanelColumn>,
}

/// Bar or diamond geometry for one row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RowShape {
    Bar {
        rect: Rect,
        /// Task name drawn inside the bar when it is wide enough
        label: Option<String>,
    },
    /// Diamond centred on the milestone date; `half` is the distance
    /// from centre to vertex
    Milestone { cx: f64, cy: f64, half: f64 },
}

/// Dependency arrow from a predecessor's end to its successor's start
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowGeometry {
    pub from: TaskId,
    pub to: TaskId,
    /// Elbowed polyline drawn in order; the head sits on the last point
    pub points: Vec<(f64, f64)>,
}

/// Geometry for one task row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowGeometry {
    pub task_id: TaskId,
    /// Full-width background band for this row
    pub band: Rect,
    /// Panel cell texts: id, name, duration, date range
    pub cells: [String; 4],
    pub color: Color,
    pub shape: RowShape,
    /// Arrow terminating at this row, when the task has a predecessor
    pub arrow: Option<ArrowGeometry>,
}

/// Plot area and monthly gridline positions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    /// Area the gridlines span; ticks left of it are clipped at paint time
    pub body: Rect,
    pub ticks: Vec<AxisTick>,
}

/// Vertical rule marking the reference date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodayMarker {
    pub date: NaiveDate,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LegendGlyph {
    Swatch(Color),
    Milestone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub glyph: LegendGlyph,
    /// Left edge of the glyph; the label follows it
    pub x: f64,
    /// Vertical centre of the entry
    pub y: f64,
}

/// Chart title and subtitle, centred on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleBlock {
    pub title: String,
    pub subtitle: String,
    pub x: f64,
    pub title_y: f64,
    pub subtitle_y: f64,
}

/// Complete geometric description of one chart, in page pixels
///
/// Building a scene performs no I/O; the same task list, configuration
/// and reference date always produce an identical scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub page_width: f64,
    pub page_height: f64,
    pub title: TitleBlock,
    /// Dark band across panel and plot holding the column and axis titles
    pub header: Rect,
    pub panel: PanelSpec,
    pub axis: AxisSpec,
    /// One entry per task, in input order; vertical position is input index
    pub rows: Vec<RowGeometry>,
    pub today: Option<TodayMarker>,
    pub legend: Vec<LegendEntry>,
    /// Effective row height after any overflow reduction
    pub row_height: f64,
}

/// Lay out `tasks` on the fixed page described by `config`
///
/// `resolution` must come from [`crate::resolve::resolve`] on the same
/// list. Fails on an empty list or when a task's dates leave the
/// supported calendar range; the dependency graph is assumed valid.
pub fn build_scene(
    tasks: &[Task],
    resolution: &Resolution,
    config: &ChartConfig,
) -> Result<Scene> {
    let page_w = config.page_width_px();
    let page_h = config.page_height_px();
    let margin = config.margin;

    let body_left = page_w * config.panel_fraction;
    let body_right = page_w - margin;
    let mapper = TimeAxisMapper::from_tasks(tasks, body_left, body_right)?;
    let (domain_start, domain_end) = mapper.domain();

    let n = tasks.len();
    let content_top = margin + TITLE_BLOCK_H;
    let header = Rect::new(margin, content_top, page_w - 2.0 * margin, HEADER_H);
    let rows_top = header.bottom();
    let rows_bottom = page_h - margin - LEGEND_H - AXIS_LABEL_H;
    let rows_area_h = rows_bottom - rows_top;

    let nominal = config.row_height;
    let row_h = if nominal * n as f64 > rows_area_h {
        let reduced = rows_area_h / n as f64;
        warn!("{n} tasks overflow the page at {nominal:.0}px per row, reducing to {reduced:.1}px");
        reduced
    } else {
        nominal
    };
    let bar_h = row_h * config.bar_fraction;
    let milestone_half = config.milestone_half.min(row_h * 0.45);

    let panel_rect = Rect::new(
        margin,
        rows_top,
        body_left - margin - PANEL_GAP,
        n as f64 * row_h,
    );
    let mut columns = Vec::with_capacity(PANEL_COLUMNS.len());
    let mut col_x = panel_rect.x;
    for (title, fraction) in PANEL_COLUMNS {
        let width = panel_rect.width * fraction;
        columns.push(PanelColumn {
            title: title.to_string(),
            x: col_x,
            width,
        });
        col_x += width;
    }

    // First pass: bands, panel cells and bar/diamond geometry.
    let mut rows = Vec::with_capacity(n);
    for (i, task) in tasks.iter().enumerate() {
        let band = Rect::new(
            margin,
            rows_top + i as f64 * row_h,
            page_w - 2.0 * margin,
            row_h,
        );
        let end = task.end_date()?;
        let shape = if task.is_milestone() {
            RowShape::Milestone {
                cx: mapper.x(task.start_date),
                cy: band.center_y(),
                half: milestone_half,
            }
        } else {
            let x0 = mapper.x(task.start_date);
            let x1 = mapper.x(end);
            let rect = Rect::new(x0, band.center_y() - bar_h / 2.0, x1 - x0, bar_h);
            let label = (rect.width >= config.bar_label_min_width).then(|| task.name.clone());
            RowShape::Bar { rect, label }
        };
        let duration_cell = if task.is_milestone() {
            "Milestone".to_string()
        } else {
            format!("{}d", task.duration_days)
        };
        let dates_cell = format!(
            "{} → {}",
            task.start_date.format("%d %b"),
            end.format("%d %b")
        );
        rows.push(RowGeometry {
            task_id: task.id,
            band,
            cells: [
                task.id.to_string(),
                task.name.clone(),
                duration_cell,
                dates_cell,
            ],
            color: task.color,
            shape,
            arrow: None,
        });
    }

    // Second pass: arrows, now that every endpoint shape exists.
    for i in 0..n {
        let Some(src) = resolution.dependency_of(i) else {
            continue;
        };
        let (_, src_right, src_cy) = attach_points(&rows[src].shape);
        let (dst_left, _, dst_cy) = attach_points(&rows[i].shape);
        let elbow_x = src_right + config.arrow_elbow;
        let arrow = ArrowGeometry {
            from: rows[src].task_id,
            to: rows[i].task_id,
            points: vec![
                (src_right, src_cy),
                (elbow_x, src_cy),
                (elbow_x, dst_cy),
                (dst_left, dst_cy),
            ],
        };
        rows[i].arrow = Some(arrow);
    }

    let axis = AxisSpec {
        body: Rect::new(body_left, rows_top, body_right - body_left, rows_area_h),
        ticks: mapper.month_ticks(),
    };

    let today = config
        .today
        .filter(|d| mapper.contains(*d))
        .map(|date| TodayMarker {
            date,
            x: mapper.x(date),
        });

    let subtitle_range = format!(
        "{} – {}",
        domain_start.format("%b %Y"),
        domain_end.format("%b %Y")
    );
    let subtitle = match config.today {
        Some(d) => format!(
            "Generated {} · {n} tasks · {subtitle_range}",
            d.format("%d %B %Y")
        ),
        None => format!("{n} tasks · {subtitle_range}"),
    };
    let title = TitleBlock {
        title: config.title.clone(),
        subtitle,
        x: page_w / 2.0,
        title_y: margin + 20.0,
        subtitle_y: margin + 42.0,
    };

    let legend = build_legend(page_w, page_h - margin - LEGEND_H / 2.0);

    debug!(
        "scene: {} rows at {:.1}px, {} ticks, {} arrows",
        rows.len(),
        row_h,
        axis.ticks.len(),
        rows.iter().filter(|r| r.arrow.is_some()).count()
    );

    Ok(Scene {
        page_width: page_w,
        page_height: page_h,
        title,
        header,
        panel: PanelSpec {
            rect: panel_rect,
            columns,
        },
        axis,
        rows,
        today,
        legend,
        row_height: row_h,
    })
}

/// Left edge, right edge and vertical centre of a row shape
fn attach_points(shape: &RowShape) -> (f64, f64, f64) {
    match shape {
        RowShape::Bar { rect, .. } => (rect.x, rect.right(), rect.center_y()),
        RowShape::Milestone { cx, cy, .. } => (*cx, *cx, *cy),
    }
}

/// Centre the palette swatches plus the milestone glyph at the page foot
fn build_legend(page_w: f64, y: f64) -> Vec<LegendEntry> {
    let entries: Vec<(LegendGlyph, String)> = Color::ALL
        .iter()
        .map(|c| (LegendGlyph::Swatch(*c), c.label().to_string()))
        .chain(std::iter::once((
            LegendGlyph::Milestone,
            "Milestone".to_string(),
        )))
        .collect();
    let widths: Vec<f64> = entries
        .iter()
        .map(|(_, label)| {
            LEGEND_SWATCH_W + LEGEND_LABEL_GAP + label.chars().count() as f64 * LEGEND_CHAR_W
        })
        .collect();
    let total: f64 =
        widths.iter().sum::<f64>() + LEGEND_SPACING * (entries.len() - 1) as f64;
    let mut x = (page_w - total) / 2.0;
    entries
        .into_iter()
        .zip(widths)
        .map(|((glyph, label), width)| {
            let entry = LegendEntry { label, glyph, x, y };
            x += width + LEGEND_SPACING;
            entry
        })
        .collect()
}
