//! SVG painter: turns a [`Scene`] into a standalone SVG document
//!
//! Painting is a straight transcription of scene geometry; every
//! coordinate was already decided by the layout stage. Element order
//! fixes the stacking: bands under gridlines, arrows under bars, the
//! today rule above everything in the plot.

use crate::rendering::layout::{LegendGlyph, RowShape, Scene};
use crate::rendering::RenderedChart;
use crate::ChartConfig;

const BG_COLOUR: &str = "#F7F9FC";
const GRID_COLOUR: &str = "#DDE3EC";
const HEADER_BG: &str = "#1B3A6B";
const HEADER_FG: &str = "#FFFFFF";
const ALT_ROW: &str = "#EEF2F8";
const TODAY_COLOUR: &str = "#E05252";
const BORDER_COLOUR: &str = "#C0C8D8";
const CELL_TEXT: &str = "#1E293B";
const TICK_TEXT: &str = "#334155";
const SUBTITLE_TEXT: &str = "#64748B";
const MILESTONE_LEGEND: &str = "#555555";

const TITLE_FONT: f64 = 19.0;
const SUBTITLE_FONT: f64 = 11.0;
const HEADER_FONT: f64 = 10.0;
const CELL_FONT: f64 = 9.0;
const BAR_FONT: f64 = 8.0;
const TICK_FONT: f64 = 9.0;
const LEGEND_FONT: f64 = 10.0;
const TODAY_FONT: f64 = 8.5;

const BAR_CORNER: f64 = 4.0;
const LEGEND_SWATCH_W: f64 = 16.0;
const LEGEND_SWATCH_H: f64 = 11.0;

/// Paint `scene` into a complete SVG document
pub fn paint(scene: &Scene, config: &ChartConfig) -> RenderedChart {
    let w = scene.page_width;
    let h = scene.page_height;
    let font = &config.font_family;
    // Row text shrinks with the row height; page-level text stays fixed
    let cell_font = CELL_FONT.min(scene.row_height * 0.8);
    let bar_font = BAR_FONT.min(scene.row_height * 0.45);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.2}\" height=\"{h:.2}\" viewBox=\"0 0 {w:.2} {h:.2}\">",
    ));
    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"dep-arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"7\" markerHeight=\"7\" orient=\"auto\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{BORDER_COLOUR}\"/></marker>",
    ));
    svg.push_str("</defs>");
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{BG_COLOUR}\"/>"
    ));

    // Title block
    svg.push_str(&centered_text(
        scene.title.x,
        scene.title.title_y,
        &scene.title.title,
        font,
        TITLE_FONT,
        HEADER_BG,
        true,
    ));
    svg.push_str(&centered_text(
        scene.title.x,
        scene.title.subtitle_y,
        &scene.title.subtitle,
        font,
        SUBTITLE_FONT,
        SUBTITLE_TEXT,
        false,
    ));

    // Header band with column titles and the timeline caption
    let header = &scene.header;
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{HEADER_BG}\"/>",
        header.x, header.y, header.width, header.height
    ));
    for column in &scene.panel.columns {
        svg.push_str(&centered_text(
            column.x + column.width / 2.0,
            header.center_y(),
            &column.title,
            font,
            HEADER_FONT,
            HEADER_FG,
            true,
        ));
    }
    svg.push_str(&centered_text(
        scene.axis.body.center_x(),
        header.center_y(),
        "Project Timeline",
        font,
        HEADER_FONT,
        HEADER_FG,
        true,
    ));

    // Alternating row bands; odd rows keep the page background
    for (i, row) in scene.rows.iter().enumerate() {
        if i % 2 == 0 {
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{ALT_ROW}\"/>",
                row.band.x, row.band.y, row.band.width, row.band.height
            ));
        }
    }

    // Monthly gridlines, clipped to the plot area
    let body = &scene.axis.body;
    for tick in &scene.axis.ticks {
        if tick.x < body.x - 0.5 {
            continue;
        }
        svg.push_str(&format!(
            "<line x1=\"{0:.2}\" y1=\"{1:.2}\" x2=\"{0:.2}\" y2=\"{2:.2}\" stroke=\"{GRID_COLOUR}\" stroke-width=\"0.7\"/>",
            tick.x,
            body.y,
            body.bottom()
        ));
    }
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"{BORDER_COLOUR}\" stroke-width=\"1\"/>",
        body.x, body.y, body.width, body.height
    ));

    // Panel cell texts
    for row in &scene.rows {
        for (column, value) in scene.panel.columns.iter().zip(&row.cells) {
            svg.push_str(&centered_text(
                column.x + column.width / 2.0,
                row.band.center_y(),
                value,
                font,
                cell_font,
                CELL_TEXT,
                false,
            ));
        }
    }

    // Dependency arrows, under the bars they connect
    for row in &scene.rows {
        if let Some(arrow) = &row.arrow {
            svg.push_str(&format!(
                "<path d=\"{}\" fill=\"none\" stroke=\"{BORDER_COLOUR}\" stroke-width=\"1\" marker-end=\"url(#dep-arrow)\"/>",
                points_to_path(&arrow.points)
            ));
        }
    }

    // Bars and milestones
    for row in &scene.rows {
        let hex = row.color.hex();
        match &row.shape {
            RowShape::Bar { rect, label } => {
                svg.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{BAR_CORNER}\" fill=\"{hex}\" stroke=\"{HEADER_FG}\" stroke-width=\"0.5\"/>",
                    rect.x, rect.y, rect.width, rect.height
                ));
                if let Some(label) = label {
                    svg.push_str(&centered_text(
                        rect.center_x(),
                        rect.center_y(),
                        label,
                        font,
                        bar_font,
                        HEADER_FG,
                        true,
                    ));
                }
            }
            RowShape::Milestone { cx, cy, half } => {
                svg.push_str(&diamond(*cx, *cy, *half, hex));
            }
        }
    }

    // Today rule above the plot contents
    if let Some(today) = &scene.today {
        svg.push_str(&format!(
            "<line x1=\"{0:.2}\" y1=\"{1:.2}\" x2=\"{0:.2}\" y2=\"{2:.2}\" stroke=\"{TODAY_COLOUR}\" stroke-width=\"1.2\" stroke-dasharray=\"5 4\"/>",
            today.x,
            body.y,
            body.bottom()
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{TODAY_FONT}\" fill=\"{TODAY_COLOUR}\">{}</text>",
            today.x + 3.0,
            body.y + 10.0,
            escape_xml(font),
            "Today"
        ));
    }

    // Month labels under the plot
    for tick in &scene.axis.ticks {
        if tick.x < body.x - 0.5 {
            continue;
        }
        svg.push_str(&centered_text(
            tick.x,
            body.bottom() + 11.0,
            &tick.label,
            font,
            TICK_FONT,
            TICK_TEXT,
            false,
        ));
    }

    // Legend
    for entry in &scene.legend {
        match &entry.glyph {
            LegendGlyph::Swatch(colour) => {
                svg.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{LEGEND_SWATCH_W}\" height=\"{LEGEND_SWATCH_H}\" rx=\"2\" fill=\"{}\" stroke=\"{HEADER_FG}\" stroke-width=\"0.6\"/>",
                    entry.x,
                    entry.y - LEGEND_SWATCH_H / 2.0,
                    colour.hex()
                ));
            }
            LegendGlyph::Milestone => {
                svg.push_str(&diamond(
                    entry.x + LEGEND_SWATCH_W / 2.0,
                    entry.y,
                    6.0,
                    MILESTONE_LEGEND,
                ));
            }
        }
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{LEGEND_FONT}\" fill=\"{CELL_TEXT}\">{}</text>",
            entry.x + LEGEND_SWATCH_W + 7.0,
            baseline(entry.y, LEGEND_FONT),
            escape_xml(font),
            escape_xml(&entry.label)
        ));
    }

    svg.push_str("</svg>");

    RenderedChart {
        width: scene.page_width.round() as u32,
        height: scene.page_height.round() as u32,
        svg,
    }
}

/// Horizontally centred single-line text, vertically centred on `cy`
fn centered_text(
    cx: f64,
    cy: f64,
    content: &str,
    font: &str,
    size: f64,
    fill: &str,
    bold: bool,
) -> String {
    let weight = if bold { " font-weight=\"bold\"" } else { "" };
    format!(
        "<text x=\"{cx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{size}\"{weight} fill=\"{fill}\">{}</text>",
        baseline(cy, size),
        escape_xml(font),
        escape_xml(content)
    )
}

/// Baseline position that visually centres a line of `size` text on `cy`
fn baseline(cy: f64, size: f64) -> f64 {
    cy + size * 0.35
}

fn diamond(cx: f64, cy: f64, half: f64, fill: &str) -> String {
    format!(
        "<polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{fill}\" stroke=\"{HEADER_FG}\" stroke-width=\"0.6\"/>",
        cx,
        cy - half,
        cx + half,
        cy,
        cx,
        cy + half,
        cx - half,
        cy
    )
}

fn points_to_path(points: &[(f64, f64)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
