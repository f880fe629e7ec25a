//! PNG rasterization of painted charts via resvg

use log::debug;

use crate::error::{Error, Result};
use crate::rendering::RenderedChart;
use crate::ChartConfig;

/// Rasterize `chart` to PNG bytes at its native page size
///
/// Text is shaped with whatever system fonts are installed; on a host
/// with none, shapes still rasterize and text is simply absent.
pub fn rasterize(chart: &RenderedChart, config: &ChartConfig) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.font_family = config.font_family.clone();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(&chart.svg, &opt)
        .map_err(|e| Error::Render(format!("SVG parse failed: {e}")))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| Error::Render("failed to allocate pixmap".to_string()))?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );
    debug!("rasterized {}x{} chart", size.width(), size.height());

    pixmap
        .encode_png()
        .map_err(|e| Error::Render(format!("PNG encoding failed: {e}")))
}
