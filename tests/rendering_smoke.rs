use chrono::NaiveDate;

use gantry::{starter_project, GanttEngine, ProjectSize};

fn anchor() -> NaiveDate {
    // Starter tasks begin five days later, so the domain crosses into June
    NaiveDate::from_ymd_opt(2024, 5, 20).expect("valid date")
}

#[test]
fn svg_contains_the_chart_furniture() {
    let tasks = starter_project(ProjectSize::Small, anchor());
    let mut engine = GanttEngine::default();
    engine.render(&tasks).expect("render starter project");
    let bytes = engine.export_svg().expect("export svg");
    let svg = String::from_utf8(bytes).expect("svg is utf-8");

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Project Gantt Chart"), "missing title");
    assert!(svg.contains("Project Timeline"), "missing header caption");
    assert!(svg.contains("T-001"), "missing panel id column");
    assert!(svg.contains("Jun &apos;24"), "missing month label");
    assert!(svg.contains("Dark Blue"), "missing palette legend entry");
    assert!(svg.contains("Milestone"), "missing milestone legend entry");
}

#[cfg(feature = "raster")]
#[test]
fn png_export_decodes_to_the_page() {
    let tasks = starter_project(ProjectSize::Small, anchor());
    let mut engine = GanttEngine::default();
    engine.render(&tasks).expect("render starter project");
    let png_data = engine.export_png().expect("export png");

    assert!(png_data.len() > 100, "PNG data seems too small");
    assert_eq!(&png_data[0..8], b"\x89PNG\r\n\x1a\n");

    let decoder = png::Decoder::new(&png_data[..]);
    let mut reader = decoder.read_info().expect("decode");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("frame");
    let bytes = &buf[..info.buffer_size()];

    // A3 landscape at 96 dpi
    assert_eq!(info.width, 1588);
    assert_eq!(info.height, 1122);

    // Look for a bar pixel (dark blue) and a background pixel
    let mut found_bar = false;
    let mut found_background = false;
    for chunk in bytes.chunks(4) {
        if chunk == [0x1B, 0x3A, 0x6B, 0xFF] {
            found_bar = true;
        }
        if chunk == [0xF7, 0xF9, 0xFC, 0xFF] {
            found_background = true;
        }
        if found_bar && found_background {
            break;
        }
    }
    assert!(found_bar, "Expected dark blue bar pixels in PNG");
    assert!(found_background, "Expected page background pixels in PNG");
}
