//! SVG emission for skyline paths.
//!
//! The library itself only produces vertex lists; this module turns them
//! into path `d` strings and simple standalone documents for the preview
//! and the per-sheet print pages.

use crate::sheets::PageSpec;
use crate::skyline::SkylinePath;
use std::fmt::Write;

/// Render a path's vertices as an SVG `d` attribute: a move-to followed
/// by line-tos, with the closing baseline vertices spelled out.
pub fn path_data(path: &SkylinePath) -> String {
    let mut d = String::new();
    for (i, v) in path.vertices.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd} {} {} ", v[0], v[1]);
    }
    d.trim_end().to_string()
}

/// Single-view document containing every row path.
///
/// With `outlines` set the silhouettes are stroked only; otherwise they
/// are filled solid black.
pub fn svg_document(paths: &[SkylinePath], width: f32, height: f32, outlines: bool) -> String {
    let fill = if outlines { "none" } else { "black" };
    let mut doc = String::new();
    let _ = writeln!(
        doc,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">"#
    );
    for path in paths {
        let _ = writeln!(
            doc,
            r#"  <path d="{}" fill="{fill}" stroke="black" stroke-width="0.2"/>"#,
            path_data(path)
        );
    }
    doc.push_str("</svg>\n");
    doc
}

/// One print page: paths stroked for cutting, plus the frame around the
/// block area (the page is usually not an exact multiple of the block
/// size, so the frame is smaller than the page).
pub fn sheet_document(paths: &[SkylinePath], page: PageSpec, block_size: u32) -> String {
    let frame_w = (page.width_mm / block_size) * block_size;
    let frame_h = (page.height_mm / block_size) * block_size;

    let mut doc = String::new();
    let _ = writeln!(
        doc,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#,
        w = page.width_mm,
        h = page.height_mm
    );
    for path in paths {
        let _ = writeln!(
            doc,
            r#"  <path d="{}" fill="none" stroke="black" stroke-width="0.2"/>"#,
            path_data(path)
        );
    }
    let _ = writeln!(
        doc,
        r##"  <rect x="0" y="0" width="{frame_w}" height="{frame_h}" fill="none" stroke="#ccc" stroke-width="0.2"/>"##
    );
    doc.push_str("</svg>\n");
    doc
}
