//! SVG output - write a draw list as an SVG document.
//!
//! Uses quick-xml's event writer so attribute values are escaped and the
//! document is always well formed. Outlines are styled through the `seam`
//! class, guide ticks through `sewinguide` plus their own stroke color.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{PatternError, Result};
use crate::geometry::Point;
use crate::pattern::{DrawList, MarkerSegment};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Shared stylesheet: black 1px outlines filled white, 1px guide ticks.
const STYLESHEET: &str =
    ".seam{stroke: #000; stroke-width:1px; fill:white} .sewinguide{stroke-width:1px;}";

/// Render a draw list to an SVG document string.
///
/// The canvas is declared as `viewBox="0 0 width height"` with matching
/// `width`/`height`. Each piece becomes a `<g>` holding its outline path,
/// followed by its guide ticks.
pub fn to_svg(list: &DrawList) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    let width = list.width.to_string();
    let height = list.height.to_string();
    let view_box = format!("0 0 {} {}", list.width, list.height);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", SVG_NS));
    svg.push_attribute(("width", width.as_str()));
    svg.push_attribute(("height", height.as_str()));
    svg.push_attribute(("viewBox", view_box.as_str()));
    writer.write_event(Event::Start(svg)).map_err(xml_error)?;

    write_stylesheet(&mut writer)?;

    for piece in &list.pieces {
        if piece.outline.len() >= 2 {
            writer
                .write_event(Event::Start(BytesStart::new("g")))
                .map_err(xml_error)?;

            let d = path_data(&piece.outline);
            let mut path = BytesStart::new("path");
            path.push_attribute(("class", "seam"));
            path.push_attribute(("d", d.as_str()));
            writer.write_event(Event::Empty(path)).map_err(xml_error)?;

            writer
                .write_event(Event::End(BytesEnd::new("g")))
                .map_err(xml_error)?;
        }

        for marker in &piece.markers {
            write_marker(&mut writer, marker)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .map_err(xml_error)?;

    let mut bytes = writer.into_inner().into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(xml_error)
}

fn write_stylesheet(writer: &mut Writer<Cursor<Vec<u8>>>) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("defs")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("style")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(STYLESHEET)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("style")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("defs")))
        .map_err(xml_error)?;
    Ok(())
}

fn write_marker(writer: &mut Writer<Cursor<Vec<u8>>>, marker: &MarkerSegment) -> Result<()> {
    let color = marker.color.to_hex();
    let d = path_data(&[marker.line.start(), marker.line.end()]);

    let mut path = BytesStart::new("path");
    path.push_attribute(("class", "sewinguide"));
    path.push_attribute(("stroke", color.as_str()));
    path.push_attribute(("d", d.as_str()));
    writer.write_event(Event::Empty(path)).map_err(xml_error)?;
    Ok(())
}

/// Build `d` attribute content: `M x0,y0 L x1,y1 ...`.
///
/// Coordinates use the shortest exact `f64` form, so sub-pixel marker
/// offsets on small canvases survive.
pub fn path_data(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, pt) in points.iter().enumerate() {
        if i == 0 {
            d.push_str(&format!("M {},{}", pt.x, pt.y));
        } else {
            d.push_str(&format!(" L {},{}", pt.x, pt.y));
        }
    }
    d
}

fn xml_error<E: std::fmt::Display>(e: E) -> PatternError {
    PatternError::Svg(e.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
