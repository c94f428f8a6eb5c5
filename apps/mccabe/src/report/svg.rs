//! # SVG Diagram
//!
//! Draws the McCabe-Thiele construction as a standalone SVG document:
//!
//! - equilibrium curve, diagonal `y = x`, both operating lines over `[0, 1]`
//! - vertical q-line at xF
//! - stage staircase as explicit horizontal and vertical segments
//! - markers at `(xD, xD)`, `(xB, xB)` and the feed intersection
//! - legend (lower right) and annotation box (upper left)
//!
//! The plot area is square and spans `[-0.02, 1.02]` on both axes.

use mccabe_core::{Construction, MoveKind, Point, ThieleError};
use quick_xml::escape::escape;
use std::fmt::Write;

/// Smallest canvas edge in pixels; smaller requests are raised to this.
pub const MIN_DIAGRAM_SIZE: u32 = 240;

const DATA_MIN: f64 = -0.02;
const DATA_MAX: f64 = 1.02;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;

const COLOR_EQUILIBRIUM: &str = "#1f77b4";
const COLOR_DIAGONAL: &str = "#7f7f7f";
const COLOR_RECTIFYING: &str = "#2ca02c";
const COLOR_STRIPPING: &str = "#d62728";
const COLOR_Q_LINE: &str = "#9467bd";
const COLOR_STAGES: &str = "orange";

/// Rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramOptions {
    /// Diagram title.
    pub title: String,
    /// Canvas edge in pixels.
    pub size: u32,
    /// Light component name for axis labels.
    pub component: String,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            title: "McCabe-Thiele diagram".to_string(),
            size: 800,
            component: "n-hexane".to_string(),
        }
    }
}

// =============================================================================
// COORDINATES
// =============================================================================

/// Maps mole fractions to canvas pixels.
#[derive(Debug, Clone, Copy)]
struct Frame {
    size: f64,
    left: f64,
    top: f64,
    side: f64,
}

impl Frame {
    fn new(size: u32) -> Self {
        let size = f64::from(size.max(MIN_DIAGRAM_SIZE));
        Self {
            size,
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            side: size - MARGIN_LEFT - MARGIN_RIGHT,
        }
    }

    fn px(&self, x: f64) -> f64 {
        self.left + (x - DATA_MIN) / (DATA_MAX - DATA_MIN) * self.side
    }

    fn py(&self, y: f64) -> f64 {
        self.top + (DATA_MAX - y) / (DATA_MAX - DATA_MIN) * self.side
    }

    fn right(&self) -> f64 {
        self.left + self.side
    }

    fn bottom(&self) -> f64 {
        self.top + self.side
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render `construction` as an SVG document.
pub fn render_svg(
    construction: &Construction,
    options: &DiagramOptions,
) -> Result<String, ThieleError> {
    let mut out = String::with_capacity(32 * 1024);
    write_document(&mut out, construction, options)
        .map_err(|e| ThieleError::SerializationError(format!("SVG: {}", e)))?;
    Ok(out)
}

fn write_document(
    out: &mut String,
    construction: &Construction,
    options: &DiagramOptions,
) -> std::fmt::Result {
    let frame = Frame::new(options.size);

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}" font-family="sans-serif" font-size="12">"#,
        s = frame.size
    )?;
    writeln!(out, "<title>{}</title>", escape(&options.title))?;
    writeln!(
        out,
        r#"<defs><clipPath id="plot-area"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath></defs>"#,
        frame.left, frame.top, frame.side, frame.side
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

    write_axes(out, &frame, options)?;
    write_series(out, &frame, construction)?;
    write_markers(out, &frame, construction)?;
    write_legend(out, &frame, construction)?;
    write_annotation(out, &frame, construction)?;

    writeln!(out, "</svg>")
}

fn write_axes(out: &mut String, frame: &Frame, options: &DiagramOptions) -> std::fmt::Result {
    writeln!(
        out,
        r#"<text class="title" x="{:.2}" y="{:.2}" text-anchor="middle" font-size="16">{}</text>"#,
        frame.left + frame.side / 2.0,
        frame.top / 2.0 + 6.0,
        escape(&options.title)
    )?;

    writeln!(out, r##"<g class="grid" stroke="#dddddd" stroke-width="1">"##)?;
    for i in 0..=10_u8 {
        let v = f64::from(i) / 10.0;
        writeln!(
            out,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
            frame.px(v),
            frame.top,
            frame.px(v),
            frame.bottom()
        )?;
        writeln!(
            out,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
            frame.left,
            frame.py(v),
            frame.right(),
            frame.py(v)
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, r#"<g class="ticks" fill="black">"#)?;
    for i in 0..=5_u8 {
        let v = f64::from(i) / 5.0;
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{:.1}</text>"#,
            frame.px(v),
            frame.bottom() + 16.0,
            v
        )?;
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{:.1}</text>"#,
            frame.left - 6.0,
            frame.py(v) + 4.0,
            v
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(
        out,
        r#"<rect class="frame" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="black"/>"#,
        frame.left, frame.top, frame.side, frame.side
    )?;

    let component = escape(&options.component);
    writeln!(
        out,
        r#"<text class="x-label" x="{:.2}" y="{:.2}" text-anchor="middle">x (liquid mole fraction {})</text>"#,
        frame.left + frame.side / 2.0,
        frame.bottom() + 38.0,
        component
    )?;
    let (lx, ly) = (frame.left - 44.0, frame.top + frame.side / 2.0);
    writeln!(
        out,
        r#"<text class="y-label" x="{lx:.2}" y="{ly:.2}" text-anchor="middle" transform="rotate(-90 {lx:.2} {ly:.2})">y (vapor mole fraction {c})</text>"#,
        lx = lx,
        ly = ly,
        c = component
    )
}

fn write_line(
    out: &mut String,
    frame: &Frame,
    class: &str,
    from: Point,
    to: Point,
    style: &str,
) -> std::fmt::Result {
    writeln!(
        out,
        r#"<line class="{}" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {}/>"#,
        class,
        frame.px(from.x),
        frame.py(from.y),
        frame.px(to.x),
        frame.py(to.y),
        style
    )
}

fn write_series(out: &mut String, frame: &Frame, construction: &Construction) -> std::fmt::Result {
    let lines = construction.lines();
    let spec = construction.spec();

    writeln!(out, r#"<g clip-path="url(#plot-area)" fill="none">"#)?;

    let mut polyline = String::new();
    for p in construction.table().points() {
        write!(polyline, "{:.2},{:.2} ", frame.px(p.x), frame.py(p.y))?;
    }
    writeln!(
        out,
        r#"<polyline class="equilibrium" points="{}" stroke="{}" stroke-width="2"/>"#,
        polyline.trim_end(),
        COLOR_EQUILIBRIUM
    )?;

    write_line(
        out,
        frame,
        "diagonal",
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        &format!(
            r#"stroke="{}" stroke-width="1.5" stroke-dasharray="6 4""#,
            COLOR_DIAGONAL
        ),
    )?;
    write_line(
        out,
        frame,
        "rectifying",
        Point::new(0.0, lines.y_rect(0.0)),
        Point::new(1.0, lines.y_rect(1.0)),
        &format!(r#"stroke="{}" stroke-width="1.5""#, COLOR_RECTIFYING),
    )?;
    write_line(
        out,
        frame,
        "stripping",
        Point::new(0.0, lines.y_strip(0.0)),
        Point::new(1.0, lines.y_strip(1.0)),
        &format!(r#"stroke="{}" stroke-width="1.5""#, COLOR_STRIPPING),
    )?;
    write_line(
        out,
        frame,
        "q-line",
        Point::new(spec.xf(), 0.0),
        Point::new(spec.xf(), 1.0),
        &format!(
            r#"stroke="{}" stroke-width="1.5" stroke-dasharray="2 3""#,
            COLOR_Q_LINE
        ),
    )?;

    let stage_style = format!(r#"stroke="{}" stroke-width="1.5""#, COLOR_STAGES);
    for segment in construction.trace().segments() {
        let class = match segment.kind {
            MoveKind::Horizontal => "stage-horizontal",
            MoveKind::Vertical => "stage-vertical",
        };
        write_line(out, frame, class, segment.from, segment.to, &stage_style)?;
    }

    writeln!(out, "</g>")
}

/// Marker shapes take their `class` so plot markers and legend glyphs stay
/// distinguishable.
fn write_diamond(
    out: &mut String,
    class: &str,
    cx: f64,
    cy: f64,
    r: f64,
    color: &str,
) -> std::fmt::Result {
    writeln!(
        out,
        r#"<polygon class="{}" points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{}"/>"#,
        class,
        cx,
        cy - r,
        cx + r,
        cy,
        cx,
        cy + r,
        cx - r,
        cy,
        color
    )
}

fn write_square(
    out: &mut String,
    class: &str,
    cx: f64,
    cy: f64,
    r: f64,
    color: &str,
) -> std::fmt::Result {
    writeln!(
        out,
        r#"<rect class="{}" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
        class,
        cx - r,
        cy - r,
        2.0 * r,
        2.0 * r,
        color
    )
}

fn write_circle(
    out: &mut String,
    class: &str,
    cx: f64,
    cy: f64,
    r: f64,
    color: &str,
) -> std::fmt::Result {
    writeln!(
        out,
        r#"<circle class="{}" cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
        class, cx, cy, r, color
    )
}

fn write_markers(out: &mut String, frame: &Frame, construction: &Construction) -> std::fmt::Result {
    let spec = construction.spec();
    let feed = construction.lines().feed_point();

    let (xd, xb) = (spec.xd(), spec.xb());
    write_diamond(out, "marker-xd", frame.px(xd), frame.py(xd), 6.0, "green")?;
    write_square(out, "marker-xb", frame.px(xb), frame.py(xb), 5.0, "purple")?;
    write_circle(out, "marker-feed", frame.px(feed.x), frame.py(feed.y), 5.0, "red")
}

enum LegendGlyph {
    Line(&'static str, &'static str),
    Diamond(&'static str),
    Square(&'static str),
    Circle(&'static str),
}

fn write_legend(out: &mut String, frame: &Frame, construction: &Construction) -> std::fmt::Result {
    const GLYPH: &str = "legend-glyph";

    let entries = [
        (
            LegendGlyph::Line(COLOR_EQUILIBRIUM, ""),
            "Equilibrium curve".to_string(),
        ),
        (
            LegendGlyph::Line(COLOR_DIAGONAL, "6 4"),
            "Diagonal y = x".to_string(),
        ),
        (
            LegendGlyph::Line(COLOR_RECTIFYING, ""),
            format!("Rectifying (R = {})", construction.spec().reflux_ratio()),
        ),
        (
            LegendGlyph::Line(COLOR_STRIPPING, ""),
            "Stripping (anchored at xB)".to_string(),
        ),
        (
            LegendGlyph::Line(COLOR_Q_LINE, "2 3"),
            "q-line (q = 1)".to_string(),
        ),
        (LegendGlyph::Line(COLOR_STAGES, ""), "Stages".to_string()),
        (LegendGlyph::Diamond("green"), "xD".to_string()),
        (LegendGlyph::Square("purple"), "xB".to_string()),
        (
            LegendGlyph::Circle("red"),
            "Feed intersection (rectifying)".to_string(),
        ),
    ];

    let row = 18.0;
    let width = 230.0;
    let height = row * entries.len() as f64 + 12.0;
    let x0 = frame.right() - width - 10.0;
    let y0 = frame.bottom() - height - 10.0;

    writeln!(out, r#"<g class="legend">"#)?;
    writeln!(
        out,
        r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="white" fill-opacity="0.8" stroke="#cccccc" rx="4"/>"##,
        x0, y0, width, height
    )?;
    for (i, (glyph, label)) in entries.iter().enumerate() {
        let cy = y0 + 6.0 + row * (i as f64 + 0.5);
        let gx = x0 + 20.0;
        match glyph {
            LegendGlyph::Line(color, dash) => {
                let dash_attr = if dash.is_empty() {
                    String::new()
                } else {
                    format!(r#" stroke-dasharray="{}""#, dash)
                };
                writeln!(
                    out,
                    r#"<line class="legend-glyph" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="2"{}/>"#,
                    gx - 12.0,
                    cy,
                    gx + 12.0,
                    cy,
                    color,
                    dash_attr
                )?;
            }
            LegendGlyph::Diamond(color) => write_diamond(out, GLYPH, gx, cy, 5.0, color)?,
            LegendGlyph::Square(color) => write_square(out, GLYPH, gx, cy, 4.0, color)?,
            LegendGlyph::Circle(color) => write_circle(out, GLYPH, gx, cy, 4.0, color)?,
        }
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}">{}</text>"#,
            gx + 20.0,
            cy + 4.0,
            escape(label)
        )?;
    }
    writeln!(out, "</g>")
}

fn write_annotation(
    out: &mut String,
    frame: &Frame,
    construction: &Construction,
) -> std::fmt::Result {
    let lines = construction.summary().annotation_lines();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let row = 16.0;
    let width = longest as f64 * 7.0 + 20.0;
    let height = row * lines.len() as f64 + 12.0;
    let x0 = frame.left + 0.02 * frame.side;
    let y0 = frame.top + 0.05 * frame.side;

    writeln!(out, r#"<g class="annotation">"#)?;
    writeln!(
        out,
        r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="6" fill="wheat" fill-opacity="0.6" stroke="#8b7d6b"/>"##,
        x0, y0, width, height
    )?;
    for (i, line) in lines.iter().enumerate() {
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}">{}</text>"#,
            x0 + 10.0,
            y0 + 6.0 + row * (i as f64 + 1.0) - 3.0,
            escape(line)
        )?;
    }
    writeln!(out, "</g>")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mccabe_core::presets::hexane_cycloheptane;
    use mccabe_core::{DesignSpec, StepConfig};

    fn construction() -> Construction {
        Construction::solve(
            hexane_cycloheptane().expect("table"),
            DesignSpec::new(0.95, 0.05, 0.5, 2.0).expect("spec"),
            StepConfig::default(),
        )
        .expect("solve")
    }

    #[test]
    fn frame_maps_unit_square_inside_plot_area() {
        let frame = Frame::new(800);
        assert!(frame.px(0.0) > frame.left);
        assert!(frame.px(1.0) < frame.right());
        assert!(frame.py(0.0) < frame.bottom());
        assert!(frame.py(1.0) > frame.top);
        assert!((frame.px(0.5) - (frame.left + frame.side / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn small_canvas_is_raised_to_minimum() {
        let frame = Frame::new(10);
        assert_eq!(frame.size, f64::from(MIN_DIAGRAM_SIZE));
        assert!(frame.side > 0.0);
    }

    #[test]
    fn staircase_has_one_element_per_segment() {
        let c = construction();
        let svg = render_svg(&c, &DiagramOptions::default()).expect("svg");
        let stages = svg.matches("class=\"stage-").count();
        assert_eq!(stages, c.trace().segments().len());
        assert_eq!(svg.matches("class=\"stage-horizontal\"").count(), 6);
        assert_eq!(svg.matches("class=\"stage-vertical\"").count(), 5);
    }

    #[test]
    fn document_contains_every_series() {
        let svg = render_svg(&construction(), &DiagramOptions::default()).expect("svg");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        for class in [
            "equilibrium",
            "diagonal",
            "rectifying",
            "stripping",
            "q-line",
            "marker-xd",
            "marker-xb",
            "marker-feed",
            "legend",
            "annotation",
        ] {
            assert!(svg.contains(&format!("class=\"{}\"", class)), "{}", class);
        }
        assert!(svg.contains("Stages (est): 6"));
        assert!(svg.contains("liquid mole fraction n-hexane"));
    }

    #[test]
    fn markers_sit_on_design_points() {
        let c = construction();
        let svg = render_svg(&c, &DiagramOptions::default()).expect("svg");
        let frame = Frame::new(DiagramOptions::default().size);
        let feed = c.lines().feed_point();

        for class in ["marker-xd", "marker-xb", "marker-feed"] {
            assert_eq!(svg.matches(&format!("class=\"{}\"", class)).count(), 1, "{}", class);
        }
        assert_eq!(svg.matches("class=\"legend-glyph\"").count(), 9);

        let diamond = format!(
            r#"class="marker-xd" points="{:.2},{:.2} "#,
            frame.px(0.95),
            frame.py(0.95) - 6.0
        );
        assert!(svg.contains(&diamond), "{}", diamond);

        let square = format!(
            r#"class="marker-xb" x="{:.2}" y="{:.2}" "#,
            frame.px(0.05) - 5.0,
            frame.py(0.05) - 5.0
        );
        assert!(svg.contains(&square), "{}", square);

        let circle = format!(
            r#"class="marker-feed" cx="{:.2}" cy="{:.2}" "#,
            frame.px(feed.x),
            frame.py(feed.y)
        );
        assert!(svg.contains(&circle), "{}", circle);
        assert!((feed.x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn title_is_escaped() {
        let options = DiagramOptions {
            title: "A & B <test>".to_string(),
            ..DiagramOptions::default()
        };
        let svg = render_svg(&construction(), &options).expect("svg");
        assert!(svg.contains("A &amp; B &lt;test&gt;"));
        assert!(!svg.contains("<test>"));
    }
}
