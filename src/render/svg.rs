use crate::foundation::core::{Point, Rect};
use crate::layout::engine::Primitive;

/// Presentation knobs for SVG output.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    /// Padding added around the primitives' bounding box.
    pub margin: f64,
    pub stroke_width: f64,
    pub block_fill: String,
    pub stroke: String,
    /// Fill for the whole viewport; transparent when `None`.
    pub background: Option<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            margin: 10.0,
            stroke_width: 1.0,
            block_fill: "white".to_string(),
            stroke: "black".to_string(),
            background: None,
        }
    }
}

/// Bounding box of all primitives, or `None` when there are none.
pub fn diagram_bounds(primitives: &[Primitive]) -> Option<Rect> {
    primitives
        .iter()
        .map(|p| match *p {
            Primitive::Rectangle { x, y, w, h } => Rect::new(x, y, x + w, y + h).abs(),
            Primitive::Line { from, to } => Rect::from_points(from, to),
        })
        .reduce(|acc, r| acc.union(r))
}

/// Serialize primitives as a standalone SVG document, in primitive order.
pub fn render_svg(primitives: &[Primitive], settings: &RenderSettings) -> String {
    let view = diagram_bounds(primitives)
        .map(|r| r.inflate(settings.margin, settings.margin))
        .unwrap_or(Rect::ZERO);

    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\">\n",
        view.width(),
        view.height(),
        view.x0,
        view.y0,
        view.width(),
        view.height()
    ));

    if let Some(bg) = &settings.background {
        out.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" style=\"fill:{}\"/>\n",
            view.x0,
            view.y0,
            view.width(),
            view.height(),
            escape_attr(bg)
        ));
    }

    let stroke = escape_attr(&settings.stroke);
    let fill = escape_attr(&settings.block_fill);
    for p in primitives {
        match *p {
            Primitive::Rectangle { x, y, w, h } => out.push_str(&format!(
                "  <rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" style=\"fill:{fill};stroke:{stroke};stroke-width:{}\"/>\n",
                settings.stroke_width
            )),
            Primitive::Line { from, to } => out.push_str(&line_element(from, to, &stroke, settings.stroke_width)),
        }
    }

    out.push_str("</svg>\n");
    out
}

fn line_element(from: Point, to: Point, stroke: &str, width: f64) -> String {
    format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" style=\"stroke:{stroke};stroke-width:{width}\"/>\n",
        from.x, from.y, to.x, to.y
    )
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
