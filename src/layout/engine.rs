use crate::diagram::model::Data;
use crate::foundation::core::{Line, Point};
use crate::foundation::error::LayoutError;
use crate::layout::port::BlockIndex;
use crate::layout::route::route_net;

/// A drawable produced by [`layout`]. Renderers map these 1:1 to output.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Rectangle { x: f64, y: f64, w: f64, h: f64 },
    Line { from: Point, to: Point },
}

impl From<Line> for Primitive {
    fn from(line: Line) -> Self {
        Self::Line {
            from: line.p0,
            to: line.p1,
        }
    }
}

/// Lay out a decoded diagram.
///
/// Output is in paint order: every net's lines (nets and their segments in
/// input order), then one rectangle per block so blocks cover wire ends that
/// attach to their centers. Any failing net fails the whole pass.
#[tracing::instrument(skip(data), fields(nodes = data.nodes.len(), nets = data.nets.len()))]
pub fn layout(data: &Data) -> Result<Vec<Primitive>, LayoutError> {
    let index = BlockIndex::new(&data.nodes);
    let mut out = Vec::with_capacity(data.nodes.len() + data.nets.len());

    for (i, net) in data.nets.iter().enumerate() {
        let lines = route_net(net, &index).inspect_err(|e| {
            tracing::debug!(net = i, error = %e, "net routing failed");
        })?;
        tracing::trace!(net = i, lines = lines.len(), "routed net");
        out.extend(lines.into_iter().map(Primitive::from));
    }

    out.extend(data.nodes.iter().map(|b| Primitive::Rectangle {
        x: b.x,
        y: b.y,
        w: b.w,
        h: b.h,
    }));

    tracing::debug!(primitives = out.len(), "layout complete");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
