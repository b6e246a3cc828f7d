use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::diagram::model::{Block, Edge, Offset, PortPosition};
use crate::foundation::core::Point;
use crate::foundation::error::LayoutError;

/// Name -> block lookup built once per layout pass.
///
/// When several blocks share a name the first one wins.
#[derive(Clone, Debug, Default)]
pub struct BlockIndex<'a> {
    by_name: HashMap<&'a str, &'a Block>,
}

impl<'a> BlockIndex<'a> {
    pub fn new(blocks: &'a [Block]) -> Self {
        let mut by_name = HashMap::with_capacity(blocks.len());
        for block in blocks {
            by_name.entry(block.name.as_str()).or_insert(block);
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Result<&'a Block, LayoutError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::NodeNotFound {
                name: name.to_owned(),
            })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Point on `edge` of `block`, shifted along the edge by `offset`.
///
/// Offsets are resolved against half the block height on every edge,
/// north and south included.
pub fn resolve_edge_position(block: &Block, edge: Edge, offset: Offset) -> Point {
    let mut pos = block.center();
    let half_h = block.h / 2.0;

    match edge {
        Edge::None => {}
        Edge::East => {
            pos.x = block.x + block.w;
            pos.y += offset.resolve(half_h);
        }
        Edge::West => {
            pos.x = block.x;
            pos.y += offset.resolve(half_h);
        }
        Edge::North => {
            pos.y = block.y;
            pos.x += offset.resolve(half_h);
        }
        Edge::South => {
            pos.y = block.y + block.h;
            pos.x += offset.resolve(half_h);
        }
    }
    pos
}

/// Point where a ray from the block center at `angle` degrees leaves the block.
///
/// 0° points east and angles grow counter-clockwise on screen. Blocks with
/// zero width or height are not supported.
pub fn resolve_angle_position(block: &Block, angle: f64) -> Point {
    let rad = angle * PI / 180.0;

    let y_offset = block.w / 2.0 * rad.tan();
    let y_edge = if rad.cos() > 0.0 { Edge::East } else { Edge::West };

    if y_offset.abs() < block.h / 2.0 {
        let signed = if y_edge == Edge::East { -y_offset } else { y_offset };
        return resolve_edge_position(block, y_edge, Offset::absolute(signed));
    }

    let x_offset = block.h / 2.0 * (FRAC_PI_2 - rad).tan();
    let x_edge = if rad.sin() > 0.0 { Edge::North } else { Edge::South };
    let signed = if x_edge == Edge::South { -x_offset } else { x_offset };
    resolve_edge_position(block, x_edge, Offset::absolute(signed))
}

/// Resolve a port against the block it names.
pub fn resolve_port(port: &PortPosition, blocks: &BlockIndex<'_>) -> Result<Point, LayoutError> {
    let block = blocks.get(port.node())?;
    Ok(match port {
        PortPosition::Offset(p) => resolve_edge_position(block, p.edge, p.offset),
        PortPosition::Angle(p) => resolve_angle_position(block, p.angle),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/port.rs"]
mod tests;
