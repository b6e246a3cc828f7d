use crate::diagram::model::{Net, Segment, SegmentType};
use crate::foundation::core::{Line, Point};
use crate::foundation::error::LayoutError;
use crate::layout::port::{BlockIndex, resolve_port};

/// Maximum per-axis distance between the end of the segment walk and the
/// resolved end port.
pub const REACH_TOLERANCE: f64 = 0.1;

/// Resolve both endpoints of `net` and route it.
pub fn route_net(net: &Net, blocks: &BlockIndex<'_>) -> Result<Vec<Line>, LayoutError> {
    let start = resolve_port(&net.start, blocks)?;
    let end = resolve_port(&net.end, blocks)?;
    route_between(start, end, &net.segments)
}

/// Walk `segments` from `start`, splitting each axis' displacement evenly
/// among the segments that move along it, and emit one line per segment.
///
/// `Direct` segments move along both axes. An empty segment list routes as a
/// single straight line.
pub fn route_between(
    start: Point,
    end: Point,
    segments: &[Segment],
) -> Result<Vec<Line>, LayoutError> {
    if segments.is_empty() {
        return Ok(vec![Line::new(start, end)]);
    }

    let h_segs = segments.iter().filter(|s| s.kind.moves_x()).count();
    let v_segs = segments.iter().filter(|s| s.kind.moves_y()).count();

    let h_step = if h_segs > 0 {
        (end.x - start.x) / h_segs as f64
    } else {
        0.0
    };
    let v_step = if v_segs > 0 {
        (end.y - start.y) / v_segs as f64
    } else {
        0.0
    };

    let mut lines = Vec::with_capacity(segments.len());
    let mut pos = start;
    for seg in segments {
        if seg.has_length_constraints() {
            tracing::debug!(?seg, "segment length constraints are not applied");
        }
        let mut next = pos;
        match seg.kind {
            SegmentType::Horizontal => next.x += h_step,
            SegmentType::Vertical => next.y += v_step,
            SegmentType::Direct => {
                next.x += h_step;
                next.y += v_step;
            }
        }
        lines.push(Line::new(pos, next));
        pos = next;
    }

    // Written so that a NaN position fails the check.
    let reached =
        (pos.x - end.x).abs() <= REACH_TOLERANCE && (pos.y - end.y).abs() <= REACH_TOLERANCE;
    if !reached {
        return Err(LayoutError::RoutingUnreachable {
            reached: pos,
            target: end,
        });
    }

    Ok(lines)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/route.rs"]
mod tests;
