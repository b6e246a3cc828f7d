//! diabloc turns a declarative JSON description of blocks and wires into
//! drawable geometry.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: `serde_json::Value -> Data` ([`decode()`]), validating every field and
//!    choosing port/segment variants from the fields that are present.
//! 2. **Layout**: `Data -> Vec<Primitive>` ([`layout()`]), resolving each port to a point on
//!    its block and routing each net through its segments.
//! 3. **Render** (optional): primitives to SVG ([`render_svg`]) or pixels ([`rasterize_svg`]).
//!
//! Decoding and layout are pure functions over immutable inputs; they touch no
//! global state and can run concurrently.
#![forbid(unsafe_code)]

mod diagram;
mod foundation;
mod layout;
mod render;

pub use diagram::decode::{
    decode, decode_block, decode_data, decode_net, decode_offset, decode_port_position,
    decode_segment,
};
pub use diagram::model::{
    AnglePort, Block, Data, Edge, Net, Offset, OffsetPort, OffsetType, PortPosition, Segment,
    SegmentType,
};
pub use foundation::core::{Line, Point, Position, Rect, Size, Size2d, Vec2};
pub use foundation::error::{
    DecodeError, DecodeErrorKind, DiablocError, DiablocResult, LayoutError, PathElem,
};
pub use layout::engine::{Primitive, layout};
pub use layout::port::{BlockIndex, resolve_angle_position, resolve_edge_position, resolve_port};
pub use layout::route::{REACH_TOLERANCE, route_between, route_net};
pub use render::raster::{Raster, rasterize_svg};
pub use render::svg::{RenderSettings, diagram_bounds, render_svg};
