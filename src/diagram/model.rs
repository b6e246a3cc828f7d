use crate::foundation::core::{Point, Rect, Size, sign};

/// How an [`Offset`] value is interpreted against the available span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetType {
    /// Plain distance, clamped to the span. Spelled `"absolut"` in diagram files.
    #[serde(rename = "absolut")]
    Absolute,
    /// Fraction of the span, expected in `[-1, 1]`.
    Relative,
}

impl OffsetType {
    pub const TAGS: [&'static str; 2] = ["absolut", "relative"];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "absolut" => Some(Self::Absolute),
            "relative" => Some(Self::Relative),
            _ => None,
        }
    }
}

/// Signed displacement along one axis of a block edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Offset {
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: OffsetType,
}

impl Offset {
    pub fn absolute(value: f64) -> Self {
        Self {
            value,
            kind: OffsetType::Absolute,
        }
    }

    pub fn relative(value: f64) -> Self {
        Self {
            value,
            kind: OffsetType::Relative,
        }
    }

    /// Resolve against the half-span `max`.
    ///
    /// Absolute values pass through while `|value| < |max|`; otherwise they
    /// saturate to `max` when the signs agree and to `-max` when they don't.
    /// Relative values scale `max`.
    pub fn resolve(&self, max: f64) -> f64 {
        match self.kind {
            OffsetType::Absolute => {
                if self.value.abs() < max.abs() {
                    self.value
                } else if sign(self.value) == sign(max) {
                    max
                } else {
                    -max
                }
            }
            OffsetType::Relative => max * self.value,
        }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::relative(0.0)
    }
}

/// Rectangle side a port attaches to. `None` means the block center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[default]
    None,
    North,
    East,
    South,
    West,
}

impl Edge {
    pub const TAGS: [&'static str; 5] = ["none", "north", "east", "south", "west"];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "none" => Some(Self::None),
            "north" => Some(Self::North),
            "east" => Some(Self::East),
            "south" => Some(Self::South),
            "west" => Some(Self::West),
            _ => None,
        }
    }
}

/// A named rectangular node.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Block {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Block {
    pub fn new(name: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            w,
            h,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size((self.x, self.y), self.size())
    }
}

/// Port placed on an edge, shifted along it by `offset`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OffsetPort {
    pub node: String,
    pub edge: Edge,
    pub offset: Offset,
}

impl OffsetPort {
    /// Center port of `node`.
    pub fn center(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            edge: Edge::None,
            offset: Offset::default(),
        }
    }
}

/// Port where a ray cast from the block center at `angle` degrees
/// (0 = east, counter-clockwise) leaves the rectangle.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnglePort {
    pub node: String,
    pub angle: f64,
}

/// Where a net attaches to a block. `node` is a name resolved at layout time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PortPosition {
    Offset(OffsetPort),
    Angle(AnglePort),
}

impl PortPosition {
    pub fn node(&self) -> &str {
        match self {
            Self::Offset(p) => &p.node,
            Self::Angle(p) => &p.node,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SegmentType {
    #[serde(rename = "-")]
    Horizontal,
    #[serde(rename = "|")]
    Vertical,
    #[serde(rename = "/")]
    Direct,
}

impl SegmentType {
    pub const TAGS: [&'static str; 3] = ["-", "|", "/"];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "-" => Some(Self::Horizontal),
            "|" => Some(Self::Vertical),
            "/" => Some(Self::Direct),
            _ => None,
        }
    }

    pub fn moves_x(self) -> bool {
        matches!(self, Self::Horizontal | Self::Direct)
    }

    pub fn moves_y(self) -> bool {
        matches!(self, Self::Vertical | Self::Direct)
    }
}

/// One routing step of a net.
///
/// The length fields are carried through from the diagram file; routing
/// splits each axis evenly and does not consult them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentType,
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<f64>,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl Segment {
    pub fn new(kind: SegmentType) -> Self {
        Self {
            kind,
            min_length: None,
            max_length: None,
            length: None,
        }
    }

    pub fn has_length_constraints(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some() || self.length.is_some()
    }
}

/// A wire between two ports.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Net {
    pub start: PortPosition,
    pub end: PortPosition,
    pub segments: Vec<Segment>,
}

/// Root of a decoded diagram.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Data {
    pub nodes: Vec<Block>,
    pub nets: Vec<Net>,
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/model.rs"]
mod tests;
