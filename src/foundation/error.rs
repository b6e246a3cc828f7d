use std::fmt;

use crate::foundation::core::Point;

/// Convenience result type used across diabloc.
pub type DiablocResult<T> = Result<T, DiablocError>;

/// Top-level error taxonomy used by the public entry points.
#[derive(thiserror::Error, Debug)]
pub enum DiablocError {
    /// The JSON value does not describe a valid diagram.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The diagram decoded but could not be laid out.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors while turning primitives into SVG or pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DiablocError {
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

/// What went wrong while decoding a single property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeErrorKind {
    MissingField,
    WrongType,
    InvalidEnumValue,
    InvalidFormat,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MissingField => "missing field",
            Self::WrongType => "wrong type",
            Self::InvalidEnumValue => "invalid enum value",
            Self::InvalidFormat => "invalid format",
        };
        f.write_str(s)
    }
}

/// One step of the JSON path leading to the offending value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathElem {
    Field(&'static str),
    Index(usize),
}

/// A decode failure with enough context to render a precise diagnostic.
///
/// `context` names the entity being decoded (`"Node"`, `"Endpoint"`, ...),
/// `field` the property that failed (empty when the whole value is at fault),
/// `expected` the accepted type or shape, and `raw` the compact JSON of the
/// value that was inspected.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub path: Vec<PathElem>,
    pub context: &'static str,
    pub field: String,
    pub expected: String,
    pub raw: String,
}

impl DecodeError {
    pub(crate) fn new(
        kind: DecodeErrorKind,
        context: &'static str,
        field: impl Into<String>,
        expected: impl Into<String>,
        raw: &serde_json::Value,
    ) -> Self {
        Self {
            kind,
            path: Vec::new(),
            context,
            field: field.into(),
            expected: expected.into(),
            raw: raw.to_string(),
        }
    }

    /// Prefix the path with the step taken by the enclosing decoder.
    pub(crate) fn within(mut self, elem: PathElem) -> Self {
        self.path.insert(0, elem);
        self
    }

    /// Render the path as `$.nets[0].start`.
    pub fn path_string(&self) -> String {
        let mut s = String::from("$");
        for p in &self.path {
            match p {
                PathElem::Field(name) => {
                    s.push('.');
                    s.push_str(name);
                }
                PathElem::Index(i) => {
                    s.push('[');
                    s.push_str(&i.to_string());
                    s.push(']');
                }
            }
        }
        s
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} for {}", self.path_string(), self.kind, self.context)?;
        if !self.field.is_empty() {
            write!(f, " property \"{}\"", self.field)?;
        }
        write!(f, " (expected {}): {}", self.expected, self.raw)
    }
}

impl std::error::Error for DecodeError {}

/// Failures raised while resolving ports and routing nets.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum LayoutError {
    #[error("can't find node \"{name}\"")]
    NodeNotFound { name: String },

    #[error(
        "can't reach end position: current pos {},{} end pos {},{}",
        .reached.x, .reached.y, .target.x, .target.y
    )]
    /// The segment walk ended at `reached` instead of `target`.
    RoutingUnreachable { reached: Point, target: Point },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
