//! Validating decoder from untyped JSON into the typed diagram model.
//!
//! Every entity has one entry point that branches on the runtime shape of the
//! value (number, string or object) and either returns the typed value or a
//! [`DecodeError`] describing the first violation. Nothing is returned
//! partially: a composite fails as soon as one of its parts fails.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::diagram::model::{
    AnglePort, Block, Data, Edge, Net, Offset, OffsetPort, OffsetType, PortPosition, Segment,
    SegmentType,
};
use crate::foundation::error::{
    DecodeError, DecodeErrorKind, DiablocError, DiablocResult, PathElem,
};

type Object = Map<String, Value>;

const NUMBER: &str = "number";
const STRING: &str = "string";

/// Unsigned float with optional fraction/exponent, optionally followed by `%`.
fn offset_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9]+(?:\.[0-9]*)?(?:e[+-]?[0-9]+)?)(%)?$")
            .expect("offset pattern compiles")
    })
}

/// Decode an offset from `3`, `"3"`, `"50%"` or `{"type": "relative", "value": 0.5}`.
pub fn decode_offset(value: &Value) -> Result<Offset, DecodeError> {
    match value {
        Value::Number(_) => Ok(Offset::absolute(value.as_f64().unwrap_or_default())),
        Value::String(s) => parse_offset_str(s).ok_or_else(|| {
            DecodeError::new(
                DecodeErrorKind::InvalidFormat,
                "Offset",
                "",
                "a number like \"12.5\" or a percentage like \"50%\"",
                value,
            )
        }),
        Value::Object(obj) => {
            let tag = require_str(obj, value, "type", "Offset")?;
            let amount = require_f64(obj, value, "value", "Offset")?;
            let kind = OffsetType::from_tag(tag)
                .ok_or_else(|| invalid_enum("Offset", "type", &OffsetType::TAGS, &obj["type"]))?;
            Ok(Offset {
                value: amount,
                kind,
            })
        }
        _ => Err(wrong_type("Offset", "number, string or object", value)),
    }
}

fn parse_offset_str(s: &str) -> Option<Offset> {
    let caps = offset_pattern().captures(s)?;
    let n: f64 = caps.get(1)?.as_str().parse().ok()?;
    if caps.get(2).is_some() {
        Some(Offset::relative(n / 100.0))
    } else {
        Some(Offset::absolute(n))
    }
}

/// Decode a net endpoint.
///
/// A bare string names the node and attaches to its center. For objects the
/// variant is chosen by which fields are present: a string `edge` selects an
/// edge port (with optional `offset`), otherwise `angle` selects an angle
/// port, otherwise the port sits at the node center.
pub fn decode_port_position(value: &Value) -> Result<PortPosition, DecodeError> {
    let obj = match value {
        Value::String(node) => return Ok(PortPosition::Offset(OffsetPort::center(node.clone()))),
        Value::Object(obj) => obj,
        _ => return Err(wrong_type("Endpoint", "string or object", value)),
    };

    let node = require_str(obj, value, "node", "Endpoint")?.to_owned();

    if let Some(Value::String(tag)) = obj.get("edge") {
        let edge = Edge::from_tag(tag)
            .ok_or_else(|| invalid_enum("Edge", "edge", &Edge::TAGS, &obj["edge"]))?;
        let offset = match obj.get("offset") {
            Some(raw) => decode_offset(raw).map_err(|e| e.within(PathElem::Field("offset")))?,
            None => Offset::default(),
        };
        return Ok(PortPosition::Offset(OffsetPort { node, edge, offset }));
    }

    if obj.contains_key("angle") {
        let angle = require_f64(obj, value, "angle", "Endpoint")?;
        return Ok(PortPosition::Angle(AnglePort { node, angle }));
    }

    Ok(PortPosition::Offset(OffsetPort::center(node)))
}

/// Decode a routing step from `"-"`, `"|"`, `"/"` or `{"type": "-", "length": 20}`.
pub fn decode_segment(value: &Value) -> Result<Segment, DecodeError> {
    match value {
        Value::String(tag) => SegmentType::from_tag(tag)
            .map(Segment::new)
            .ok_or_else(|| invalid_enum("SegmentType", "", &SegmentType::TAGS, value)),
        Value::Object(obj) => {
            let tag = require_str(obj, value, "type", "Segment")?;
            let kind = SegmentType::from_tag(tag).ok_or_else(|| {
                invalid_enum("SegmentType", "type", &SegmentType::TAGS, &obj["type"])
            })?;
            let optional = |field: &str| obj.get(field).and_then(Value::as_f64);
            Ok(Segment {
                kind,
                min_length: optional("minLength"),
                max_length: optional("maxLength"),
                length: optional("length"),
            })
        }
        _ => Err(wrong_type("Segment", "string or object", value)),
    }
}

pub fn decode_block(value: &Value) -> Result<Block, DecodeError> {
    let obj = value
        .as_object()
        .ok_or_else(|| wrong_type("Node", "object", value))?;

    let name = require_str(obj, value, "name", "Node")?;
    let x = require_f64(obj, value, "x", "Node")?;
    let y = require_f64(obj, value, "y", "Node")?;
    let w = require_f64(obj, value, "w", "Node")?;
    let h = require_f64(obj, value, "h", "Node")?;

    Ok(Block::new(name, x, y, w, h))
}

/// Decode a net. `segments` may be a string of segment tags (`"-|-"`), an
/// array of segment values, or absent, in which case the net is one direct
/// segment.
pub fn decode_net(value: &Value) -> Result<Net, DecodeError> {
    let obj = value
        .as_object()
        .ok_or_else(|| wrong_type("Net", "object", value))?;

    let start = require(obj, value, "start", "Net", "string or object")?;
    let end = require(obj, value, "end", "Net", "string or object")?;

    let start = decode_port_position(start).map_err(|e| e.within(PathElem::Field("start")))?;
    let end = decode_port_position(end).map_err(|e| e.within(PathElem::Field("end")))?;

    let segments = match obj.get("segments") {
        Some(Value::String(tags)) => tags
            .chars()
            .enumerate()
            .map(|(i, c)| {
                decode_segment(&Value::String(c.to_string())).map_err(|e| {
                    e.within(PathElem::Index(i))
                        .within(PathElem::Field("segments"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                decode_segment(item).map_err(|e| {
                    e.within(PathElem::Index(i))
                        .within(PathElem::Field("segments"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => vec![Segment::new(SegmentType::Direct)],
    };

    Ok(Net {
        start,
        end,
        segments,
    })
}

/// Decode a whole diagram: a required `nodes` array and an optional `nets` array.
#[tracing::instrument(skip(value))]
pub fn decode_data(value: &Value) -> Result<Data, DecodeError> {
    let obj = value
        .as_object()
        .ok_or_else(|| wrong_type("Data", "object", value))?;

    let nodes = match obj.get("nodes") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(DecodeError::new(
                DecodeErrorKind::WrongType,
                "Data",
                "nodes",
                "array",
                value,
            ));
        }
        None => {
            return Err(DecodeError::new(
                DecodeErrorKind::MissingField,
                "Data",
                "nodes",
                "array",
                value,
            ));
        }
    };

    let nodes = nodes
        .iter()
        .enumerate()
        .map(|(i, item)| {
            decode_block(item).map_err(|e| {
                e.within(PathElem::Index(i))
                    .within(PathElem::Field("nodes"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let nets = match obj.get("nets") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                decode_net(item).map_err(|e| {
                    e.within(PathElem::Index(i))
                        .within(PathElem::Field("nets"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };

    tracing::debug!(nodes = nodes.len(), nets = nets.len(), "decoded diagram");
    Ok(Data { nodes, nets })
}

/// Entry point used by renderers: decode an already-parsed JSON document.
pub fn decode(raw: &Value) -> Result<Data, DecodeError> {
    decode_data(raw)
}

impl Data {
    /// Parse JSON text and decode it.
    pub fn from_json_str(text: &str) -> DiablocResult<Self> {
        let raw: Value = serde_json::from_str(text).map_err(|e| DiablocError::serde(e.to_string()))?;
        Ok(decode_data(&raw)?)
    }
}

fn require<'a>(
    obj: &'a Object,
    whole: &Value,
    field: &'static str,
    context: &'static str,
    expected: &'static str,
) -> Result<&'a Value, DecodeError> {
    obj.get(field).ok_or_else(|| {
        DecodeError::new(
            DecodeErrorKind::MissingField,
            context,
            field,
            expected,
            whole,
        )
    })
}

fn require_str<'a>(
    obj: &'a Object,
    whole: &Value,
    field: &'static str,
    context: &'static str,
) -> Result<&'a str, DecodeError> {
    require(obj, whole, field, context, STRING)?
        .as_str()
        .ok_or_else(|| DecodeError::new(DecodeErrorKind::WrongType, context, field, STRING, whole))
}

fn require_f64(
    obj: &Object,
    whole: &Value,
    field: &'static str,
    context: &'static str,
) -> Result<f64, DecodeError> {
    require(obj, whole, field, context, NUMBER)?
        .as_f64()
        .ok_or_else(|| DecodeError::new(DecodeErrorKind::WrongType, context, field, NUMBER, whole))
}

fn wrong_type(context: &'static str, expected: &str, value: &Value) -> DecodeError {
    DecodeError::new(DecodeErrorKind::WrongType, context, "", expected, value)
}

fn invalid_enum(context: &'static str, field: &str, tags: &[&str], value: &Value) -> DecodeError {
    let expected = tags
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ");
    DecodeError::new(
        DecodeErrorKind::InvalidEnumValue,
        context,
        field,
        format!("one of {expected}"),
        value,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/decode.rs"]
mod tests;
