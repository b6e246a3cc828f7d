use super::*;
use serde_json::json;

#[test]
fn offset_from_number_is_absolute() {
    assert_eq!(decode_offset(&json!(3)).unwrap(), Offset::absolute(3.0));
    assert_eq!(decode_offset(&json!(-2.5)).unwrap(), Offset::absolute(-2.5));
}

#[test]
fn offset_from_string() {
    assert_eq!(decode_offset(&json!("12")).unwrap(), Offset::absolute(12.0));
    assert_eq!(decode_offset(&json!("1.5e1")).unwrap(), Offset::absolute(15.0));
    assert_eq!(decode_offset(&json!("4.")).unwrap(), Offset::absolute(4.0));
    assert_eq!(decode_offset(&json!("50%")).unwrap(), Offset::relative(0.5));
}

#[test]
fn offset_strings_are_unsigned() {
    for bad in ["abc", "-5", "5 %", "%", "", ".5", "5%%", "1E5", "٣"] {
        let err = decode_offset(&json!(bad)).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::InvalidFormat, "{bad:?}");
        assert_eq!(err.context, "Offset");
    }
}

#[test]
fn offset_from_object() {
    assert_eq!(
        decode_offset(&json!({"type": "relative", "value": -0.25})).unwrap(),
        Offset::relative(-0.25)
    );
    assert_eq!(
        decode_offset(&json!({"type": "absolut", "value": 7})).unwrap(),
        Offset::absolute(7.0)
    );
}

#[test]
fn offset_object_errors() {
    let err = decode_offset(&json!({"value": 1})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingField);
    assert_eq!(err.field, "type");

    let err = decode_offset(&json!({"type": "relative", "value": "1"})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::WrongType);
    assert_eq!(err.field, "value");

    let err = decode_offset(&json!({"type": "sideways", "value": 1})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::InvalidEnumValue);
    assert_eq!(err.raw, "\"sideways\"");

    let err = decode_offset(&json!(true)).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::WrongType);
    assert_eq!(err.raw, "true");
}

#[test]
fn port_from_string_is_center_port() {
    assert_eq!(
        decode_port_position(&json!("a")).unwrap(),
        PortPosition::Offset(OffsetPort::center("a"))
    );
}

#[test]
fn port_with_edge_reads_offset_field() {
    // The offset comes from "offset", not from the "edge" string.
    let port = decode_port_position(&json!({"node": "a", "edge": "east", "offset": "25%"})).unwrap();
    assert_eq!(
        port,
        PortPosition::Offset(OffsetPort {
            node: "a".to_string(),
            edge: Edge::East,
            offset: Offset::relative(0.25),
        })
    );

    let port = decode_port_position(&json!({"node": "a", "edge": "north"})).unwrap();
    assert_eq!(
        port,
        PortPosition::Offset(OffsetPort {
            node: "a".to_string(),
            edge: Edge::North,
            offset: Offset::default(),
        })
    );
}

#[test]
fn port_edge_wins_over_angle() {
    let port = decode_port_position(&json!({"node": "a", "edge": "west", "angle": 90})).unwrap();
    assert!(matches!(port, PortPosition::Offset(OffsetPort { edge: Edge::West, .. })));
}

#[test]
fn port_with_non_string_edge_falls_through() {
    let port = decode_port_position(&json!({"node": "a", "edge": 3, "angle": 45})).unwrap();
    assert_eq!(
        port,
        PortPosition::Angle(AnglePort {
            node: "a".to_string(),
            angle: 45.0,
        })
    );

    let port = decode_port_position(&json!({"node": "a", "edge": 3})).unwrap();
    assert_eq!(port, PortPosition::Offset(OffsetPort::center("a")));
}

#[test]
fn port_errors() {
    let err = decode_port_position(&json!({"edge": "east"})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingField);
    assert_eq!(err.context, "Endpoint");
    assert_eq!(err.field, "node");

    let err = decode_port_position(&json!({"node": "a", "edge": "up"})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::InvalidEnumValue);
    assert_eq!(err.context, "Edge");

    let err = decode_port_position(&json!({"node": "a", "angle": "north"})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::WrongType);
    assert_eq!(err.field, "angle");

    let err = decode_port_position(&json!({"node": "a", "edge": "east", "offset": "x"}))
        .unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::InvalidFormat);
    assert_eq!(err.path_string(), "$.offset");

    let err = decode_port_position(&json!(5)).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::WrongType);
}

#[test]
fn segment_from_tag() {
    assert_eq!(
        decode_segment(&json!("-")).unwrap(),
        Segment::new(SegmentType::Horizontal)
    );
    assert_eq!(
        decode_segment(&json!("/")).unwrap(),
        Segment::new(SegmentType::Direct)
    );

    let err = decode_segment(&json!("x")).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::InvalidEnumValue);
    assert_eq!(err.context, "SegmentType");
}

#[test]
fn segment_object_copies_numeric_lengths_only() {
    let seg = decode_segment(&json!({"type": "|", "minLength": 5, "maxLength": "9", "length": 7.5}))
        .unwrap();
    assert_eq!(seg.kind, SegmentType::Vertical);
    assert_eq!(seg.min_length, Some(5.0));
    assert_eq!(seg.max_length, None);
    assert_eq!(seg.length, Some(7.5));
}

#[test]
fn segment_object_errors() {
    let err = decode_segment(&json!({"length": 3})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingField);
    assert_eq!(err.field, "type");

    let err = decode_segment(&json!([])).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::WrongType);
}

#[test]
fn block_requires_all_fields() {
    let err = decode_block(&json!({})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingField);
    assert_eq!(err.field, "name");
    assert_eq!(err.context, "Node");

    let err = decode_block(&json!({"name": "a", "x": 0, "y": 0, "w": "10", "h": 5})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::WrongType);
    assert_eq!(err.field, "w");

    let err = decode_block(&json!({"name": "a", "x": 0, "y": 0, "w": 10})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingField);
    assert_eq!(err.field, "h");

    let block = decode_block(&json!({"name": "a", "x": 1, "y": 2, "w": 3, "h": 4})).unwrap();
    assert_eq!(block, Block::new("a", 1.0, 2.0, 3.0, 4.0));
}

#[test]
fn net_segments_from_string_array_or_default() {
    let net = decode_net(&json!({"start": "a", "end": "b", "segments": "-|-"})).unwrap();
    let kinds: Vec<_> = net.segments.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        [SegmentType::Horizontal, SegmentType::Vertical, SegmentType::Horizontal]
    );

    let net = decode_net(&json!({"start": "a", "end": "b", "segments": ["|", {"type": "-"}]}))
        .unwrap();
    assert_eq!(net.segments.len(), 2);

    let net = decode_net(&json!({"start": "a", "end": "b"})).unwrap();
    assert_eq!(net.segments, vec![Segment::new(SegmentType::Direct)]);

    let net = decode_net(&json!({"start": "a", "end": "b", "segments": 4})).unwrap();
    assert_eq!(net.segments, vec![Segment::new(SegmentType::Direct)]);

    let net = decode_net(&json!({"start": "a", "end": "b", "segments": ""})).unwrap();
    assert!(net.segments.is_empty());
}

#[test]
fn net_errors_carry_path() {
    let err = decode_net(&json!({"start": "a"})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingField);
    assert_eq!(err.field, "end");

    let err = decode_net(&json!({"start": "a", "end": "b", "segments": "-x"})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::InvalidEnumValue);
    assert_eq!(err.path_string(), "$.segments[1]");

    let err = decode_net(&json!({"start": {"edge": "east"}, "end": "b"})).unwrap_err();
    assert_eq!(err.path_string(), "$.start");
}

#[test]
fn data_decodes_nodes_and_optional_nets() {
    let data = decode_data(&json!({
        "nodes": [
            {"name": "a", "x": 0, "y": 0, "w": 10, "h": 10},
            {"name": "b", "x": 40, "y": 0, "w": 10, "h": 10}
        ],
        "nets": [{"start": "a", "end": "b"}]
    }))
    .unwrap();
    assert_eq!(data.nodes.len(), 2);
    assert_eq!(data.nets.len(), 1);

    let data = decode_data(&json!({"nodes": [], "nets": "nope"})).unwrap();
    assert!(data.nets.is_empty());
}

#[test]
fn data_errors() {
    let err = decode_data(&json!({})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingField);
    assert_eq!(err.field, "nodes");

    let err = decode_data(&json!({"nodes": {}})).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::WrongType);

    let err = decode_data(&json!({
        "nodes": [{"name": "a", "x": 0, "y": 0, "w": 10, "h": 10}],
        "nets": [{"start": "a", "end": "a"}, {"start": "a", "end": {"node": "a", "edge": "in"}}]
    }))
    .unwrap_err();
    assert_eq!(err.path_string(), "$.nets[1].end");
    assert_eq!(err.kind, DecodeErrorKind::InvalidEnumValue);

    let err = decode_data(&json!([])).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::WrongType);
}

#[test]
fn decoding_is_repeatable() {
    let raw = json!({
        "nodes": [{"name": "a", "x": 0, "y": 0, "w": 10, "h": 10}],
        "nets": [{"start": {"node": "a", "angle": 30}, "end": "a", "segments": "/"}]
    });
    assert_eq!(decode(&raw).unwrap(), decode(&raw).unwrap());
}

#[test]
fn from_json_str_separates_syntax_and_shape_errors() {
    assert!(matches!(
        Data::from_json_str("{"),
        Err(DiablocError::Serde(_))
    ));
    assert!(matches!(
        Data::from_json_str("{}"),
        Err(DiablocError::Decode(_))
    ));
}
