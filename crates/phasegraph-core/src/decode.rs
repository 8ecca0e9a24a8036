use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::{Edge, GraphState, Node, NodeId};
use crate::stats::SnapshotStats;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("snapshot is not valid JSON (line {line}, column {column}): {message}")]
    ParseFailure {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("snapshot schema violation: {0}")]
    SchemaViolation(String),
}

/// Decodes one snapshot file into a complete [`GraphState`].
///
/// Either every node and edge is materialized or an error is returned; there is
/// no partial result. Edges whose endpoints are missing from the node set are
/// dropped without error and counted in `stats.dropped_edges`. Duplicate node
/// ids resolve to the last record.
pub fn decode(raw: &[u8]) -> Result<GraphState, DecodeError> {
    let root: Value = serde_json::from_slice(raw).map_err(|err| DecodeError::ParseFailure {
        message: err.to_string(),
        line: err.line(),
        column: err.column(),
    })?;

    let Some(obj) = root.as_object() else {
        return Err(DecodeError::SchemaViolation(
            "top-level value must be an object".to_string(),
        ));
    };

    let node_records = required_array(obj, "nodes")?;
    let edge_records = required_array(obj, "edges")?;

    let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
    for (index, record) in node_records.iter().enumerate() {
        let node = decode_node(index, record)?;
        nodes.insert(node.id, node);
    }

    let mut edges = Vec::with_capacity(edge_records.len());
    let mut dropped = 0usize;
    for record in edge_records {
        match decode_edge(record) {
            Some(edge) if nodes.contains_key(&edge.u) && nodes.contains_key(&edge.v) => {
                edges.push(edge)
            }
            _ => dropped += 1,
        }
    }

    let n_pot = obj.get("N_pot").and_then(as_real);
    let stats = SnapshotStats::compute(&nodes, &edges, dropped);

    Ok(GraphState {
        nodes,
        edges,
        source: None,
        version: 0,
        n_pot,
        stats,
    })
}

fn required_array<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>, DecodeError> {
    match obj.get(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(DecodeError::SchemaViolation(format!(
            "`{key}` must be an array, found {}",
            type_name(other)
        ))),
        None => Err(DecodeError::SchemaViolation(format!(
            "missing top-level key `{key}`"
        ))),
    }
}

fn decode_node(index: usize, record: &Value) -> Result<Node, DecodeError> {
    let Some(fields) = record.as_object() else {
        return Err(DecodeError::SchemaViolation(format!(
            "nodes[{index}] must be an object, found {}",
            type_name(record)
        )));
    };
    let Some(id) = fields.get("id").and_then(as_integer) else {
        return Err(DecodeError::SchemaViolation(format!(
            "nodes[{index}] has no integer `id`"
        )));
    };

    Ok(Node {
        id,
        rho: fields.get("rho").and_then(as_real).unwrap_or(0.0),
        phi: fields.get("phi").and_then(as_real).unwrap_or(0.0),
        sigma: fields.get("sigma").and_then(as_integer).unwrap_or(0),
        x: fields.get("x").and_then(as_real),
        y: fields.get("y").and_then(as_real),
    })
}

// Malformed edge records are treated like dangling ones: dropped, not fatal.
fn decode_edge(record: &Value) -> Option<Edge> {
    let fields = record.as_object()?;
    Some(Edge {
        u: fields.get("u").and_then(as_integer)?,
        v: fields.get("v").and_then(as_integer)?,
        is_ts: fields.get("is_ts").and_then(as_bool).unwrap_or(false),
    })
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn as_real(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    v.is_finite().then_some(v)
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_snapshot() {
        let raw = br#"{
            "N_pot": 12.5,
            "nodes": [
                { "id": 0, "rho": 0.73, "phi": 0.21, "sigma": 1, "x": 1.5, "y": -2.0 },
                { "id": 3, "rho": 0.2, "phi": 1.0, "sigma": 0 }
            ],
            "edges": [ { "u": 0, "v": 3, "is_ts": false } ]
        }"#;

        let state = decode(raw).expect("decode");
        assert_eq!(state.nodes.len(), 2);
        assert_eq!(state.edges, vec![Edge { u: 0, v: 3, is_ts: false }]);
        assert_eq!(state.n_pot, Some(12.5));
        assert_eq!(state.nodes[&0].explicit_position(), Some((1.5, -2.0)));
        assert_eq!(state.nodes[&3].explicit_position(), None);
        assert_eq!(state.version, 0);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let raw = br#"{ "nodes": [ { "id": 7 } ], "edges": [ { "u": 7, "v": 7 } ] }"#;
        let state = decode(raw).expect("decode");
        let node = state.nodes[&7];
        assert_eq!(node.rho, 0.0);
        assert_eq!(node.phi, 0.0);
        assert_eq!(node.sigma, 0);
        assert!(!state.edges[0].is_ts);
        assert_eq!(state.n_pot, None);
    }

    #[test]
    fn values_are_coerced() {
        let raw = br#"{
            "nodes": [ { "id": "4", "rho": "0.5", "phi": 2, "sigma": 1.0 }, { "id": 5.0 } ],
            "edges": [ { "u": 4.0, "v": "5", "is_ts": 1 } ]
        }"#;
        let state = decode(raw).expect("decode");
        assert_eq!(state.nodes[&4].rho, 0.5);
        assert_eq!(state.nodes[&4].phi, 2.0);
        assert_eq!(state.nodes[&4].sigma, 1);
        assert!(state.nodes.contains_key(&5));
        assert_eq!(state.edges, vec![Edge { u: 4, v: 5, is_ts: true }]);
    }

    #[test]
    fn dangling_edges_are_dropped_silently() {
        let raw = br#"{
            "nodes": [ { "id": 1, "rho": 0.9 }, { "id": 2, "rho": 0.1 } ],
            "edges": [
                { "u": 1, "v": 2, "is_ts": false },
                { "u": 1, "v": 9, "is_ts": true },
                { "u": 1 },
                "not an edge"
            ]
        }"#;
        let state = decode(raw).expect("decode");
        assert_eq!(state.edges, vec![Edge { u: 1, v: 2, is_ts: false }]);
        assert_eq!(state.stats.dropped_edges, 3);
        for edge in &state.edges {
            assert!(state.nodes.contains_key(&edge.u));
            assert!(state.nodes.contains_key(&edge.v));
        }
    }

    // Duplicate ids resolving to the last record is an assumption about the
    // simulation output, not a documented contract of the producer.
    #[test]
    fn duplicate_ids_last_record_wins() {
        let raw = br#"{
            "nodes": [ { "id": 1, "rho": 0.1 }, { "id": 1, "rho": 0.8 } ],
            "edges": []
        }"#;
        let state = decode(raw).expect("decode");
        assert_eq!(state.nodes.len(), 1);
        assert_eq!(state.nodes[&1].rho, 0.8);
    }

    #[test]
    fn malformed_json_reports_position() {
        let err = decode(b"{\n  \"nodes\": [\n").unwrap_err();
        match err {
            DecodeError::ParseFailure { line, .. } => assert!(line >= 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_or_mistyped_keys_violate_schema() {
        assert!(matches!(
            decode(br#"{ "nodes": [] }"#),
            Err(DecodeError::SchemaViolation(_))
        ));
        assert!(matches!(
            decode(br#"{ "nodes": {}, "edges": [] }"#),
            Err(DecodeError::SchemaViolation(_))
        ));
        assert!(matches!(
            decode(br#"[1, 2, 3]"#),
            Err(DecodeError::SchemaViolation(_))
        ));
    }

    #[test]
    fn node_without_id_violates_schema() {
        let err = decode(br#"{ "nodes": [ { "rho": 0.5 } ], "edges": [] }"#).unwrap_err();
        assert_eq!(
            err,
            DecodeError::SchemaViolation("nodes[0] has no integer `id`".to_string())
        );
    }
}
