use serde_json::json;

use super::support::{node, nodes, to_value};
use crate::{error::SchemaInconsistency, model::PropertyShape, schema::SchemaProjector};

#[test]
fn test_scalar_is_projected_verbatim() {
  let schema = SchemaProjector::project(
    "id",
    &node(json!({ "type": "integer", "description": "Identifier", "example": 7, "required": true })),
  )
  .unwrap();

  assert_eq!(
    to_value(&schema),
    json!({ "type": "integer", "description": "Identifier", "example": 7 })
  );
}

#[test]
fn test_missing_example_serializes_as_null() {
  let schema = SchemaProjector::project("name", &node(json!({ "type": "string" }))).unwrap();
  assert_eq!(
    to_value(&schema),
    json!({ "type": "string", "description": "", "example": null })
  );
}

#[test]
fn test_required_is_collected_per_level() {
  let fields = nodes(json!({
    "a": { "type": "string", "required": true },
    "b": {
      "type": "object",
      "properties": {
        "c": { "type": "string", "required": true },
        "d": { "type": "string" }
      }
    }
  }));

  let projected = SchemaProjector::project_fields(&fields).unwrap();

  assert_eq!(projected.required, vec!["a"]);
  let b = to_value(&projected.properties["b"]);
  assert_eq!(b["required"], json!(["c"]));
  assert_eq!(b["properties"]["c"]["type"], "string");
  assert_eq!(b["properties"]["d"]["type"], "string");
}

#[test]
fn test_required_keeps_declaration_order() {
  let fields = nodes(json!({
    "zeta": { "type": "string", "required": true },
    "alpha": { "type": "string", "required": true },
    "mid": { "type": "string" },
    "beta": { "type": "string", "required": true }
  }));

  let projected = SchemaProjector::project_fields(&fields).unwrap();

  assert_eq!(projected.required, vec!["zeta", "alpha", "beta"]);
  assert_eq!(
    projected.properties.keys().collect::<Vec<_>>(),
    vec!["zeta", "alpha", "mid", "beta"]
  );
}

#[test]
fn test_array_items_become_single_object_schema() {
  let schema = SchemaProjector::project(
    "orders",
    &node(json!({
      "type": "array",
      "description": "Orders",
      "example": [{ "id": 1 }, { "id": 2 }],
      "items": {
        "id": { "type": "integer", "required": true, "example": 1 },
        "note": { "type": "string" }
      }
    })),
  )
  .unwrap();

  let value = to_value(&schema);
  assert_eq!(value["type"], "array");
  assert_eq!(value["items"]["type"], "object");
  assert_eq!(value["items"]["required"], json!(["id"]));
  assert_eq!(value["items"]["properties"]["id"]["example"], 1);
  assert!(value.get("required").is_none());
  assert!(value.get("properties").is_none());
}

#[test]
fn test_deeply_nested_trees_recurse() {
  let schema = SchemaProjector::project(
    "data",
    &node(json!({
      "type": "object",
      "properties": {
        "customers": {
          "type": "array",
          "required": true,
          "items": {
            "address": {
              "type": "object",
              "required": true,
              "properties": {
                "lines": {
                  "type": "array",
                  "items": { "text": { "type": "string", "required": true } }
                }
              }
            }
          }
        }
      }
    })),
  )
  .unwrap();

  let value = to_value(&schema);
  assert_eq!(value["required"], json!(["customers"]));
  let customer = &value["properties"]["customers"]["items"];
  assert_eq!(customer["required"], json!(["address"]));
  let lines = &customer["properties"]["address"]["properties"]["lines"];
  assert_eq!(lines["items"]["required"], json!(["text"]));
  assert_eq!(lines["items"]["properties"]["text"]["type"], "string");
}

#[test]
fn test_projection_is_idempotent() {
  let tree = node(json!({
    "type": "object",
    "properties": {
      "tags": { "type": "array", "items": { "name": { "type": "string", "required": true } } },
      "count": { "type": "integer", "required": true }
    }
  }));

  let first = SchemaProjector::project("root", &tree).unwrap();
  let second = SchemaProjector::project("root", &tree).unwrap();

  assert_eq!(first, second);
  assert_eq!(to_value(&first).to_string(), to_value(&second).to_string());
}

#[test]
fn test_shape_resolution() {
  let object = node(json!({ "type": "object", "properties": {} }));
  assert!(matches!(object.shape("o"), Ok(PropertyShape::Object(children)) if children.is_empty()));

  let array = node(json!({ "type": "array", "items": { "id": { "type": "integer" } } }));
  assert!(matches!(array.shape("a"), Ok(PropertyShape::Array(fields)) if fields.len() == 1));

  let scalar = node(json!({ "type": "boolean", "properties": { "ignored": { "type": "string" } } }));
  assert_eq!(scalar.shape("s"), Ok(PropertyShape::Scalar));
}

#[test]
fn test_inconsistent_node_reports_full_path() {
  let fields = nodes(json!({
    "data": {
      "type": "object",
      "properties": {
        "rows": { "type": "array", "items": { "meta": { "type": "object" } } }
      }
    }
  }));

  let err = SchemaProjector::project_fields(&fields).unwrap_err();

  assert_eq!(
    err,
    SchemaInconsistency {
      path: "data.rows[].meta".to_string(),
      kind: "object".to_string(),
      missing: "properties",
    }
  );
  assert_eq!(
    err.to_string(),
    "property 'data.rows[].meta' is declared as object but has no 'properties' field"
  );
}

#[test]
fn test_array_without_items_is_inconsistent() {
  let err = SchemaProjector::project("list", &node(json!({ "type": "array" }))).unwrap_err();
  assert_eq!(err.path, "list");
  assert_eq!(err.missing, "items");
}
