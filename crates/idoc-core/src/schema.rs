use indexmap::IndexMap;

use crate::{
  error::SchemaInconsistency,
  model::{PropertyNode, PropertyShape},
  openapi::Schema,
};

const ARRAY_ELEMENT_TYPE: &str = "object";

/// Projected children of one object level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedFields {
  pub properties: IndexMap<String, Schema>,
  /// Names flagged required at this level, in declaration order.
  pub required: Vec<String>,
}

/// Converts documented property trees into Schema Objects.
///
/// Projection is a pure function of the input tree: projecting the same node
/// twice yields identical schemas.
pub struct SchemaProjector;

impl SchemaProjector {
  /// Projects a single named property and everything nested below it.
  ///
  /// # Errors
  ///
  /// Returns [`SchemaInconsistency`] for the first `object` without
  /// `properties` or `array` without `items` found in the tree. The error
  /// path is dotted from `name` down to the offending node.
  pub fn project(name: &str, node: &PropertyNode) -> Result<Schema, SchemaInconsistency> {
    let mut schema = Schema {
      schema_type: Some(node.kind.clone()),
      description: Some(node.description.clone()),
      example: Some(node.example.clone()),
      ..Schema::default()
    };

    match node.shape(name)? {
      PropertyShape::Scalar => {}
      PropertyShape::Object(children) => {
        let fields = Self::project_fields(children).map_err(|err| err.within(name))?;
        schema.properties = Some(fields.properties);
        schema = schema.with_required(fields.required);
      }
      PropertyShape::Array(element_fields) => {
        let fields = Self::project_fields(element_fields).map_err(|err| err.within(&format!("{name}[]")))?;
        let element = Schema {
          properties: Some(fields.properties),
          ..Schema::typed(ARRAY_ELEMENT_TYPE)
        }
        .with_required(fields.required);
        schema.items = Some(Box::new(element));
      }
    }

    Ok(schema)
  }

  /// Projects every field of one object level.
  ///
  /// Only the fields' own `required` flags are collected; flags deeper in the
  /// tree end up in the nested schemas.
  ///
  /// # Errors
  ///
  /// Propagates the first inconsistency found in any field.
  pub fn project_fields(fields: &IndexMap<String, PropertyNode>) -> Result<ProjectedFields, SchemaInconsistency> {
    let mut projected = ProjectedFields::default();

    for (name, node) in fields {
      if node.required {
        projected.required.push(name.clone());
      }
      projected.properties.insert(name.clone(), Self::project(name, node)?);
    }

    Ok(projected)
  }
}
