use http::StatusCode;
use indexmap::IndexMap;
use serde_json::Value;

use crate::{
  error::{GenerationWarning, SchemaInconsistency},
  model::{RawResponse, RouteDescriptor, StructuredResponse},
  openapi::{Response, Schema},
  schema::SchemaProjector,
};

const SUCCESS_DESCRIPTION: &str = "success";
const ERROR_DESCRIPTION: &str = "error";
const RESPONSE_SCHEMA_TYPE: &str = "object";

/// Builds the `responses` map of an operation.
pub struct ResponseAssembler;

impl ResponseAssembler {
  /// Raw example responses first, then structured schemas on top: when both
  /// describe the same status code the structured schema wins.
  ///
  /// A structured response whose property tree is inconsistent is left out
  /// and reported through `warnings`.
  pub fn assemble(route: &RouteDescriptor, warnings: &mut Vec<GenerationWarning>) -> IndexMap<u16, Response> {
    let mut responses: IndexMap<u16, Response> = route
      .response
      .iter()
      .map(|raw| (raw.status, Self::example_response(raw)))
      .collect();

    for structured in &route.schemas {
      match Self::structured_response(structured) {
        Ok(response) => {
          responses.insert(structured.status_code, response);
        }
        Err(reason) => warnings.push(GenerationWarning::DroppedResponse {
          route: route.label(),
          status: structured.status_code,
          reason,
        }),
      }
    }

    responses
  }

  fn structured_response(structured: &StructuredResponse) -> Result<Response, SchemaInconsistency> {
    let fields = SchemaProjector::project_fields(&structured.properties)?;

    let schema = Schema {
      title: Some(structured.name.clone()),
      description: Some(structured.description.clone()),
      example: Some(structured.example.clone()),
      properties: Some(fields.properties),
      ..Schema::typed(RESPONSE_SCHEMA_TYPE)
    }
    .with_required(fields.required);

    Ok(Response::json(structured.name.clone(), schema))
  }

  fn example_response(raw: &RawResponse) -> Response {
    let schema = Schema {
      example: Some(parse_example(&raw.content)),
      ..Schema::typed(RESPONSE_SCHEMA_TYPE)
    };

    Response::json(status_description(raw.status), schema)
  }
}

/// `success` for 2xx statuses, `error` for everything else.
#[must_use]
pub fn status_description(status: u16) -> &'static str {
  match StatusCode::from_u16(status) {
    Ok(code) if code.is_success() => SUCCESS_DESCRIPTION,
    _ => ERROR_DESCRIPTION,
  }
}

/// Example content is usually JSON text; text that does not parse is kept as
/// a string, and already structured content is used as is.
fn parse_example(content: &Value) -> Value {
  match content {
    Value::String(text) => serde_json::from_str(text).unwrap_or_else(|_| content.clone()),
    other => other.clone(),
  }
}
