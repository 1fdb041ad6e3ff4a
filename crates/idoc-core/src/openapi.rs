//! Serializable OpenAPI 3.0.0 document model.
//!
//! Only the parts of OpenAPI the generator emits are modelled.
//! Every map is an [`IndexMap`] so the document keeps the order in which
//! routes and fields were declared.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

pub const OPENAPI_VERSION: &str = "3.0.0";
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Operations of one path, keyed by lowercase HTTP method.
pub type PathItem = IndexMap<String, Operation>;

/// A security requirement: scheme name to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApiDocument {
  pub openapi: &'static str,
  pub info: Info,
  pub components: Components,
  pub servers: Vec<Value>,
  pub paths: IndexMap<String, PathItem>,
  #[serde(rename = "x-tagGroups")]
  pub tag_groups: Vec<Value>,
}

impl OpenApiDocument {
  /// Serializes the document as compact JSON text.
  ///
  /// # Errors
  ///
  /// Only fails if a verbatim configuration value cannot be serialized.
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }

  #[must_use]
  pub fn operation_count(&self) -> usize {
    self.paths.values().map(IndexMap::len).sum()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
  pub title: String,
  pub version: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub terms_of_service: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub license: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contact: Option<Value>,
  #[serde(rename = "x-logo")]
  pub logo: Logo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
  pub url: Option<String>,
  pub alt_text: String,
  pub background_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
  pub security_schemes: IndexMap<String, Value>,
  pub schemas: IndexMap<String, Schema>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub security: Option<Vec<SecurityRequirement>>,
  pub tags: Vec<String>,
  pub operation_id: String,
  pub description: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_body: Option<RequestBody>,
  pub parameters: Vec<Parameter>,
  pub responses: IndexMap<u16, Response>,
  #[serde(rename = "x-code-samples")]
  pub code_samples: Vec<CodeSample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
  Path,
  Query,
  Header,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  pub name: String,
  pub description: String,
  pub required: bool,
  pub schema: Schema,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
  pub description: String,
  pub required: bool,
  pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
  pub description: String,
  pub content: IndexMap<String, MediaType>,
}

impl Response {
  /// A response whose only representation is `application/json`.
  #[must_use]
  pub fn json(description: impl Into<String>, schema: Schema) -> Self {
    Self {
      description: description.into(),
      content: IndexMap::from([(JSON_MEDIA_TYPE.to_string(), MediaType { schema })]),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
  pub schema: Schema,
}

/// Schema Object. Absent fields are not serialized; a present `example` of
/// `null` is serialized as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub schema_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub example: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub properties: Option<IndexMap<String, Schema>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub items: Option<Box<Schema>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub required: Option<Vec<String>>,
}

impl Schema {
  #[must_use]
  pub fn typed(schema_type: impl Into<String>) -> Self {
    Self {
      schema_type: Some(schema_type.into()),
      ..Self::default()
    }
  }

  /// Sets `required`, leaving it out entirely when `names` is empty.
  #[must_use]
  pub fn with_required(mut self, names: Vec<String>) -> Self {
    self.required = (!names.is_empty()).then_some(names);
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSample {
  pub lang: String,
  pub source: String,
}
