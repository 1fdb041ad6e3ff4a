//! The normalized route table consumed by the generator.
//!
//! Descriptors are produced by whatever walks the application's router and
//! reads its doc comments. They arrive here fully populated and are never
//! mutated afterwards.

use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{RouteError, RouteLabel, SchemaInconsistency};

/// Methods whose parameters travel in a request body.
pub const BODY_METHODS: [Method; 3] = [Method::POST, Method::PUT, Method::PATCH];

/// One documented endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteDescriptor {
  /// HTTP methods; the first one keys the operation and drives code samples.
  pub methods: Vec<String>,
  pub uri: String,
  pub title: String,
  pub description: String,
  pub group: String,
  pub authenticated: bool,
  /// Handler reference, e.g. `UserController@store`.
  pub action: Option<String>,
  #[serde(alias = "hideFromAPIDocumentation")]
  pub hidden: bool,
  pub headers: IndexMap<String, String>,
  pub query_parameters: IndexMap<String, ParameterSchema>,
  pub path_parameters: IndexMap<String, ParameterSchema>,
  pub body_parameters: IndexMap<String, ParameterSchema>,
  pub schemas: Vec<StructuredResponse>,
  pub response: Vec<RawResponse>,
}

impl RouteDescriptor {
  #[must_use]
  pub fn label(&self) -> RouteLabel {
    RouteLabel {
      methods: self.methods.clone(),
      uri: self.uri.clone(),
    }
  }

  #[must_use]
  pub fn primary_method(&self) -> Option<&str> {
    self.methods.first().map(String::as_str)
  }

  /// Lowercased primary method, the key of the operation inside its path item.
  #[must_use]
  pub fn operation_key(&self) -> Option<String> {
    self.primary_method().map(str::to_ascii_lowercase)
  }

  /// `uri` with exactly one leading slash.
  #[must_use]
  pub fn path_key(&self) -> String {
    format!("/{}", self.uri.trim_start_matches('/'))
  }

  #[must_use]
  pub fn accepts_body(&self) -> bool {
    self
      .methods
      .iter()
      .any(|method| BODY_METHODS.iter().any(|body| body.as_str().eq_ignore_ascii_case(method)))
  }

  /// Checks the route can be documented at all.
  ///
  /// # Errors
  ///
  /// Returns [`RouteError::Hidden`] for routes marked hidden and
  /// [`RouteError::InvalidRoute`] when methods, handler, or title are missing.
  pub fn validate(&self) -> Result<(), RouteError> {
    if self.hidden {
      return Err(RouteError::Hidden);
    }

    if self.methods.is_empty() {
      return Err(RouteError::InvalidRoute("no HTTP methods".to_string()));
    }

    if let Some(method) = self
      .methods
      .iter()
      .find(|method| Method::from_bytes(method.as_bytes()).is_err())
    {
      return Err(RouteError::InvalidRoute(format!("'{method}' is not an HTTP method")));
    }

    if self.action.as_deref().is_none_or(|action| action.trim().is_empty()) {
      return Err(RouteError::InvalidRoute("no resolvable handler reference".to_string()));
    }

    if self.title.trim().is_empty() {
      return Err(RouteError::InvalidRoute("no documentation title".to_string()));
    }

    Ok(())
  }
}

/// Declared type of a parameter, as written in the route documentation.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display, strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValueType {
  #[default]
  String,
  Number,
  Integer,
  Boolean,
  Float,
  Json,
  Object,
  Array,
}

impl ValueType {
  /// The OpenAPI type this declared type is published as.
  #[must_use]
  pub fn openapi_type(self) -> &'static str {
    match self {
      Self::Float => "number",
      Self::Json => "object",
      other => other.into(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParameterSchema {
  #[serde(rename = "type")]
  pub value_type: ValueType,
  /// Example value, typed per `value_type`. `json` parameters carry JSON text.
  pub value: Value,
  pub description: String,
  pub required: bool,
}

/// A fully typed response body for one status code.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredResponse {
  pub status_code: u16,
  pub name: String,
  pub description: String,
  pub example: Value,
  pub properties: IndexMap<String, PropertyNode>,
}

/// An example response captured as JSON text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawResponse {
  pub status: u16,
  pub content: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PropertyNode {
  #[serde(rename = "type")]
  pub kind: String,
  pub description: String,
  pub example: Value,
  pub required: bool,
  pub properties: Option<IndexMap<String, PropertyNode>>,
  pub items: Option<IndexMap<String, PropertyNode>>,
}

/// What a [`PropertyNode`] nests, resolved from its declared type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyShape<'a> {
  Scalar,
  Object(&'a IndexMap<String, PropertyNode>),
  /// Fields of the object every element of the array holds.
  Array(&'a IndexMap<String, PropertyNode>),
}

impl PropertyNode {
  /// Resolves the node's shape.
  ///
  /// # Errors
  ///
  /// Fails when the node is declared `object` or `array` but carries no
  /// `properties` or `items` respectively.
  pub fn shape(&self, name: &str) -> Result<PropertyShape<'_>, SchemaInconsistency> {
    let missing = |field: &'static str| SchemaInconsistency {
      path: name.to_string(),
      kind: self.kind.clone(),
      missing: field,
    };

    match self.kind.as_str() {
      "object" => self
        .properties
        .as_ref()
        .map(PropertyShape::Object)
        .ok_or_else(|| missing("properties")),
      "array" => self.items.as_ref().map(PropertyShape::Array).ok_or_else(|| missing("items")),
      _ => Ok(PropertyShape::Scalar),
    }
  }
}
