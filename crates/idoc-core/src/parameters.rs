use std::collections::HashSet;

use indexmap::IndexMap;
use itertools::Itertools;
use serde_json::{Map, Value};

use crate::{
  model::{ParameterSchema, RouteDescriptor, ValueType},
  openapi::{JSON_MEDIA_TYPE, MediaType, Parameter, ParameterLocation, RequestBody, Schema},
};

/// Never documented as a parameter; authentication is declared through
/// security schemes instead.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

const HEADER_TYPE: &str = "string";
const SYNTHESIZED_PATH_TYPE: &str = "string";
const BODY_SCHEMA_TYPE: &str = "object";

/// A parameter's published type and example after `float`/`json` coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedValue {
  pub openapi_type: &'static str,
  pub example: Value,
}

impl From<&ParameterSchema> for CoercedValue {
  fn from(schema: &ParameterSchema) -> Self {
    let example = match (schema.value_type, &schema.value) {
      (ValueType::Json, Value::String(text)) if !text.trim().is_empty() => {
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone()))
      }
      (_, value) => value.clone(),
    };

    Self {
      openapi_type: schema.value_type.openapi_type(),
      example,
    }
  }
}

/// A route's parameters split by where they travel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedParameters {
  pub path: Vec<Parameter>,
  pub query: Vec<Parameter>,
  pub header: Vec<Parameter>,
  /// Only present for routes accepting POST, PUT, or PATCH.
  pub body: Option<RequestBody>,
}

impl ClassifiedParameters {
  /// Path and query parameters followed by header parameters, in that order.
  /// Nothing is deduplicated.
  #[must_use]
  pub fn operation_parameters(&self) -> Vec<Parameter> {
    self
      .path
      .iter()
      .chain(&self.query)
      .chain(&self.header)
      .cloned()
      .collect()
  }
}

pub struct ParameterClassifier;

impl ParameterClassifier {
  #[must_use]
  pub fn classify(route: &RouteDescriptor) -> ClassifiedParameters {
    ClassifiedParameters {
      path: Self::path_parameters(route),
      query: route
        .query_parameters
        .iter()
        .map(|(name, schema)| Self::documented(ParameterLocation::Query, name, schema))
        .collect(),
      header: Self::header_parameters(&route.headers),
      body: route.accepts_body().then(|| Self::request_body(route)),
    }
  }

  /// Object schema describing a set of body parameters.
  ///
  /// `required`, `properties` and `example` are each left out when they would
  /// be empty, independently of one another.
  #[must_use]
  pub fn body_schema(parameters: &IndexMap<String, ParameterSchema>) -> Schema {
    let mut required = vec![];
    let mut properties = IndexMap::new();
    let mut example = Map::new();

    for (name, schema) in parameters {
      let coerced = CoercedValue::from(schema);
      if schema.required {
        required.push(name.clone());
      }
      properties.insert(
        name.clone(),
        Schema {
          example: Some(coerced.example.clone()),
          description: Some(schema.description.clone()),
          ..Schema::typed(coerced.openapi_type)
        },
      );
      example.insert(name.clone(), coerced.example);
    }

    Schema {
      properties: (!properties.is_empty()).then_some(properties),
      example: (!example.is_empty()).then_some(Value::Object(example)),
      ..Schema::typed(BODY_SCHEMA_TYPE)
    }
    .with_required(required)
  }

  fn documented(location: ParameterLocation, name: &str, schema: &ParameterSchema) -> Parameter {
    let coerced = CoercedValue::from(schema);
    Parameter {
      location,
      name: name.to_string(),
      description: schema.description.clone(),
      required: schema.required,
      schema: Schema {
        example: Some(coerced.example),
        ..Schema::typed(coerced.openapi_type)
      },
    }
  }

  /// Declared path parameters, then any `{placeholder}` in the URI that was
  /// not declared.
  fn path_parameters(route: &RouteDescriptor) -> Vec<Parameter> {
    let declared: HashSet<&str> = route.path_parameters.keys().map(String::as_str).collect();

    let synthesized = template_params(&route.uri)
      .filter(|name| !declared.contains(name))
      .unique()
      .map(|name| Parameter {
        location: ParameterLocation::Path,
        name: name.to_string(),
        description: String::new(),
        required: true,
        schema: Schema::typed(SYNTHESIZED_PATH_TYPE),
      });

    route
      .path_parameters
      .iter()
      .map(|(name, schema)| Self::documented(ParameterLocation::Path, name, schema))
      .chain(synthesized)
      .collect()
  }

  fn header_parameters(headers: &IndexMap<String, String>) -> Vec<Parameter> {
    headers
      .iter()
      .filter(|(name, _)| !name.eq_ignore_ascii_case(AUTHORIZATION_HEADER))
      .map(|(name, value)| Parameter {
        location: ParameterLocation::Header,
        name: name.clone(),
        description: String::new(),
        required: true,
        schema: Schema {
          default: Some(Value::String(value.clone())),
          example: Some(Value::String(value.clone())),
          ..Schema::typed(HEADER_TYPE)
        },
      })
      .collect()
  }

  fn request_body(route: &RouteDescriptor) -> RequestBody {
    RequestBody {
      description: route.description.clone(),
      required: true,
      content: IndexMap::from([(
        JSON_MEDIA_TYPE.to_string(),
        MediaType {
          schema: Self::body_schema(&route.body_parameters),
        },
      )]),
    }
  }
}

/// Names of `{placeholder}` segments in a URI template. Optional
/// placeholders (`{id?}`) yield the bare name.
pub(crate) fn template_params(uri: &str) -> impl Iterator<Item = &str> {
  TemplateParams { rest: uri }
}

struct TemplateParams<'a> {
  rest: &'a str,
}

impl<'a> Iterator for TemplateParams<'a> {
  type Item = &'a str;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let open = self.rest.find('{')?;
      let after_open = &self.rest[open + 1..];
      let close = after_open.find('}')?;
      let name = after_open[..close].trim_end_matches('?');
      self.rest = &after_open[close + 1..];

      if !name.is_empty() {
        return Some(name);
      }
    }
  }
}
