use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
  config::DocConfig,
  error::RenderError,
  model::{PropertyNode, RouteDescriptor},
};

pub(super) const BASE_URL: &str = "https://api.example.com";

pub(super) fn route(value: Value) -> RouteDescriptor {
  serde_json::from_value(value).expect("route fixture should deserialize")
}

/// A route that passes validation, with `overrides` merged on top.
pub(super) fn documented_route(overrides: Value) -> RouteDescriptor {
  let mut base = json!({
    "methods": ["GET"],
    "uri": "users",
    "title": "listUsers",
    "description": "List users",
    "group": "Users",
    "action": "UserController@index"
  });
  let fields = base.as_object_mut().expect("base fixture is an object");
  if let Value::Object(overrides) = overrides {
    fields.extend(overrides);
  }
  route(base)
}

pub(super) fn node(value: Value) -> PropertyNode {
  serde_json::from_value(value).expect("property fixture should deserialize")
}

pub(super) fn nodes(value: Value) -> IndexMap<String, PropertyNode> {
  serde_json::from_value(value).expect("property map fixture should deserialize")
}

pub(super) fn config() -> DocConfig {
  DocConfig::builder()
    .title("Test API")
    .version("1.0.0")
    .description("API used in tests")
    .schema_tag("Payment processors")
    .security(IndexMap::from([
      (
        "BearerAuth".to_string(),
        json!({ "type": "http", "scheme": "bearer" }),
      ),
      (
        "ApiKeyAuth".to_string(),
        json!({ "type": "apiKey", "in": "header", "name": "X-API-Key" }),
      ),
    ]))
    .language_tabs(IndexMap::from([("bash".to_string(), "Bash".to_string())]))
    .docs_url(BASE_URL)
    .build()
}

/// Renders `<lang> <METHOD> <uri>` for every language.
pub(super) fn echo_renderer(lang: &str, route: &RouteDescriptor) -> Result<String, RenderError> {
  Ok(format!(
    "{lang} {} {}",
    route.primary_method().unwrap_or_default(),
    route.uri
  ))
}

pub(super) fn to_value<T: Serialize>(value: &T) -> Value {
  serde_json::to_value(value).expect("value should serialize")
}
