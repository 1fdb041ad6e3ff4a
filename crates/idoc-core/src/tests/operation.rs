use indexmap::IndexMap;
use serde_json::json;

use super::support::{config, documented_route, echo_renderer, to_value};
use crate::{
  error::{RenderError, RouteError},
  model::RouteDescriptor,
  openapi::JSON_MEDIA_TYPE,
  operation::OperationBuilder,
  render::CurlRenderer,
};

#[test]
fn test_authenticated_post_scenario() {
  let config = config();
  let renderer = CurlRenderer::new("https://api.example.com");
  let route = documented_route(json!({
    "methods": ["POST"],
    "uri": "users",
    "title": "createUser",
    "authenticated": true,
    "bodyParameters": { "name": { "type": "string", "value": "Alice", "required": true } },
    "response": [{ "status": 201, "content": "{\"id\":1}" }]
  }));

  let built = OperationBuilder::new(&config, &renderer)
    .build(&route, &mut vec![])
    .unwrap();

  assert_eq!(built.path, "/users");
  assert_eq!(built.method, "post");
  let operation = to_value(&built.operation);
  assert_eq!(
    operation["security"],
    json!([{ "BearerAuth": [], "ApiKeyAuth": [] }])
  );
  assert_eq!(
    operation["requestBody"]["content"][JSON_MEDIA_TYPE]["schema"]["required"],
    json!(["name"])
  );
  assert_eq!(operation["requestBody"]["required"], true);
  assert_eq!(operation["responses"]["201"]["description"], "success");
  assert_eq!(operation["tags"], json!(["Users"]));
  assert_eq!(operation["operationId"], "createUser");
}

#[test]
fn test_operation_field_order() {
  let config = config();
  let route = documented_route(json!({ "methods": ["PUT"], "authenticated": true }));

  let built = OperationBuilder::new(&config, &echo_renderer)
    .build(&route, &mut vec![])
    .unwrap();
  let operation = to_value(&built.operation);
  let keys: Vec<_> = operation.as_object().unwrap().keys().map(String::as_str).collect();

  assert_eq!(
    keys,
    vec![
      "security",
      "tags",
      "operationId",
      "description",
      "requestBody",
      "parameters",
      "responses",
      "x-code-samples"
    ]
  );
}

#[test]
fn test_unauthenticated_get_has_no_security_or_body() {
  let config = config();
  let route = documented_route(json!({ "methods": ["GET", "HEAD"], "uri": "/users" }));

  let built = OperationBuilder::new(&config, &echo_renderer)
    .build(&route, &mut vec![])
    .unwrap();
  let operation = to_value(&built.operation);

  assert_eq!(built.path, "/users");
  assert_eq!(built.method, "get");
  assert!(operation.get("security").is_none());
  assert!(operation.get("requestBody").is_none());
  assert_eq!(operation["parameters"], json!([]));
  assert_eq!(operation["responses"], json!({}));
}

#[test]
fn test_code_samples_follow_language_tabs() {
  let mut config = config();
  config.language_tabs = IndexMap::from([
    ("bash".to_string(), "Bash".to_string()),
    ("javascript".to_string(), "JavaScript".to_string()),
    ("php".to_string(), "PHP".to_string()),
  ]);
  let route = documented_route(json!({ "methods": ["DELETE"], "uri": "users/{id}" }));

  let built = OperationBuilder::new(&config, &echo_renderer)
    .build(&route, &mut vec![])
    .unwrap();

  assert_eq!(
    to_value(&built.operation)["x-code-samples"],
    json!([
      { "lang": "Bash", "source": "bash DELETE users/{id}" },
      { "lang": "JavaScript", "source": "javascript DELETE users/{id}" },
      { "lang": "PHP", "source": "php DELETE users/{id}" }
    ])
  );
}

#[test]
fn test_render_failure_fails_the_route() {
  let mut config = config();
  config.language_tabs = IndexMap::from([
    ("bash".to_string(), "Bash".to_string()),
    ("ruby".to_string(), "Ruby".to_string()),
  ]);
  let renderer = CurlRenderer::new("https://api.example.com");
  let route = documented_route(json!({}));

  let err = OperationBuilder::new(&config, &renderer)
    .build(&route, &mut vec![])
    .unwrap_err();

  assert_eq!(
    err,
    RouteError::Render(RenderError::UnsupportedLanguage("ruby".to_string()))
  );
}

#[test]
fn test_failed_route_adds_no_warnings() {
  let config = config();
  let renderer = CurlRenderer::new("https://api.example.com");
  let mut config_with_ruby = config.clone();
  config_with_ruby
    .language_tabs
    .insert("ruby".to_string(), "Ruby".to_string());
  let route = documented_route(json!({
    "schemas": [{ "statusCode": 200, "name": "Broken", "properties": { "tags": { "type": "array" } } }]
  }));
  let mut warnings = vec![];

  let result = OperationBuilder::new(&config_with_ruby, &renderer).build(&route, &mut warnings);

  assert!(result.is_err());
  assert!(warnings.is_empty());

  OperationBuilder::new(&config, &renderer)
    .build(&route, &mut warnings)
    .unwrap();
  assert_eq!(warnings.len(), 1);
}

#[test]
fn test_custom_renderer_sees_the_route() {
  let config = config();
  let renderer = |lang: &str, route: &RouteDescriptor| -> Result<String, RenderError> {
    Ok(format!("{lang}:{}:{}", route.title, route.body_parameters.len()))
  };
  let route = documented_route(json!({
    "methods": ["PATCH"],
    "title": "updateUser",
    "bodyParameters": { "name": { "type": "string", "value": "Bob" } }
  }));

  let built = OperationBuilder::new(&config, &renderer)
    .build(&route, &mut vec![])
    .unwrap();

  assert_eq!(built.operation.code_samples[0].source, "bash:updateUser:1");
}

#[test]
fn test_method_without_route_methods_is_invalid() {
  let config = config();
  let route = documented_route(json!({ "methods": [] }));

  let err = OperationBuilder::new(&config, &echo_renderer)
    .build(&route, &mut vec![])
    .unwrap_err();

  assert!(matches!(err, RouteError::InvalidRoute(_)));
}
