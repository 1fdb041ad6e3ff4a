use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::{error::ConfigError, model::RouteDescriptor};

/// Everything about the document that does not come from the routes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, bon::Builder)]
#[serde(default)]
pub struct DocConfig {
  #[builder(into, default)]
  pub title: String,
  #[builder(into, default)]
  pub version: String,
  #[builder(into)]
  pub description: Option<String>,
  #[builder(into)]
  pub terms_of_service: Option<String>,
  pub license: Option<Value>,
  pub contact: Option<Value>,
  #[builder(into)]
  pub logo: Option<String>,
  #[builder(into)]
  pub color: Option<String>,
  /// `components.securitySchemes`, copied verbatim.
  #[builder(default)]
  pub security: IndexMap<String, Value>,
  #[builder(default)]
  pub servers: Vec<Value>,
  #[builder(default)]
  pub tag_groups: Vec<Value>,
  /// Language code to display name, in tab order.
  #[serde(rename = "language-tabs")]
  #[builder(default)]
  pub language_tabs: IndexMap<String, String>,
  /// The single group whose routes are exported under `components.schemas`.
  #[serde(rename = "reserved-schema-tag-name")]
  #[builder(into)]
  pub schema_tag: Option<String>,
  /// Base URL used in rendered code samples.
  #[builder(into)]
  pub docs_url: Option<String>,
  /// Sort routes by group, then title, before generating.
  #[builder(default)]
  pub sort: bool,
  /// Output directory, relative to the working directory.
  #[builder(into)]
  pub output: Option<String>,
}

impl DocConfig {
  /// Checks the configuration against the routes about to be documented.
  ///
  /// # Errors
  ///
  /// Fails when no reserved schema tag is set, or when an authenticated
  /// route needs security schemes that are not configured.
  pub fn validate(&self, routes: &[RouteDescriptor]) -> Result<(), ConfigError> {
    self.schema_tag()?;

    if self.security.is_empty()
      && let Some(route) = routes.iter().find(|route| route.authenticated && !route.hidden)
    {
      return Err(ConfigError::MissingSecuritySchemes {
        route: route.label().to_string(),
      });
    }

    Ok(())
  }

  /// The reserved schema tag name.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::MissingSchemaTag`] when it is unset or blank.
  pub fn schema_tag(&self) -> Result<&str, ConfigError> {
    self
      .schema_tag
      .as_deref()
      .filter(|tag| !tag.trim().is_empty())
      .ok_or(ConfigError::MissingSchemaTag)
  }

  #[must_use]
  pub fn license(&self) -> Option<Value> {
    non_blank(self.license.as_ref())
  }

  #[must_use]
  pub fn contact(&self) -> Option<Value> {
    non_blank(self.contact.as_ref())
  }
}

fn non_blank(value: Option<&Value>) -> Option<Value> {
  value
    .filter(|value| match value {
      Value::Null => false,
      Value::String(text) => !text.is_empty(),
      Value::Array(items) => !items.is_empty(),
      Value::Object(fields) => !fields.is_empty(),
      Value::Bool(_) | Value::Number(_) => true,
    })
    .cloned()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_deserialize_uses_documented_keys() {
    let config: DocConfig = serde_json::from_value(json!({
      "title": "Shop API",
      "version": "2.1.0",
      "terms_of_service": "https://example.com/terms",
      "language-tabs": { "bash": "Bash", "javascript": "Javascript" },
      "reserved-schema-tag-name": "Payment processors",
      "security": { "BearerAuth": { "type": "http", "scheme": "bearer" } },
      "sort": true
    }))
    .unwrap();

    assert_eq!(config.title, "Shop API");
    assert_eq!(config.terms_of_service.as_deref(), Some("https://example.com/terms"));
    assert_eq!(
      config.language_tabs.keys().collect::<Vec<_>>(),
      vec!["bash", "javascript"]
    );
    assert_eq!(config.schema_tag(), Ok("Payment processors"));
    assert!(config.security.contains_key("BearerAuth"));
    assert!(config.sort);
  }

  #[test]
  fn test_missing_schema_tag_is_fatal() {
    let config = DocConfig::builder().title("API").build();
    assert_eq!(config.validate(&[]), Err(ConfigError::MissingSchemaTag));

    let blank = DocConfig::builder().schema_tag("  ").build();
    assert_eq!(blank.schema_tag(), Err(ConfigError::MissingSchemaTag));
  }

  #[test]
  fn test_authenticated_route_requires_security_schemes() {
    let config = DocConfig::builder().schema_tag("Payments").build();
    let route: RouteDescriptor = serde_json::from_value(json!({
      "methods": ["GET"],
      "uri": "me",
      "authenticated": true
    }))
    .unwrap();

    assert_eq!(
      config.validate(std::slice::from_ref(&route)),
      Err(ConfigError::MissingSecuritySchemes {
        route: "[GET] me".to_string()
      })
    );

    let secured = DocConfig::builder()
      .schema_tag("Payments")
      .security(IndexMap::from([("bearer".to_string(), json!({ "type": "http" }))]))
      .build();
    assert_eq!(secured.validate(&[route]), Ok(()));
  }

  #[test]
  fn test_blank_license_and_contact_are_dropped() {
    let config = DocConfig::builder()
      .license(json!(""))
      .contact(json!({}))
      .build();
    assert_eq!(config.license(), None);
    assert_eq!(config.contact(), None);

    let config = DocConfig::builder()
      .license(json!({ "name": "MIT" }))
      .build();
    assert_eq!(config.license(), Some(json!({ "name": "MIT" })));
  }
}
