//! Code samples attached to each operation under `x-code-samples`.

use itertools::Itertools;
use serde_json::Value;

use crate::{error::RenderError, model::RouteDescriptor};

pub const BASH: &str = "bash";

const LINE_CONTINUATION: &str = " \\\n    ";

/// Renders an example request for a route in one client language.
pub trait CodeSampleRenderer {
  /// # Errors
  ///
  /// Fails when the language has no template or the route cannot be rendered.
  fn render(&self, lang: &str, route: &RouteDescriptor) -> Result<String, RenderError>;
}

impl<F> CodeSampleRenderer for F
where
  F: Fn(&str, &RouteDescriptor) -> Result<String, RenderError>,
{
  fn render(&self, lang: &str, route: &RouteDescriptor) -> Result<String, RenderError> {
    self(lang, route)
  }
}

/// Renders `bash` samples as a curl invocation against `base_url`.
#[derive(Debug, Clone)]
pub struct CurlRenderer {
  base_url: String,
}

impl CurlRenderer {
  #[must_use]
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into().trim_end_matches('/').to_string(),
    }
  }

  fn curl(&self, route: &RouteDescriptor) -> Result<String, RenderError> {
    let method = route.primary_method().ok_or_else(|| RenderError::Template {
      lang: BASH.to_string(),
      message: "route has no HTTP method".to_string(),
    })?;
    let get_flag = if method.eq_ignore_ascii_case("GET") { "-G " } else { "" };

    let request = format!(
      "curl -X {method} {get_flag}\"{}/{}\"",
      self.base_url,
      route.uri.trim_start_matches('/')
    );

    let headers = route
      .headers
      .iter()
      .map(|(name, value)| format!("-H \"{name}: {value}\""));

    let body = route
      .body_parameters
      .iter()
      .map(|(name, parameter)| match &parameter.value {
        Value::Bool(flag) => format!("-d \"{name}={flag}\""),
        value @ (Value::Array(_) | Value::Object(_)) => format!("-d \"{name}={value}\""),
        value => format!("-d \"{name}\"=\"{}\"", scalar_text(value)),
      });

    Ok(std::iter::once(request).chain(headers).chain(body).join(LINE_CONTINUATION))
  }
}

impl CodeSampleRenderer for CurlRenderer {
  fn render(&self, lang: &str, route: &RouteDescriptor) -> Result<String, RenderError> {
    match lang {
      BASH => self.curl(route),
      other => Err(RenderError::UnsupportedLanguage(other.to_string())),
    }
  }
}

fn scalar_text(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}
