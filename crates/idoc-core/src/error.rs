use std::fmt;

/// A property node whose declared type does not match the nested data it carries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("property '{path}' is declared as {kind} but has no '{missing}' field")]
pub struct SchemaInconsistency {
  pub path: String,
  pub kind: String,
  pub missing: &'static str,
}

impl SchemaInconsistency {
  pub(crate) fn within(mut self, parent: &str) -> Self {
    self.path = format!("{parent}.{}", self.path);
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
  #[error("no code sample template for language '{0}'")]
  UnsupportedLanguage(String),
  #[error("failed to render '{lang}' sample: {message}")]
  Template { lang: String, message: String },
}

/// Failures isolated to a single route. The route is left out of the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
  #[error("invalid route: {0}")]
  InvalidRoute(String),
  #[error("hidden from documentation")]
  Hidden,
  #[error(transparent)]
  Render(#[from] RenderError),
}

/// Configuration problems abort the whole run before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
  #[error("'reserved-schema-tag-name' is not configured")]
  MissingSchemaTag,
  #[error("route {route} requires authentication but no security schemes are configured")]
  MissingSecuritySchemes { route: String },
}

/// Non-fatal findings collected while generating a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationWarning {
  #[error("route {route}: {reason}")]
  SkippedRoute { route: RouteLabel, reason: RouteError },
  #[error("route {route}: dropped {status} response schema: {reason}")]
  DroppedResponse {
    route: RouteLabel,
    status: u16,
    reason: SchemaInconsistency,
  },
  #[error("{method} {path} is declared by more than one route, keeping the last one")]
  DuplicateOperation { method: String, path: String },
}

impl GenerationWarning {
  #[must_use]
  pub const fn is_skipped_route(&self) -> bool {
    matches!(self, Self::SkippedRoute { .. })
  }
}

/// `[GET,HEAD] users/{id}` style identifier used in log lines and warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLabel {
  pub methods: Vec<String>,
  pub uri: String,
}

impl fmt::Display for RouteLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}] {}", self.methods.join(","), self.uri)
  }
}
