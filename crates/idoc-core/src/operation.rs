use crate::{
  config::DocConfig,
  error::{GenerationWarning, RouteError},
  model::RouteDescriptor,
  openapi::{CodeSample, Operation, SecurityRequirement},
  parameters::ParameterClassifier,
  render::CodeSampleRenderer,
  responses::ResponseAssembler,
};

/// One route's operation, with the keys it is filed under in `paths`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOperation {
  pub path: String,
  pub method: String,
  pub operation: Operation,
}

/// Composes classified parameters, responses, security, and code samples
/// into one Operation Object per route.
pub struct OperationBuilder<'a> {
  config: &'a DocConfig,
  renderer: &'a dyn CodeSampleRenderer,
}

impl<'a> OperationBuilder<'a> {
  pub fn new(config: &'a DocConfig, renderer: &'a dyn CodeSampleRenderer) -> Self {
    Self { config, renderer }
  }

  /// Builds the operation for `route`.
  ///
  /// # Errors
  ///
  /// Fails when the route has no method or a code sample cannot be rendered.
  /// Nothing is added to `warnings` for a route that fails.
  pub fn build(
    &self,
    route: &RouteDescriptor,
    warnings: &mut Vec<GenerationWarning>,
  ) -> Result<PathOperation, RouteError> {
    let method = route
      .operation_key()
      .ok_or_else(|| RouteError::InvalidRoute("no HTTP methods".to_string()))?;

    let code_samples = self.code_samples(route)?;
    let parameters = ParameterClassifier::classify(route);

    let operation = Operation {
      security: route.authenticated.then(|| vec![self.security_requirement()]),
      tags: vec![route.group.clone()],
      operation_id: route.title.clone(),
      description: route.description.clone(),
      parameters: parameters.operation_parameters(),
      request_body: parameters.body,
      responses: ResponseAssembler::assemble(route, warnings),
      code_samples,
    };

    Ok(PathOperation {
      path: route.path_key(),
      method,
      operation,
    })
  }

  /// Every configured scheme, each with no scopes.
  fn security_requirement(&self) -> SecurityRequirement {
    self.config.security.keys().map(|name| (name.clone(), vec![])).collect()
  }

  fn code_samples(&self, route: &RouteDescriptor) -> Result<Vec<CodeSample>, RouteError> {
    self
      .config
      .language_tabs
      .iter()
      .map(|(lang, display_name)| -> Result<CodeSample, RouteError> {
        Ok(CodeSample {
          lang: display_name.clone(),
          source: self.renderer.render(lang, route)?,
        })
      })
      .collect()
  }
}
