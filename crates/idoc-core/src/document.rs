//! Assembly of the final OpenAPI document from a whole route table.
//!
//! ## Usage
//!
//! ```no_run
//! use idoc_core::{CurlRenderer, DocConfig, DocumentGenerator, RouteDescriptor};
//!
//! # fn example(routes: Vec<RouteDescriptor>) -> anyhow::Result<()> {
//! let config = DocConfig::builder()
//!   .title("Shop API")
//!   .version("1.0.0")
//!   .schema_tag("Payment processors")
//!   .build();
//! let renderer = CurlRenderer::new("https://api.example.com");
//!
//! let generated = DocumentGenerator::new(&config, &renderer).generate(&routes)?;
//! println!("{} warnings", generated.stats.warnings.len());
//! std::fs::write("openapi.json", generated.document.to_json()?)?;
//! # Ok(())
//! # }
//! ```

use indexmap::IndexMap;

use crate::{
  config::DocConfig,
  error::{ConfigError, GenerationWarning, RouteLabel},
  model::RouteDescriptor,
  openapi::{Components, Info, Logo, OPENAPI_VERSION, OpenApiDocument, PathItem, Schema},
  operation::{OperationBuilder, PathOperation},
  parameters::ParameterClassifier,
  render::CodeSampleRenderer,
};

/// Statistics about one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationStats {
  /// Routes that made it into the document, in processing order
  pub routes_processed: Vec<RouteLabel>,
  pub operations_generated: usize,
  pub paths_generated: usize,
  /// Entries written to `components.schemas`
  pub schemas_exported: usize,
  /// Non-fatal findings, including every skipped route
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  #[must_use]
  pub fn routes_skipped(&self) -> usize {
    self.warnings.iter().filter(|warning| warning.is_skipped_route()).count()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
  pub document: OpenApiDocument,
  pub stats: GenerationStats,
}

/// Turns a route table into one OpenAPI document.
pub struct DocumentGenerator<'a> {
  config: &'a DocConfig,
  renderer: &'a dyn CodeSampleRenderer,
}

impl<'a> DocumentGenerator<'a> {
  pub fn new(config: &'a DocConfig, renderer: &'a dyn CodeSampleRenderer) -> Self {
    Self { config, renderer }
  }

  /// Generates the document.
  ///
  /// Routes are grouped by `group` in order of first appearance and
  /// processed in discovery order within each group. A route that fails is
  /// skipped and reported in the stats; the rest are still documented.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError`] before doing any work when the configuration
  /// cannot document these routes.
  pub fn generate(&self, routes: &[RouteDescriptor]) -> Result<GeneratedDocument, ConfigError> {
    self.config.validate(routes)?;
    let schema_tag = self.config.schema_tag()?;

    let mut warnings = vec![];
    let groups = self.group(routes, &mut warnings);

    let builder = OperationBuilder::new(self.config, self.renderer);
    let mut paths: IndexMap<String, PathItem> = IndexMap::new();
    let mut routes_processed = vec![];
    let mut schema_routes = vec![];

    for route in groups.values().flatten() {
      match builder.build(route, &mut warnings) {
        Ok(PathOperation { path, method, operation }) => {
          let item = paths.entry(path.clone()).or_default();
          if item.insert(method.clone(), operation).is_some() {
            warnings.push(GenerationWarning::DuplicateOperation {
              method: method.to_ascii_uppercase(),
              path,
            });
          }
          routes_processed.push(route.label());
          if route.group == schema_tag {
            schema_routes.push(*route);
          }
        }
        Err(reason) => warnings.push(GenerationWarning::SkippedRoute {
          route: route.label(),
          reason,
        }),
      }
    }

    let schemas = Self::schema_catalog(&schema_routes);

    let document = OpenApiDocument {
      openapi: OPENAPI_VERSION,
      info: self.info(),
      components: Components {
        security_schemes: self.config.security.clone(),
        schemas,
      },
      servers: self.config.servers.clone(),
      paths,
      tag_groups: self.config.tag_groups.clone(),
    };

    let stats = GenerationStats {
      routes_processed,
      operations_generated: document.operation_count(),
      paths_generated: document.paths.len(),
      schemas_exported: document.components.schemas.len(),
      warnings,
    };

    Ok(GeneratedDocument { document, stats })
  }

  /// Valid routes partitioned by group. Invalid and hidden routes are
  /// reported and left out.
  fn group<'r>(
    &self,
    routes: &'r [RouteDescriptor],
    warnings: &mut Vec<GenerationWarning>,
  ) -> IndexMap<&'r str, Vec<&'r RouteDescriptor>> {
    let mut documented: Vec<&RouteDescriptor> = routes
      .iter()
      .filter(|route| match route.validate() {
        Ok(()) => true,
        Err(reason) => {
          warnings.push(GenerationWarning::SkippedRoute {
            route: route.label(),
            reason,
          });
          false
        }
      })
      .collect();

    if self.config.sort {
      documented.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| a.title.cmp(&b.title)));
    }

    let mut groups: IndexMap<&str, Vec<&RouteDescriptor>> = IndexMap::new();
    for route in documented {
      groups.entry(route.group.as_str()).or_default().push(route);
    }
    groups
  }

  /// Body parameter schemas of the reserved group's documented routes, keyed
  /// by title. No other group ever contributes here, and skipped routes do not
  /// either.
  fn schema_catalog(routes: &[&RouteDescriptor]) -> IndexMap<String, Schema> {
    routes
      .iter()
      .filter(|route| !route.body_parameters.is_empty())
      .map(|route| {
        let schema = Schema {
          description: Some(route.description.clone()),
          ..ParameterClassifier::body_schema(&route.body_parameters)
        };
        (route.title.clone(), schema)
      })
      .collect()
  }

  fn info(&self) -> Info {
    Info {
      title: self.config.title.clone(),
      version: self.config.version.clone(),
      description: self.config.description.clone(),
      terms_of_service: self.config.terms_of_service.clone(),
      license: self.config.license(),
      contact: self.config.contact(),
      logo: Logo {
        url: self.config.logo.clone(),
        alt_text: self.config.title.clone(),
        background_color: self.config.color.clone(),
      },
    }
  }
}
