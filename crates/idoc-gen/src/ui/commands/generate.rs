use std::path::{Path, PathBuf};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use idoc_core::{
  CurlRenderer, DocConfig, DocumentGenerator, GenerationStats, GenerationWarning, OpenApiDocument,
  RouteDescriptor,
};

use crate::{
  ui::{Colors, GenerateCommand},
  utils::JsonLoader,
};

const DEFAULT_OUTPUT_DIR: &str = "docs";
const DOCUMENT_FILE_NAME: &str = "openapi.json";

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub routes: PathBuf,
  pub config: PathBuf,
  pub output: Option<PathBuf>,
  pub docs_url: Option<String>,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      routes,
      config,
      output,
      docs_url,
      verbose,
      quiet,
    } = command;

    Self {
      routes,
      config,
      output,
      docs_url,
      verbose,
      quiet,
    }
  }

  async fn load_config(&self) -> anyhow::Result<DocConfig> {
    JsonLoader::open(&self.config).await?.parse()
  }

  async fn load_routes(&self) -> anyhow::Result<Vec<RouteDescriptor>> {
    JsonLoader::open(&self.routes).await?.parse()
  }

  /// Command line first, then the `output` config key, then `docs`.
  fn output_dir(&self, doc_config: &DocConfig) -> PathBuf {
    self
      .output
      .clone()
      .or_else(|| doc_config.output.as_deref().map(PathBuf::from))
      .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
  }

  fn docs_url<'a>(&'a self, doc_config: &'a DocConfig) -> &'a str {
    self
      .docs_url
      .as_deref()
      .or(doc_config.docs_url.as_deref())
      .unwrap_or_default()
  }
}

/// Skipped routes always, other warnings only in verbose mode.
fn reported_warnings(stats: &GenerationStats, verbose: bool) -> impl Iterator<Item = &GenerationWarning> {
  stats
    .warnings
    .iter()
    .filter(move |warning| verbose || warning.is_skipped_route())
}

async fn write_document(output_dir: &Path, document: &OpenApiDocument) -> anyhow::Result<PathBuf> {
  tokio::fs::create_dir_all(output_dir).await?;
  let path = output_dir.join(DOCUMENT_FILE_NAME);
  tokio::fs::write(&path, document.to_json()?).await?;
  Ok(path)
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!(
        "Loading routes from: {} (config: {})",
        self.config.routes.display(),
        self.config.config.display()
      )
      .with(self.colors.primary())
      .to_string(),
    );
  }

  fn log_generating(&self, route_count: usize) {
    self.info(
      &format!("Generating OpenAPI 3.0.0 document for {route_count} routes...")
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn print_routes(&self, stats: &GenerationStats) {
    if !self.config.verbose || self.config.quiet {
      return;
    }

    for route in &stats.routes_processed {
      println!(
        "            {} {}",
        "Processed route:".with(self.colors.info()),
        route.to_string().with(self.colors.value())
      );
    }
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Routes documented:", stats.routes_processed.len().to_string());
    if stats.routes_skipped() > 0 {
      self.stat("Routes skipped:", stats.routes_skipped().to_string());
    }
    self.stat("Paths generated:", stats.paths_generated.to_string());
    self.stat("Operations generated:", stats.operations_generated.to_string());
    self.stat("Schemas exported:", stats.schemas_exported.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
  }

  /// Written to stderr regardless of `--quiet`.
  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in reported_warnings(stats, self.config.verbose) {
      if !printed_header {
        eprintln!();
        printed_header = true;
      }

      let prefix = if warning.is_skipped_route() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        prefix.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self, output_dir: &Path) {
    self.info(
      &format!("Writing to: {}", output_dir.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self, path: &Path) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        format!("Successfully generated {}", path.display()).with(self.colors.success())
      );
    }
  }
}

pub async fn generate_docs(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let doc_config = config.load_config().await?;
  let routes = config.load_routes().await?;

  logger.log_generating(routes.len());
  let renderer = CurlRenderer::new(config.docs_url(&doc_config));
  let generated = DocumentGenerator::new(&doc_config, &renderer).generate(&routes)?;
  logger.print_routes(&generated.stats);
  logger.print_statistics(&generated.stats);
  logger.print_warnings(&generated.stats);

  let output_dir = config.output_dir(&doc_config);
  logger.log_writing(&output_dir);
  let path = write_document(&output_dir, &generated.document).await?;

  logger.log_success(&path);
  Ok(())
}
