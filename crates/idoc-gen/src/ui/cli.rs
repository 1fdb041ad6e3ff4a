use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "idoc")]
#[command(author, version, about = "Route table to OpenAPI 3.0.0 documentation generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Inspect a route table without generating anything
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate openapi.json from a route table
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Path to the route table (JSON array of route descriptors)
  #[arg(short, long, value_name = "FILE")]
  pub routes: PathBuf,

  /// Path to the documentation configuration
  #[arg(short, long, value_name = "FILE", default_value = "idoc.json")]
  pub config: PathBuf,

  /// Directory openapi.json is written to, overriding the `output` config key
  #[arg(short, long, value_name = "DIR")]
  pub output: Option<PathBuf>,

  /// Base URL used in code samples, overriding the `docs_url` config key
  #[arg(long, value_name = "URL")]
  pub docs_url: Option<String>,

  /// Print every documented route
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every route in the table and whether it will be documented
  Routes {
    /// Path to the route table (JSON array of route descriptors)
    #[arg(short, long, value_name = "FILE")]
    routes: PathBuf,
  },
}
