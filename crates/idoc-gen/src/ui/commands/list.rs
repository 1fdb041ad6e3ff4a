use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use idoc_core::{RouteDescriptor, RouteError};

use crate::{
  ui::{Colors, colors::to_comfy, term_width},
  utils::JsonLoader,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteRow {
  methods: String,
  path: String,
  group: String,
  title: String,
  /// Why the route will be left out of the document, if it will.
  skipped: Option<String>,
}

impl From<&RouteDescriptor> for RouteRow {
  fn from(route: &RouteDescriptor) -> Self {
    let skipped = match route.validate() {
      Ok(()) => None,
      Err(RouteError::Hidden) => Some("hidden".to_string()),
      Err(reason) => Some(reason.to_string()),
    };

    Self {
      methods: route.methods.join("|"),
      path: route.path_key(),
      group: route.group.clone(),
      title: route.title.clone(),
      skipped,
    }
  }
}

pub async fn list_routes(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let routes: Vec<RouteDescriptor> = JsonLoader::open(input).await?.parse()?;
  let rows: Vec<RouteRow> = routes.iter().map(RouteRow::from).collect();

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["METHOD", "PATH", "GROUP", "TITLE", "STATUS"] {
    header.add_cell(Cell::new(title).fg(to_comfy(colors.label())));
  }
  table.set_header(header);

  for route in rows {
    let documented = route.skipped.is_none();
    let text = if documented { colors.primary() } else { colors.muted() };

    let mut row = Row::new();
    row.add_cell(
      Cell::new(route.methods)
        .fg(to_comfy(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(
      Cell::new(route.path)
        .fg(to_comfy(if documented { colors.value() } else { colors.muted() }))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(route.group).fg(to_comfy(text)));
    row.add_cell(Cell::new(route.title).fg(to_comfy(text)));
    row.add_cell(
      Cell::new(route.skipped.unwrap_or_else(|| "documented".to_string()))
        .fg(to_comfy(if documented { colors.success() } else { colors.muted() })),
    );
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
