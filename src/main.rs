//! Enterprise Grid - Main Entry Point
//!
//! Runs the grid engine over a JSON row file and prints one page as text.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use enterprise_grid::data_table::SortSpec;
use enterprise_grid::domain::{CellValue, ColumnSpec, ColumnType, GridConfig, Row};
use enterprise_grid::helpers::load_rows;
use enterprise_grid::i18n;
use enterprise_grid::utils::format::truncate;
use enterprise_grid::DataTable;

const CELL_WIDTH: usize = 18;

#[derive(Parser, Debug)]
#[command(name = "enterprise-grid", version, about = "Search, filter, sort and page tabular data")]
struct Cli {
    /// Grid definition (TOML); defaults to grid.toml in the config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON array of row objects
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Global search term
    #[arg(short, long)]
    search: Option<String>,

    /// Column filter as key=value (repeatable)
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Sort column, optionally suffixed with :desc
    #[arg(long)]
    sort: Option<String>,

    /// 1-based page number
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Hide a column (repeatable)
    #[arg(long)]
    hide: Vec<String>,

    /// Print every matching row as JSON instead of a page
    #[arg(long)]
    export: bool,

    /// Print the JSON schema of the grid definition and exit
    #[arg(long)]
    print_schema: bool,
}

fn parse_filter(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{value}`"))
}

fn parse_sort(value: &str) -> anyhow::Result<SortSpec> {
    match value.rsplit_once(':') {
        Some((key, "asc")) => Ok(SortSpec::asc(key)),
        Some((key, "desc")) => Ok(SortSpec::desc(key)),
        Some((_, other)) => bail!("unknown sort direction `{other}`"),
        None => Ok(SortSpec::asc(value)),
    }
}

/// Columns typed from the first row when no schema is configured
fn infer_columns(rows: &[Row]) -> Vec<ColumnSpec> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let mut keys: Vec<(&String, &CellValue)> = first.iter().collect();
    keys.sort_by(|a, b| a.0.cmp(b.0));
    keys.into_iter()
        .map(|(key, value)| {
            let column_type = match value {
                CellValue::Number(_) => ColumnType::Number,
                CellValue::Bool(_) => ColumnType::Boolean,
                CellValue::Date(_) => ColumnType::Date,
                CellValue::Null | CellValue::Text(_) => ColumnType::Text,
            };
            ColumnSpec::new(key.clone(), key.clone())
                .of_type(column_type)
                .sortable()
                .filterable()
        })
        .collect()
}

fn pad(text: &str) -> String {
    format!("{:<width$}", truncate(text, CELL_WIDTH), width = CELL_WIDTH)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.print_schema {
        println!("{}", GridConfig::json_schema()?);
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => GridConfig::load(path)
            .with_context(|| format!("failed to load grid config {}", path.display()))?,
        None => GridConfig::try_load_default()?,
    };

    let rows = match &cli.data {
        Some(path) => {
            load_rows(path).with_context(|| format!("failed to load rows {}", path.display()))?
        }
        None => Vec::new(),
    };
    if config.columns.is_empty() {
        config.columns = infer_columns(&rows);
    }

    let mut table = DataTable::from_rows(rows, &config)?;

    if let Some(size) = cli.page_size {
        table.set_page_size(size)?;
    }
    if let Some(term) = &cli.search {
        table.set_search_term(term.as_str());
    }
    for (key, value) in &cli.filters {
        table.set_column_filter(key, value.as_str())?;
    }
    if let Some(sort) = &cli.sort {
        table.set_sort(Some(parse_sort(sort)?))?;
    }
    for key in &cli.hide {
        table.toggle_column_visibility(key)?;
    }
    table.set_page(cli.page)?;

    if cli.export {
        match table.export() {
            Some(export) => println!("{}", export.to_json()?),
            None => bail!("export is disabled for this grid"),
        }
        return Ok(());
    }

    let view = table.view();
    let locale = view.locale;

    let header: Vec<String> = view.columns.iter().map(|c| pad(&c.label)).collect();
    println!("{}", header.join(" | "));
    println!("{}", "-".repeat(header.len() * (CELL_WIDTH + 3)));

    match view.empty_message() {
        Some(message) => println!("{message}"),
        None => {
            for row in &view.rows {
                let cells: Vec<String> = view
                    .columns
                    .iter()
                    .map(|c| pad(&view.cell_text(row, c)))
                    .collect();
                println!("{}", cells.join(" | "));
            }
        }
    }

    if !view.aggregates.is_empty() {
        let totals: Vec<String> = view
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| match view.total_text(c) {
                Some(total) => pad(&total),
                None if i == 0 => pad(&i18n::t(locale, "table-totals")),
                None => pad(""),
            })
            .collect();
        println!("{}", totals.join(" | "));
    }

    println!(
        "{} {} {} {} | {}",
        i18n::t(locale, "page-show"),
        view.page,
        i18n::t(locale, "page-of"),
        view.total_pages,
        view.summary()
    );

    Ok(())
}
