//! Drives an inventory grid through a scripted session and prints each
//! frame as terminal text.
//!
//! Usage: `gridline-demo [dataset.json]`. Without an argument the bundled
//! inventory is used. A dataset is `{"columns": [...], "rows": [...]}`.

mod paths;

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use crossterm::style::Stylize;
use gridline::node::text::render_lines;
use gridline::prelude::*;
use gridline::search::filter_rows;
use gridline::sort::sorted_indices;
use gridline::{ColumnSpec, ConfigError, SchemaError, validate_schema};
use serde::Deserialize;
use serde_json::Value;
use simplelog::{Config, LevelFilter, WriteLogger};

const BUNDLED_DATASET: &str = include_str!("../data/inventory.json");
const PAGE_SIZE: usize = 5;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Deserialize)]
struct Dataset {
    columns: Vec<ColumnSpec>,
    rows: Vec<Value>,
}

/// Sort and search requests reported by the grid, applied between frames.
#[derive(Debug, Default)]
struct Requests {
    sort: Option<SortConfig>,
    search: Option<String>,
    dirty: bool,
}

fn main() -> ExitCode {
    init_logging();

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    paths::rotate_logs();
    let path = paths::log_file().unwrap_or_else(|| PathBuf::from("gridline-demo.log"));
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled, cannot create '{}': {e}", path.display());
            return;
        }
    };
    if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
        eprintln!("Logging disabled: {e}");
    }
}

fn load_config() -> Result<GridConfig, DemoError> {
    match paths::config_file() {
        Some(path) => {
            log::info!("Using config {}", path.display());
            Ok(GridConfig::load(path)?)
        }
        None => Ok(GridConfig::default()),
    }
}

fn load_dataset(path: Option<String>) -> Result<Dataset, DemoError> {
    let text = match path {
        Some(path) => fs::read_to_string(&path).map_err(|source| DemoError::Read {
            path: path.into(),
            source,
        })?,
        None => BUNDLED_DATASET.to_string(),
    };
    let dataset: Dataset = serde_json::from_str(&text)?;
    validate_schema(&dataset.columns)?;
    log::info!(
        "Loaded {} columns, {} rows",
        dataset.columns.len(),
        dataset.rows.len()
    );
    Ok(dataset)
}

fn run(dataset_path: Option<String>) -> Result<(), DemoError> {
    let config = load_config()?;
    let dataset = load_dataset(dataset_path)?;
    let columns: Vec<Column<Value>> = dataset.columns.into_iter().map(Column::from).collect();
    let all_rows = dataset.rows;
    let requests = Rc::new(RefCell::new(Requests::default()));

    let mut grid = build_grid(columns.clone(), all_rows.clone(), config, &requests);
    let mut out = io::stdout().lock();

    show(&mut out, "Inventory", &grid)?;

    grid.toggle_all();
    show(&mut out, "Select all on page", &grid)?;

    grid.toggle_expanded("p-100");
    show(&mut out, "Expand hex bolt", &grid)?;

    grid.press_header("price");
    apply_requests(&mut grid, &all_rows, &columns, &requests);
    show(&mut out, "Sort by price", &grid)?;

    if let Some(index) = grid.index_of("p-101") {
        grid.open_action_menu(index);
        show(&mut out, "Row actions", &grid)?;
        grid.execute_action(0);
    }

    grid.next_page();
    show(&mut out, "Next page", &grid)?;

    grid.set_search("acme");
    apply_requests(&mut grid, &all_rows, &columns, &requests);
    show(&mut out, "Search 'acme'", &grid)?;

    log::info!("Final selection: {:?}", grid.selected_rows());
    Ok(())
}

fn build_grid(
    columns: Vec<Column<Value>>,
    rows: Vec<Value>,
    config: GridConfig,
    requests: &Rc<RefCell<Requests>>,
) -> Grid<Value> {
    let total = rows.len();
    let child_config = config.clone();
    let sort_requests = Rc::clone(requests);
    let search_requests = Rc::clone(requests);

    Grid::new(columns, GridMode::Root)
        .config(config)
        .data(rows)
        .selectable(true)
        .row_selectable(|row: &Value, _| {
            if row["locked"] == Value::Bool(true) {
                RowSelectability::blocked("Locked for stock count")
            } else {
                RowSelectability::allowed()
            }
        })
        .on_selection_change(|ids| log::info!("Selection now {} rows", ids.len()))
        .expandable_rows(
            ExpandableRows::new(move |row: &Value, _| variant_grid(variants(row), &child_config))
                .expandable_if(has_variants)
                .on_expanded_rows_change(|change: &ExpansionChange| {
                    log::info!(
                        "Row {} expanded={}",
                        change.changed_row_id,
                        change.is_expanded
                    )
                }),
        )
        .row_actions(vec![
            RowAction::new("Open", |row: &Value, index| {
                log::info!("Open {} (row {index})", row["name"])
            })
            .icon("↗"),
            RowAction::new("Archive", |row: &Value, _| log::info!("Archive {}", row["id"]))
                .destructive()
                .disabled_if(|row: &Value| row["archived"] == Value::Bool(true)),
        ])
        .on_sort_change(move |sort| {
            let mut requests = sort_requests.borrow_mut();
            requests.sort = Some(sort.clone());
            requests.dirty = true;
        })
        .searchable(true)
        .on_search_change(move |value| {
            let mut requests = search_requests.borrow_mut();
            requests.search = Some(value.to_string());
            requests.dirty = true;
        })
        .pagination(Pagination::new(1, PAGE_SIZE, total))
        .local_pagination(true)
        .on_refresh(|| log::info!("Refresh requested"))
}

/// Variant rows render as a child grid, recursively.
///
/// The child grid is rebuilt per frame, so its node ids are only stable
/// within one frame.
fn variant_grid(rows: Vec<Value>, config: &GridConfig) -> Node {
    let nested: Vec<RowId> = rows
        .iter()
        .filter(|row| has_variants(row, 0))
        .filter_map(|row| row.get("id").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    let child_config = config.clone();

    Grid::new(
        vec![
            Column::new("name", "Variant").fixed(16),
            Column::new("price", "Price")
                .kind(ColumnType::Money)
                .align(Align::Right)
                .fixed(8),
            Column::new("stock", "Stock")
                .kind(ColumnType::Number)
                .align(Align::Right)
                .fixed(7),
        ],
        GridMode::Child,
    )
    .config(config.clone())
    .data(rows)
    .expandable_rows(
        ExpandableRows::new(move |row: &Value, _| variant_grid(variants(row), &child_config))
            .expandable_if(has_variants)
            .expanded_rows(nested),
    )
    .render()
}

fn variants(row: &Value) -> Vec<Value> {
    row.get("variants")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn has_variants(row: &Value, _index: usize) -> bool {
    row.get("variants").is_some_and(Value::is_array)
}

/// Re-derive the visible rows from pending sort and search requests.
fn apply_requests(
    grid: &mut Grid<Value>,
    all_rows: &[Value],
    columns: &[Column<Value>],
    requests: &RefCell<Requests>,
) {
    let mut requests = requests.borrow_mut();
    if !requests.dirty {
        return;
    }
    requests.dirty = false;

    let query = requests.search.clone().unwrap_or_default();
    let mut rows: Vec<Value> = filter_rows(&query, columns, all_rows)
        .into_iter()
        .map(|hit| all_rows[hit.index].clone())
        .collect();

    if let Some(sort) = &requests.sort
        && let Some(column) = columns.iter().find(|column| column.id == sort.column_id)
    {
        rows = sorted_indices(&rows, column.path(), sort.direction)
            .into_iter()
            .map(|index| rows[index].clone())
            .collect();
    }

    let page = match grid.current_pagination() {
        Some(p) if grid.current_sort() == requests.sort.as_ref() && query.is_empty() => p.page,
        _ => 1,
    };
    grid.set_pagination(Some(Pagination::new(page, PAGE_SIZE, rows.len())));
    grid.set_sort(requests.sort.clone());
    grid.set_search_value(query);
    grid.set_data(rows);
}

fn show(out: &mut impl Write, title: &str, grid: &Grid<Value>) -> Result<(), DemoError> {
    writeln!(out, "{}", format!("── {title} ──").bold().cyan())?;
    for line in render_lines(&grid.render()) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    Ok(())
}
