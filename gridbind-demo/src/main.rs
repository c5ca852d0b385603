//! Scripted walk through a grid binding backed by the headless widget.
//!
//! Usage: `gridbind-demo [columns.json]`. Set `GRIDBIND_LOG` to change the
//! log level (default `info`).

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;
use std::{env, fs};

use gridbind::headless;
use gridbind::prelude::*;
use serde_json::json;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use thiserror::Error;

#[derive(Debug, Error)]
enum DemoError {
    #[error("invalid log level: {0}")]
    LogLevel(#[from] log::ParseLevelError),
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid column definitions in {}: {source}", path.display())]
    Columns {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    init_logging()?;

    let columns = match env::args_os().nth(1) {
        Some(path) => load_columns(Path::new(&path))?,
        None => heroes_columns(),
    };

    let options = GridOptions::default()
        .with_editing(true)
        .with_selection_model("RowSelectionModel")
        .with_plugin("AutoTooltips")
        .with_plugin("HeaderButtons");
    let factory: fn(GridSetup<'_>) -> HeadlessGrid = HeadlessGrid::new;
    let mut binding = GridBinding::new(factory, options, headless::registry());
    binding.subscribe(|event| println!("  -> {:?}", event));

    let heroes = heroes_data();
    let data: SharedDataSource = heroes.clone();

    println!("load {} columns", columns.len());
    let report = binding.apply(PropertyChanges::new().columns(columns.clone()).data_source(data));
    log::info!("[demo] initial build: {:?}", report);

    let first = columns.first().map(|c| c.id.clone()).unwrap_or_default();
    let second = columns.get(1).map(|c| c.id.clone()).unwrap_or_else(|| first.clone());

    println!("edit row 0, then move to row 1");
    binding.handle_event(GridEvent::BeforeEditCell {
        row: 0,
        column_id: second.clone(),
    });
    binding.handle_event(GridEvent::CellChanged {
        row: 0,
        column_id: second.clone(),
        value: json!("Windstorm II"),
    });
    write_back(&mut binding, &heroes, 0, &second, json!("Windstorm II"));
    binding.handle_event(GridEvent::BeforeEditCell {
        row: 1,
        column_id: first.clone(),
    });

    println!("change row 1, then click the header of row 2");
    binding.handle_event(GridEvent::CellChanged {
        row: 1,
        column_id: first.clone(),
        value: json!(14),
    });
    write_back(&mut binding, &heroes, 1, &first, json!(14));
    binding.handle_event(GridEvent::ActiveCellChanged {
        row: 2,
        cell: HEADER_COLUMN,
    });

    println!("reverse the columns with the cursor on row 2, column 1");
    if let Some(grid) = binding.grid_mut() {
        grid.set_active_cell(2, 1);
    }
    let mut reversed = columns;
    reversed.reverse();
    let report = binding.apply(PropertyChanges::new().columns(reversed));
    println!("  cursor now {:?}", report.cursor);

    println!("sort by {} descending", second);
    let field = binding
        .columns()
        .iter()
        .find(|c| c.id == second)
        .map(|c| c.field.clone())
        .unwrap_or_default();
    binding.handle_event(GridEvent::Sort {
        columns: vec![SortColumn::descending(second, field)],
    });
    if let Some(data) = binding.data_source() {
        let rows = data.borrow().range(0, 4);
        for row in rows {
            println!("  {}", row);
        }
    }

    println!("scroll down two rows");
    let offset = f64::from(binding.options().row_height) * 2.0;
    binding.handle_event(GridEvent::Scroll { scroll_top: offset });

    println!("refresh rows 0..2");
    binding.refresh_rows(0..2);

    println!("tear down");
    binding.destroy();
    Ok(())
}

/// Store a committed cell value in the source and redraw its row.
fn write_back<F: GridFactory>(
    binding: &mut GridBinding<F>,
    heroes: &RefCell<VecDataSource>,
    row: usize,
    column_id: &str,
    value: CellValue,
) {
    let Some(field) = binding.columns().iter().find(|c| c.id == column_id).map(|c| c.field.clone()) else {
        return;
    };
    if heroes.borrow_mut().set_field(row, &field, value) {
        binding.refresh_rows(row..row + 1);
    } else {
        log::warn!("[demo] row {} is not a record, value dropped", row);
    }
}

fn init_logging() -> Result<(), DemoError> {
    let level = match env::var("GRIDBIND_LOG") {
        Ok(value) => LevelFilter::from_str(&value)?,
        Err(_) => LevelFilter::Info,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}

fn load_columns(path: &Path) -> Result<Vec<ColumnDefinition>, DemoError> {
    let text = fs::read_to_string(path).map_err(|source| DemoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let columns = serde_json::from_str(&text).map_err(|source| DemoError::Columns {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("[demo] loaded columns from {}", path.display());
    Ok(columns)
}

fn heroes_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("colId", "Id", "id").sortable().width(60),
        ColumnDefinition::new("colName", "Name", "name").sortable(),
        ColumnDefinition::new("colCreatedDate", "Created", "createdDate").min_width(100),
    ]
}

fn heroes_data() -> Rc<RefCell<VecDataSource>> {
    Rc::new(RefCell::new(VecDataSource::new(vec![
        json!({"id": 1, "name": "Windstorm", "createdDate": "2016-11-01"}),
        json!({"id": 13, "name": "Bombasto", "createdDate": "2017-03-14"}),
        json!({"id": 15, "name": "Magneta", "createdDate": "2017-08-02"}),
        json!({"id": 20, "name": "Tornado", "createdDate": "2018-01-20"}),
    ])))
}
