// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Single-pass CSV scanning into header-keyed records

mod cell_grid;
mod csv_parser;

pub use cell_grid::CellGrid;
pub use csv_parser::{parse_csv, CsvParser};
