//! `cartonfit_io_export` v1:
//! Serialization of sizing-analysis output to downloadable formats.
//!
//! - `conf`   : sheet names and default format presets
//! - `spec`   : export models
//! - `util`   : pure cell/field helpers
//! - `csv`    : delimited-text rendering with summary footer
//! - `writer` : XLSX workbook writer (Results + Summary sheets)
pub mod conf;
pub mod csv;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{C_SHEET_RESULTS, C_SHEET_SUMMARY, derive_default_export_formats};
pub use csv::{render_analysis_csv, render_summary_block};
pub use spec::{EnumCellValue, SpecExportFormats, SpecExportReport};
pub use util::{derive_cell_value_from_any_value, escape_csv_field, if_lossy_cell_value};
pub use writer::{XlsxExportWriter, render_analysis_xlsx, write_analysis_workbook};
