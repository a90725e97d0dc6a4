//! Shared export models.

use rust_xlsxwriter::Format;

/// Normalized cell value during the write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

/// Cell format presets for one workbook export.
#[derive(Debug, Clone)]
pub struct SpecExportFormats {
    /// Generic text cell format.
    pub fmt_text: Format,
    /// Numeric cell format.
    pub fmt_number: Format,
    /// Header cell format.
    pub fmt_header: Format,
}

/// Per-export report of non-fatal diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecExportReport {
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecExportReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}
