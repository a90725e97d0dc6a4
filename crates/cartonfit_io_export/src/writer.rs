//! XLSX workbook writer producing the Results and Summary sheets.

use std::path::Path;

use cartonfit_core::conf::TUP_LABELS_SUMMARY;
use cartonfit_core::spec::SpecSummary;
use polars::prelude::DataFrame;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::conf::{C_SHEET_RESULTS, C_SHEET_SUMMARY, derive_default_export_formats};
use crate::spec::{EnumCellValue, SpecExportFormats, SpecExportReport};
use crate::util::{derive_cell_value_from_any_value, if_lossy_cell_value};

/// Stateful workbook writer for one analysis export.
///
/// The workbook is buffered in memory until [`Self::save`] or
/// [`Self::save_to_buffer`] finalizes it. Non-fatal diagnostics accumulate in
/// the export report, available through [`Self::report`].
pub struct XlsxExportWriter {
    workbook: Workbook,
    formats: SpecExportFormats,
    report: SpecExportReport,
    if_closed: bool,
}

impl XlsxExportWriter {
    /// Create a writer with the given format presets.
    pub fn new(formats: SpecExportFormats) -> Self {
        Self {
            workbook: Workbook::new(),
            formats,
            report: SpecExportReport::default(),
            if_closed: false,
        }
    }

    /// Return the accumulated export report.
    pub fn report(&self) -> &SpecExportReport {
        &self.report
    }

    /// Write the annotated table as the Results sheet: one header row, then
    /// one worksheet row per table row, numeric columns written as numbers
    /// and null cells written blank.
    pub fn write_results_sheet(&mut self, df_out: &DataFrame) -> Result<(), String> {
        if self.if_closed {
            return Err("Cannot write after the workbook was finalized.".to_string());
        }

        let l_colnames: Vec<String> = df_out
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(C_SHEET_RESULTS)
            .map_err(derive_xlsx_error_text)?;

        for (n_idx_col, c_colname) in l_colnames.iter().enumerate() {
            worksheet
                .write_string_with_format(
                    0,
                    cast_col_num(n_idx_col)?,
                    c_colname,
                    &self.formats.fmt_header,
                )
                .map_err(derive_xlsx_error_text)?;
        }

        let l_cols = df_out.get_columns();
        let mut n_cells_lossy = 0usize;
        for n_idx_row in 0..df_out.height() {
            for (n_idx_col, col) in l_cols.iter().enumerate() {
                let value_raw = col
                    .get(n_idx_row)
                    .map_err(|err| format!("Failed to read output cell: {err}"))?;
                if if_lossy_cell_value(&value_raw) {
                    n_cells_lossy += 1;
                }
                let value = derive_cell_value_from_any_value(value_raw);
                let fmt = if col.dtype().is_numeric() {
                    &self.formats.fmt_number
                } else {
                    &self.formats.fmt_text
                };
                write_cell_with_format(worksheet, n_idx_row + 1, n_idx_col, &value, fmt)?;
            }
        }

        if n_cells_lossy > 0 {
            self.report.warn(format!(
                "{C_SHEET_RESULTS}: {n_cells_lossy} cell(s) with unsupported dtype written as display text."
            ));
        }

        Ok(())
    }

    /// Write the aggregate statistics as the Summary sheet (Metric/Value).
    pub fn write_summary_sheet(&mut self, summary: &SpecSummary) -> Result<(), String> {
        if self.if_closed {
            return Err("Cannot write after the workbook was finalized.".to_string());
        }

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(C_SHEET_SUMMARY)
            .map_err(derive_xlsx_error_text)?;

        worksheet
            .write_string_with_format(0, 0, "Metric", &self.formats.fmt_header)
            .map_err(derive_xlsx_error_text)?;
        worksheet
            .write_string_with_format(0, 1, "Value", &self.formats.fmt_header)
            .map_err(derive_xlsx_error_text)?;

        let l_metrics: [(&str, f64); 5] = [
            (TUP_LABELS_SUMMARY[0], summary.n_total as f64),
            (TUP_LABELS_SUMMARY[1], summary.cnt_ok as f64),
            (TUP_LABELS_SUMMARY[2], summary.pct_ok),
            (TUP_LABELS_SUMMARY[3], summary.cnt_no_ok as f64),
            (TUP_LABELS_SUMMARY[4], summary.pct_no_ok),
        ];
        for (n_idx_row, (c_label, n_value)) in l_metrics.iter().enumerate() {
            worksheet
                .write_string_with_format(
                    cast_row_num(n_idx_row + 1)?,
                    0,
                    *c_label,
                    &self.formats.fmt_text,
                )
                .map_err(derive_xlsx_error_text)?;
            worksheet
                .write_number_with_format(
                    cast_row_num(n_idx_row + 1)?,
                    1,
                    *n_value,
                    &self.formats.fmt_number,
                )
                .map_err(derive_xlsx_error_text)?;
        }

        Ok(())
    }

    /// Flush the workbook to disk. Idempotent.
    pub fn save(&mut self, path_file_out: &Path) -> Result<(), String> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(path_file_out)
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        Ok(())
    }

    /// Serialize the workbook into in-memory XLSX bytes.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, String> {
        if self.if_closed {
            return Err("Workbook was already finalized.".to_string());
        }
        let v_bytes = self
            .workbook
            .save_to_buffer()
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        Ok(v_bytes)
    }
}

/// Write a two-sheet workbook (Results + Summary) to `path_file_out` with the
/// default format presets.
pub fn write_analysis_workbook(
    path_file_out: &Path,
    df_out: &DataFrame,
    summary: &SpecSummary,
) -> Result<(), String> {
    let mut writer = XlsxExportWriter::new(derive_default_export_formats());
    writer.write_results_sheet(df_out)?;
    writer.write_summary_sheet(summary)?;
    writer.save(path_file_out)
}

/// Serialize the two-sheet workbook into XLSX bytes with the default format
/// presets.
pub fn render_analysis_xlsx(df_out: &DataFrame, summary: &SpecSummary) -> Result<Vec<u8>, String> {
    let mut writer = XlsxExportWriter::new(derive_default_export_formats());
    writer.write_results_sheet(df_out)?;
    writer.write_summary_sheet(summary)?;
    writer.save_to_buffer()
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), String> {
    match value {
        EnumCellValue::None => {
            worksheet
                .write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::String(val) => {
            worksheet
                .write_string_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    *val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}

#[cfg(test)]
mod tests {
    use cartonfit_core::conf::derive_default_sizing_config;
    use cartonfit_core::spec::{EnumColumnIdentifier, SpecColumnRoles};
    use cartonfit_core::{SpecAnalysisOutput, analyze_table};
    use polars::prelude::{Column, DataFrame};

    use super::*;

    fn analyze_fixture() -> SpecAnalysisOutput {
        let df = DataFrame::new(vec![
            Column::new("item".into(), vec!["A", "B"]),
            Column::new("h".into(), vec!["10", "bad"]),
            Column::new("w".into(), vec!["20", "10"]),
            Column::new("l".into(), vec!["14", "2"]),
        ])
        .expect("build frame");
        let roles = SpecColumnRoles {
            col_id: EnumColumnIdentifier::Name("item".to_string()),
            col_height: EnumColumnIdentifier::Name("h".to_string()),
            col_width: EnumColumnIdentifier::Name("w".to_string()),
            col_length: EnumColumnIdentifier::Name("l".to_string()),
        };
        analyze_table(&df, &roles, &derive_default_sizing_config()).expect("analyze")
    }

    #[test]
    fn render_analysis_xlsx_produces_zip_container_bytes() {
        let output = analyze_fixture();
        let v_bytes = render_analysis_xlsx(&output.df_out, &output.summary).expect("render");
        // XLSX is a ZIP container; the local file header magic is "PK".
        assert!(v_bytes.len() > 4);
        assert_eq!(&v_bytes[..2], b"PK");
    }

    #[test]
    fn normal_export_accumulates_no_warnings() {
        let output = analyze_fixture();
        let mut writer = XlsxExportWriter::new(derive_default_export_formats());
        writer.write_results_sheet(&output.df_out).expect("results");
        writer.write_summary_sheet(&output.summary).expect("summary");
        assert!(writer.report().warnings.is_empty());
    }

    #[test]
    fn results_sheet_warns_on_unsupported_dtype_cells() {
        use polars::prelude::{NamedFrom, Series};

        let df = DataFrame::new(vec![Column::new(
            "nested".into(),
            vec![Series::new("".into(), vec![1i64, 2])],
        )])
        .expect("build frame");

        let mut writer = XlsxExportWriter::new(derive_default_export_formats());
        writer.write_results_sheet(&df).expect("results");

        assert_eq!(writer.report().warnings.len(), 1);
        assert!(
            writer.report().warnings[0].contains("unsupported dtype"),
            "{}",
            writer.report().warnings[0]
        );
    }

    #[test]
    fn writer_rejects_sheet_writes_after_finalize() {
        let output = analyze_fixture();
        let mut writer = XlsxExportWriter::new(derive_default_export_formats());
        writer.write_results_sheet(&output.df_out).expect("results");
        writer.write_summary_sheet(&output.summary).expect("summary");
        writer.save_to_buffer().expect("buffer");

        assert!(writer.write_results_sheet(&output.df_out).is_err());
        assert!(writer.write_summary_sheet(&output.summary).is_err());
        assert!(writer.save_to_buffer().is_err());
    }
}
