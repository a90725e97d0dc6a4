//! Delimited-text rendering of the annotated table with a trailing summary block.

use cartonfit_core::conf::TUP_LABELS_SUMMARY;
use cartonfit_core::spec::SpecSummary;
use polars::prelude::DataFrame;

use crate::spec::EnumCellValue;
use crate::util::{derive_cell_value_from_any_value, escape_csv_field};

/// Render the annotated table plus summary footer as one CSV text blob.
///
/// Missing cells become empty fields. The footer layout (blank separation,
/// `Summary` marker line, five `label,value` lines with 2-decimal
/// percentages) is fixed; downstream consumers parse it positionally.
pub fn render_analysis_csv(df_out: &DataFrame, summary: &SpecSummary) -> Result<String, String> {
    let l_colnames = df_out.get_column_names_str();
    let l_cols = df_out.get_columns();

    let mut c_csv = String::new();
    c_csv.push_str(
        &l_colnames
            .iter()
            .map(|c_name| escape_csv_field(c_name))
            .collect::<Vec<_>>()
            .join(","),
    );
    c_csv.push('\n');

    for n_idx_row in 0..df_out.height() {
        let mut l_fields = Vec::with_capacity(l_cols.len());
        for col in l_cols {
            let value = derive_cell_value_from_any_value(
                col.get(n_idx_row)
                    .map_err(|err| format!("Failed to read output cell: {err}"))?,
            );
            l_fields.push(match value {
                EnumCellValue::None => String::new(),
                EnumCellValue::String(val) => escape_csv_field(&val),
                EnumCellValue::Number(val) => val.to_string(),
            });
        }
        c_csv.push_str(&l_fields.join(","));
        c_csv.push('\n');
    }

    c_csv.push_str(&render_summary_block(summary));
    Ok(c_csv)
}

/// Render the summary footer block appended below the data rows.
pub fn render_summary_block(summary: &SpecSummary) -> String {
    format!(
        "\n\nSummary\n{},{}\n{},{}\n{}, {:.2}\n{},{}\n{}, {:.2}\n",
        TUP_LABELS_SUMMARY[0],
        summary.n_total,
        TUP_LABELS_SUMMARY[1],
        summary.cnt_ok,
        TUP_LABELS_SUMMARY[2],
        summary.pct_ok,
        TUP_LABELS_SUMMARY[3],
        summary.cnt_no_ok,
        TUP_LABELS_SUMMARY[4],
        summary.pct_no_ok,
    )
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
            Column::new("item".into(), vec!["A", "B", "C"]),
            Column::new("h".into(), vec!["10", "5", ""]),
            Column::new("w".into(), vec!["20", "10", "20"]),
            Column::new("l".into(), vec!["14", "abc", "10"]),
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
    fn render_analysis_csv_writes_blank_fields_for_missing_values() {
        let output = analyze_fixture();
        let c_csv = render_analysis_csv(&output.df_out, &output.summary).expect("render");
        let l_lines: Vec<&str> = c_csv.lines().collect();

        assert_eq!(
            l_lines[0],
            "Item ID,Height,Width,Length,Volume,Status,Optimal Cardboard Width"
        );
        assert_eq!(l_lines[1], "A,10,20,14,2800,OK,39");
        assert_eq!(l_lines[2], "B,5,10,,,No OK,23");
        assert_eq!(l_lines[3], "C,,20,10,,No OK,No Fit");
    }

    #[test]
    fn render_analysis_csv_appends_summary_footer() {
        let output = analyze_fixture();
        let c_csv = render_analysis_csv(&output.df_out, &output.summary).expect("render");

        assert!(c_csv.ends_with(
            "\n\nSummary\n\
             Total Items,3\n\
             OK Count,1\n\
             OK %, 33.33\n\
             No OK Count,2\n\
             No OK %, 66.67\n"
        ));
    }

    #[test]
    fn render_summary_block_formats_percentages_with_two_decimals() {
        let summary = SpecSummary {
            n_total: 4,
            cnt_ok: 3,
            cnt_no_ok: 1,
            pct_ok: 75.0,
            pct_no_ok: 25.0,
        };
        assert_eq!(
            render_summary_block(&summary),
            "\n\nSummary\nTotal Items,4\nOK Count,3\nOK %, 75.00\nNo OK Count,1\nNo OK %, 25.00\n"
        );
    }

    #[test]
    fn render_analysis_csv_handles_zero_row_table() {
        let df = DataFrame::new(vec![
            Column::new("item".into(), Vec::<String>::new()),
            Column::new("h".into(), Vec::<f64>::new()),
            Column::new("w".into(), Vec::<f64>::new()),
            Column::new("l".into(), Vec::<f64>::new()),
        ])
        .expect("build frame");
        let roles = SpecColumnRoles {
            col_id: EnumColumnIdentifier::Index(0),
            col_height: EnumColumnIdentifier::Index(1),
            col_width: EnumColumnIdentifier::Index(2),
            col_length: EnumColumnIdentifier::Index(3),
        };
        let output =
            analyze_table(&df, &roles, &derive_default_sizing_config()).expect("analyze");

        let c_csv = render_analysis_csv(&output.df_out, &output.summary).expect("render");
        assert!(c_csv.starts_with("Item ID,"));
        assert!(c_csv.contains("Total Items,0"));
        assert!(c_csv.contains("OK %, 0.00"));
    }
}
