//! Export constants and default format presets.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder};

use crate::spec::SpecExportFormats;

/// Worksheet name for the annotated table.
pub const C_SHEET_RESULTS: &str = "Results";
/// Worksheet name for the aggregate statistics.
pub const C_SHEET_SUMMARY: &str = "Summary";

/// Build default cell formats used by [`crate::writer::XlsxExportWriter`].
pub fn derive_default_export_formats() -> SpecExportFormats {
    let fmt_base = Format::new()
        .set_font_name("Times New Roman")
        .set_font_size(11.0)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);

    SpecExportFormats {
        fmt_header: fmt_base
            .clone()
            .set_bold()
            .set_align(FormatAlign::Center),
        fmt_number: fmt_base.clone().set_num_format("General"),
        fmt_text: fmt_base,
    }
}
