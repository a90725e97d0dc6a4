//! Sizing constants and default configuration factories.

use crate::spec::SpecSizingConfig;

/// Machine envelope maximum height.
pub const N_HEIGHT_MACHINE_MAX: f64 = 11.0;
/// Machine envelope maximum width.
pub const N_WIDTH_MACHINE_MAX: f64 = 22.0;
/// Machine envelope maximum length.
pub const N_LENGTH_MACHINE_MAX: f64 = 15.0;

/// Cardboard stock widths, ascending.
pub const TUP_CARDBOARD_WIDTHS: [f64; 2] = [23.0, 39.0];

/// Output table column names in contract order.
pub const TUP_COLNAMES_OUT: [&str; 7] = [
    "Item ID",
    "Height",
    "Width",
    "Length",
    "Volume",
    "Status",
    "Optimal Cardboard Width",
];

/// Summary metric labels in report order.
pub const TUP_LABELS_SUMMARY: [&str; 5] =
    ["Total Items", "OK Count", "OK %", "No OK Count", "No OK %"];

/// Build the deployment default sizing configuration.
pub fn derive_default_sizing_config() -> SpecSizingConfig {
    SpecSizingConfig {
        n_height_max: N_HEIGHT_MACHINE_MAX,
        n_width_max: N_WIDTH_MACHINE_MAX,
        n_length_max: N_LENGTH_MACHINE_MAX,
        l_widths_cardboard: TUP_CARDBOARD_WIDTHS.to_vec(),
    }
}
