//! `cartonfit_core` v1:
//! Item-size classification kernel.
//!
//! Straight two-stage pipeline over an in-memory table:
//! - `conf`      : constants and default presets
//! - `spec`      : specs/models/options
//! - `normalize` : raw-column coercion into numeric dimension sequences
//! - `classify`  : machine-fit/cardboard classification and summary aggregation
pub mod classify;
pub mod conf;
pub mod normalize;
pub mod spec;

pub use classify::{
    SpecAnalysisOutput, analyze_table, classify_rows, derive_cardboard_bucket, derive_machine_fit,
    derive_output_dataframe, derive_volume, summarize,
};
pub use conf::{
    N_HEIGHT_MACHINE_MAX, N_LENGTH_MACHINE_MAX, N_WIDTH_MACHINE_MAX, TUP_CARDBOARD_WIDTHS,
    TUP_COLNAMES_OUT, TUP_LABELS_SUMMARY, derive_default_sizing_config,
};
pub use normalize::{
    coerce_numeric_cell, derive_id_text, normalize_dimensions, resolve_column,
    validate_unique_columns,
};
pub use spec::{
    EnumCardboardBucket, EnumColumnIdentifier, EnumMachineFit, SpecColumnRoles, SpecItemRecord,
    SpecNormalizedDimensions, SpecSizingConfig, SpecSummary,
};
