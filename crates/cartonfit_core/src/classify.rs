//! Machine-fit/cardboard classification and summary aggregation.

use polars::prelude::{Column, DataFrame};

use crate::conf::TUP_COLNAMES_OUT;
use crate::normalize::normalize_dimensions;
use crate::spec::{
    EnumCardboardBucket, EnumMachineFit, SpecColumnRoles, SpecItemRecord,
    SpecNormalizedDimensions, SpecSizingConfig, SpecSummary,
};

/// Full output of one analysis run.
#[derive(Debug, Clone)]
pub struct SpecAnalysisOutput {
    /// Annotated table with the seven contract columns, input row order.
    pub df_out: DataFrame,
    /// Per-row classification records backing `df_out`.
    pub records: Vec<SpecItemRecord>,
    /// Dataset-level pass/fail statistics.
    pub summary: SpecSummary,
}

////////////////////////////////////////////////////////////////////////////////
// #region RowClassification

/// `height * width * length` iff all three parsed; never a number built from
/// partially-missing data.
pub fn derive_volume(
    height: Option<f64>,
    width: Option<f64>,
    length: Option<f64>,
) -> Option<f64> {
    match (height, width, length) {
        (Some(n_height), Some(n_width), Some(n_length)) => Some(n_height * n_width * n_length),
        _ => None,
    }
}

/// Machine envelope check with closed bounds; any missing dimension is `NoOk`.
pub fn derive_machine_fit(
    height: Option<f64>,
    width: Option<f64>,
    length: Option<f64>,
    config: &SpecSizingConfig,
) -> EnumMachineFit {
    match (height, width, length) {
        (Some(n_height), Some(n_width), Some(n_length))
            if n_height <= config.n_height_max
                && n_width <= config.n_width_max
                && n_length <= config.n_length_max =>
        {
            EnumMachineFit::Ok
        }
        _ => EnumMachineFit::NoOk,
    }
}

/// Pick the smallest sufficient cardboard width for `height + width`.
///
/// `widths_cardboard` is scanned ascending, first match wins, so a wrap
/// satisfying several widths lands in the smallest bucket. Length is never
/// read. Missing height or width is an immediate `NoFit`.
pub fn derive_cardboard_bucket(
    height: Option<f64>,
    width: Option<f64>,
    widths_cardboard: &[f64],
) -> EnumCardboardBucket {
    let (Some(n_height), Some(n_width)) = (height, width) else {
        return EnumCardboardBucket::NoFit;
    };

    let n_wrap = n_height + n_width;
    for n_width_stock in widths_cardboard {
        if n_wrap <= *n_width_stock {
            return EnumCardboardBucket::Width(*n_width_stock);
        }
    }
    EnumCardboardBucket::NoFit
}

/// Classify every normalized row into an item record, preserving row order.
pub fn classify_rows(
    norm: &SpecNormalizedDimensions,
    config: &SpecSizingConfig,
) -> Vec<SpecItemRecord> {
    let mut l_records = Vec::with_capacity(norm.height());
    for n_idx_row in 0..norm.height() {
        let n_height = norm.l_heights[n_idx_row];
        let n_width = norm.l_widths[n_idx_row];
        let n_length = norm.l_lengths[n_idx_row];

        l_records.push(SpecItemRecord {
            id_text: norm.l_ids[n_idx_row].clone(),
            height: n_height,
            width: n_width,
            length: n_length,
            if_valid: !norm.l_invalid[n_idx_row],
            volume: derive_volume(n_height, n_width, n_length),
            machine_fit: derive_machine_fit(n_height, n_width, n_length, config),
            cardboard: derive_cardboard_bucket(n_height, n_width, &config.l_widths_cardboard),
        });
    }
    l_records
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Aggregation

// Ties round to even so exactly representable halves land on the even
// hundredth (1/32 -> 3.12, not 3.13).
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Fold classified rows into pass/fail counts and percentages rounded to
/// 2 decimals, ties to even.
///
/// Zero rows short-circuits both percentages to `0.0`.
pub fn summarize(records: &[SpecItemRecord]) -> SpecSummary {
    let n_total = records.len();
    let cnt_ok = records
        .iter()
        .filter(|record| record.machine_fit == EnumMachineFit::Ok)
        .count();
    let cnt_no_ok = n_total - cnt_ok;

    let (pct_ok, pct_no_ok) = if n_total == 0 {
        (0.0, 0.0)
    } else {
        (
            round_2dp(cnt_ok as f64 / n_total as f64 * 100.0),
            round_2dp(cnt_no_ok as f64 / n_total as f64 * 100.0),
        )
    };

    SpecSummary {
        n_total,
        cnt_ok,
        cnt_no_ok,
        pct_ok,
        pct_no_ok,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutputAssembly

/// Assemble the annotated output table, one row per record, in record order.
///
/// Column order is part of the contract; downstream serializers rely on it.
pub fn derive_output_dataframe(records: &[SpecItemRecord]) -> Result<DataFrame, String> {
    let l_ids: Vec<Option<String>> = records.iter().map(|rec| rec.id_text.clone()).collect();
    let l_heights: Vec<Option<f64>> = records.iter().map(|rec| rec.height).collect();
    let l_widths: Vec<Option<f64>> = records.iter().map(|rec| rec.width).collect();
    let l_lengths: Vec<Option<f64>> = records.iter().map(|rec| rec.length).collect();
    let l_volumes: Vec<Option<f64>> = records.iter().map(|rec| rec.volume).collect();
    let l_status: Vec<&str> = records.iter().map(|rec| rec.machine_fit.label()).collect();
    let l_cardboard: Vec<String> = records.iter().map(|rec| rec.cardboard.label()).collect();

    DataFrame::new(vec![
        Column::new(TUP_COLNAMES_OUT[0].into(), l_ids),
        Column::new(TUP_COLNAMES_OUT[1].into(), l_heights),
        Column::new(TUP_COLNAMES_OUT[2].into(), l_widths),
        Column::new(TUP_COLNAMES_OUT[3].into(), l_lengths),
        Column::new(TUP_COLNAMES_OUT[4].into(), l_volumes),
        Column::new(TUP_COLNAMES_OUT[5].into(), l_status),
        Column::new(TUP_COLNAMES_OUT[6].into(), l_cardboard),
    ])
    .map_err(|err| format!("Failed to assemble output table: {err}"))
}

/// Run the whole pipeline: validate config, normalize, classify, summarize,
/// assemble. Pure; every invocation recomputes from scratch.
pub fn analyze_table(
    df: &DataFrame,
    roles: &SpecColumnRoles,
    config: &SpecSizingConfig,
) -> Result<SpecAnalysisOutput, String> {
    config.validate()?;
    let norm = normalize_dimensions(df, roles)?;
    let records = classify_rows(&norm, config);
    let summary = summarize(&records);
    let df_out = derive_output_dataframe(&records)?;

    Ok(SpecAnalysisOutput {
        df_out,
        records,
        summary,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
