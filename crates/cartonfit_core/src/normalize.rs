//! Raw-column coercion into validated numeric dimension sequences.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{AnyValue, DataFrame};

use crate::spec::{EnumColumnIdentifier, SpecColumnRoles, SpecNormalizedDimensions};

////////////////////////////////////////////////////////////////////////////////
// #region CellCoercion

/// Coerce one raw cell to a finite `f64`.
///
/// Unparseable, null, and non-finite values all become `None`; cell-level
/// dirt never raises. Strings are trimmed before parsing.
pub fn coerce_numeric_cell(value: &AnyValue<'_>) -> Option<f64> {
    let n_value = match value {
        AnyValue::UInt8(val) => *val as f64,
        AnyValue::UInt16(val) => *val as f64,
        AnyValue::UInt32(val) => *val as f64,
        AnyValue::UInt64(val) => *val as f64,
        AnyValue::Int8(val) => *val as f64,
        AnyValue::Int16(val) => *val as f64,
        AnyValue::Int32(val) => *val as f64,
        AnyValue::Int64(val) => *val as f64,
        AnyValue::Int128(val) => *val as f64,
        AnyValue::Float32(val) => *val as f64,
        AnyValue::Float64(val) => *val,
        AnyValue::Boolean(val) => {
            if *val {
                1.0
            } else {
                0.0
            }
        }
        AnyValue::String(val) => val.trim().parse::<f64>().ok()?,
        AnyValue::StringOwned(val) => val.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if n_value.is_finite() { Some(n_value) } else { None }
}

/// Extract identifier cell text; null stays `None`, everything else passes
/// through as its display text.
pub fn derive_id_text(value: &AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(val) => Some(val.to_string()),
        AnyValue::StringOwned(val) => Some(val.to_string()),
        other => Some(other.to_string()),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnResolution

/// Validate that `columns` has no duplicated names.
pub fn validate_unique_columns(columns: &[&str]) -> Result<(), String> {
    if columns.len() == columns.iter().collect::<BTreeSet<_>>().len() {
        return Ok(());
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns.iter().enumerate() {
        dict_pos.entry(c_name).or_default().push(n_idx);
    }

    let c_msg = dict_pos
        .iter()
        .filter_map(|(c_name, l_pos)| {
            if l_pos.len() > 1 {
                Some(format!("{c_name:?} x{} at indices {l_pos:?}", l_pos.len()))
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    Err(format!("Duplicate column names detected: {c_msg}"))
}

/// Resolve a name/index selector to a column index, rejecting absent columns.
pub fn resolve_column(df: &DataFrame, selector: &EnumColumnIdentifier) -> Result<usize, String> {
    let l_colnames = df.get_column_names_str();
    match selector {
        EnumColumnIdentifier::Index(n_idx) => {
            if *n_idx < l_colnames.len() {
                Ok(*n_idx)
            } else {
                Err(format!(
                    "Column index out of range: {n_idx} (table has {} columns).",
                    l_colnames.len()
                ))
            }
        }
        EnumColumnIdentifier::Name(c_name) => l_colnames
            .iter()
            .position(|c_col| *c_col == c_name.as_str())
            .ok_or_else(|| format!("Column not found: {c_name:?}")),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Normalizer

/// Coerce the three dimension columns of `df` into row-aligned numeric
/// sequences plus the per-row invalidity mask.
///
/// Structural failures (absent selector, duplicate column names) reject the
/// call; cell content failures degrade per cell to `None`.
pub fn normalize_dimensions(
    df: &DataFrame,
    roles: &SpecColumnRoles,
) -> Result<SpecNormalizedDimensions, String> {
    let l_colnames = df.get_column_names_str();
    validate_unique_columns(&l_colnames)?;

    let n_idx_id = resolve_column(df, &roles.col_id)?;
    let n_idx_height = resolve_column(df, &roles.col_height)?;
    let n_idx_width = resolve_column(df, &roles.col_width)?;
    let n_idx_length = resolve_column(df, &roles.col_length)?;

    let l_cols = df.get_columns();
    let n_height_df = df.height();

    let mut norm = SpecNormalizedDimensions {
        l_ids: Vec::with_capacity(n_height_df),
        l_heights: Vec::with_capacity(n_height_df),
        l_widths: Vec::with_capacity(n_height_df),
        l_lengths: Vec::with_capacity(n_height_df),
        l_invalid: Vec::with_capacity(n_height_df),
    };

    for n_idx_row in 0..n_height_df {
        let read_cell = |n_idx_col: usize| {
            l_cols[n_idx_col]
                .get(n_idx_row)
                .map_err(|err| format!("Failed to read cell value: {err}"))
        };

        norm.l_ids.push(derive_id_text(&read_cell(n_idx_id)?));
        let n_height = coerce_numeric_cell(&read_cell(n_idx_height)?);
        let n_width = coerce_numeric_cell(&read_cell(n_idx_width)?);
        let n_length = coerce_numeric_cell(&read_cell(n_idx_length)?);

        norm.l_invalid
            .push(n_height.is_none() || n_width.is_none() || n_length.is_none());
        norm.l_heights.push(n_height);
        norm.l_widths.push(n_width);
        norm.l_lengths.push(n_length);
    }

    Ok(norm)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
