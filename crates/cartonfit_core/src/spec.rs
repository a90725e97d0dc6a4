//! Shared sizing-analysis models.

////////////////////////////////////////////////////////////////////////////////
// #region ConfigSpecification

/// Column selector reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumColumnIdentifier {
    /// Select by column name.
    Name(String),
    /// Select by zero-based column index.
    Index(usize),
}

/// Role selectors binding source columns to item fields.
///
/// Selection happens outside the kernel; the kernel only resolves and
/// rejects selectors that do not exist in the source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecColumnRoles {
    /// Opaque item identifier column.
    pub col_id: EnumColumnIdentifier,
    /// Height dimension column.
    pub col_height: EnumColumnIdentifier,
    /// Width dimension column.
    pub col_width: EnumColumnIdentifier,
    /// Length dimension column.
    pub col_length: EnumColumnIdentifier,
}

/// Immutable per-run sizing configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSizingConfig {
    /// Machine envelope maximum height (inclusive bound).
    pub n_height_max: f64,
    /// Machine envelope maximum width (inclusive bound).
    pub n_width_max: f64,
    /// Machine envelope maximum length (inclusive bound).
    pub n_length_max: f64,
    /// Cardboard stock widths, strictly ascending, smallest first.
    pub l_widths_cardboard: Vec<f64>,
}

impl SpecSizingConfig {
    /// Validate limits and cardboard width ordering.
    pub fn validate(&self) -> Result<(), String> {
        for (c_name, n_limit) in [
            ("n_height_max", self.n_height_max),
            ("n_width_max", self.n_width_max),
            ("n_length_max", self.n_length_max),
        ] {
            if !n_limit.is_finite() || n_limit <= 0.0 {
                return Err(format!("{c_name} must be finite and > 0, got {n_limit}."));
            }
        }

        if self.l_widths_cardboard.is_empty() {
            return Err("l_widths_cardboard must contain at least one width.".to_string());
        }
        for pair in self.l_widths_cardboard.windows(2) {
            if pair[1] <= pair[0] {
                return Err(format!(
                    "l_widths_cardboard must be strictly ascending, got {} before {}.",
                    pair[0], pair[1]
                ));
            }
        }
        for n_width in &self.l_widths_cardboard {
            if !n_width.is_finite() || *n_width <= 0.0 {
                return Err(format!(
                    "Cardboard widths must be finite and > 0, got {n_width}."
                ));
            }
        }
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ClassificationModels

/// Machine-fit classification. Exactly two states; no row is left unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumMachineFit {
    /// Fully valid row within every envelope bound.
    Ok,
    /// Invalid row, or any dimension exceeding its bound.
    NoOk,
}

impl EnumMachineFit {
    /// Status label used in the output table.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::NoOk => "No OK",
        }
    }
}

/// Cardboard stock selection: smallest sufficient width, or no fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnumCardboardBucket {
    /// Chosen stock width from the configured ascending list.
    Width(f64),
    /// Missing height/width, or wrap exceeding every configured width.
    NoFit,
}

impl EnumCardboardBucket {
    /// Bucket label used in the output table.
    ///
    /// Whole stock widths render as integer text (`23.0` -> `"23"`) so the
    /// label column stays readable next to `"No Fit"`.
    pub fn label(&self) -> String {
        match self {
            Self::Width(n_width) if n_width.fract() == 0.0 => format!("{}", *n_width as i64),
            Self::Width(n_width) => n_width.to_string(),
            Self::NoFit => "No Fit".to_string(),
        }
    }
}

/// One classified item row. Recomputed from scratch on every run.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecItemRecord {
    /// Identifier cell text, passed through; `None` for a null cell.
    pub id_text: Option<String>,
    /// Parsed height; `None` when the raw cell failed coercion.
    pub height: Option<f64>,
    /// Parsed width; `None` when the raw cell failed coercion.
    pub width: Option<f64>,
    /// Parsed length; `None` when the raw cell failed coercion.
    pub length: Option<f64>,
    /// True iff all three dimensions parsed.
    pub if_valid: bool,
    /// `height * width * length`, defined only when `if_valid`.
    pub volume: Option<f64>,
    /// Machine envelope classification.
    pub machine_fit: EnumMachineFit,
    /// Cardboard stock classification (height + width only).
    pub cardboard: EnumCardboardBucket,
}

/// Dataset-level pass/fail statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSummary {
    /// Row count of the classified table.
    pub n_total: usize,
    /// Rows classified `Ok`.
    pub cnt_ok: usize,
    /// Rows classified `NoOk`.
    pub cnt_no_ok: usize,
    /// `cnt_ok / n_total * 100`, rounded to 2 decimals; `0.0` for empty input.
    pub pct_ok: f64,
    /// `cnt_no_ok / n_total * 100`, rounded to 2 decimals; `0.0` for empty input.
    pub pct_no_ok: f64,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region NormalizationModels

/// Row-aligned numeric dimension sequences produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecNormalizedDimensions {
    /// Identifier cell text per row.
    pub l_ids: Vec<Option<String>>,
    /// Coerced heights; `None` marks a parse failure.
    pub l_heights: Vec<Option<f64>>,
    /// Coerced widths; `None` marks a parse failure.
    pub l_widths: Vec<Option<f64>>,
    /// Coerced lengths; `None` marks a parse failure.
    pub l_lengths: Vec<Option<f64>>,
    /// True for a row iff any of its three dimensions failed to parse.
    pub l_invalid: Vec<bool>,
}

impl SpecNormalizedDimensions {
    /// Row count of the normalized sequences.
    pub fn height(&self) -> usize {
        self.l_heights.len()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_descending_cardboard_widths() {
        let config = SpecSizingConfig {
            n_height_max: 11.0,
            n_width_max: 22.0,
            n_length_max: 15.0,
            l_widths_cardboard: vec![39.0, 23.0],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_cardboard_widths() {
        let config = SpecSizingConfig {
            n_height_max: 11.0,
            n_width_max: 22.0,
            n_length_max: 15.0,
            l_widths_cardboard: vec![],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_limit() {
        let config = SpecSizingConfig {
            n_height_max: 0.0,
            n_width_max: 22.0,
            n_length_max: 15.0,
            l_widths_cardboard: vec![23.0, 39.0],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bucket_label_renders_whole_widths_as_integer_text() {
        assert_eq!(EnumCardboardBucket::Width(23.0).label(), "23");
        assert_eq!(EnumCardboardBucket::Width(39.0).label(), "39");
        assert_eq!(EnumCardboardBucket::Width(24.5).label(), "24.5");
        assert_eq!(EnumCardboardBucket::NoFit.label(), "No Fit");
    }

    #[test]
    fn machine_fit_labels() {
        assert_eq!(EnumMachineFit::Ok.label(), "OK");
        assert_eq!(EnumMachineFit::NoOk.label(), "No OK");
    }
}
