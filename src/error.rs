use thiserror::Error;

// ---------------------------------------------------------------------------
// Data-layer errors
// ---------------------------------------------------------------------------

/// Errors raised while turning a source file into a [`BikeDataset`].
///
/// [`BikeDataset`]: crate::data::model::BikeDataset
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': {reason}")]
    InvalidValue {
        /// Data row, counted from 1 after the header.
        row: usize,
        column: &'static str,
        reason: String,
    },

    #[error("expected a top-level JSON array of objects")]
    NotAnArray,
}

impl DataError {
    pub fn invalid(row: usize, column: &'static str, reason: impl Into<String>) -> Self {
        DataError::InvalidValue {
            row,
            column,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_message_names_row_and_column() {
        let err = DataError::invalid(7, "month", "13 is outside 1..=12");
        assert_eq!(
            err.to_string(),
            "row 7, column 'month': 13 is outside 1..=12"
        );
    }

    #[test]
    fn missing_column_message() {
        assert_eq!(
            DataError::MissingColumn("hr").to_string(),
            "missing required column 'hr'"
        );
    }
}
