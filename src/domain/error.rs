//! Domain error types.
//!
//! Only configuration and ingestion problems are errors. Short histories and
//! degenerate arithmetic inside the engine resolve to neutral values instead.

/// Top-level error type for quantsim.
#[derive(Debug, thiserror::Error)]
pub enum QuantsimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {symbol} at interval {interval}")]
    NoData { symbol: String, interval: String },

    #[error("invalid price at index {index}: {value}")]
    InvalidPrice { index: usize, value: f64 },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuantsimError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        QuantsimError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&QuantsimError> for std::process::ExitCode {
    fn from(err: &QuantsimError) -> Self {
        let code: u8 = match err {
            QuantsimError::Io(_) | QuantsimError::Json(_) => 1,
            QuantsimError::ConfigParse { .. } | QuantsimError::ConfigInvalid { .. } => 2,
            QuantsimError::DataSource { .. } | QuantsimError::NoData { .. } => 3,
            QuantsimError::InvalidPrice { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_invalid_display() {
        let err = QuantsimError::invalid("indicators", "ma_long", "ma_long must exceed ma_short");
        assert_eq!(
            err.to_string(),
            "invalid config value [indicators] ma_long: ma_long must exceed ma_short"
        );
    }

    #[test]
    fn invalid_price_display() {
        let err = QuantsimError::InvalidPrice {
            index: 3,
            value: -1.5,
        };
        assert_eq!(err.to_string(), "invalid price at index 3: -1.5");
    }
}
