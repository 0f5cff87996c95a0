//! Domain error types.

/// Top-level error type for tradeledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid symbol pair {symbol:?}: expected BASE/QUOTE")]
    InvalidSymbol { symbol: String },

    #[error("execution failed for {symbol}: {reason}")]
    Execution { symbol: String, reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&LedgerError> for std::process::ExitCode {
    fn from(err: &LedgerError) -> Self {
        let code: u8 = match err {
            LedgerError::Io(_) => 1,
            LedgerError::ConfigParse { .. }
            | LedgerError::ConfigMissing { .. }
            | LedgerError::ConfigInvalid { .. }
            | LedgerError::InvalidSymbol { .. } => 2,
            LedgerError::Execution { .. } => 3,
            LedgerError::Data { .. } | LedgerError::Json(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
