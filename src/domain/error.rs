//! Domain error types.

/// Top-level error type for crossgrid.
#[derive(Debug, thiserror::Error)]
pub enum CrossgridError {
    #[error("data error: {reason}")]
    Data { reason: String },

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

    #[error("unknown symbol {symbol} (not in price file header)")]
    UnknownSymbol { symbol: String },

    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    #[error("no {year} rows for {symbol}")]
    NoDateWindow { symbol: String, year: i32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CrossgridError> for std::process::ExitCode {
    fn from(err: &CrossgridError) -> Self {
        let code: u8 = match err {
            CrossgridError::Io(_) => 1,
            CrossgridError::ConfigParse { .. }
            | CrossgridError::ConfigMissing { .. }
            | CrossgridError::ConfigInvalid { .. } => 2,
            CrossgridError::Data { .. } => 3,
            CrossgridError::UnknownSymbol { .. }
            | CrossgridError::NoData { .. }
            | CrossgridError::NoDateWindow { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
