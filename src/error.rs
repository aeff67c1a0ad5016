use thiserror::Error;

/// Broad category of a failed fetch cycle, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Structure,
    Parse,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Network => "network",
            ErrorKind::Structure => "structure",
            ErrorKind::Parse => "parse",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("no <table> element in the price page")]
    TableNotFound,
    #[error("price table has {found} row(s), expected at least {needed}")]
    TooFewRows { found: usize, needed: usize },
    #[error("price row {row} has {found} cell(s), no cell at column {column}")]
    CellOutOfBounds {
        row: usize,
        column: usize,
        found: usize,
    },
    #[error("no header cell labelled {label:?} in the price table")]
    ColumnLabelNotFound { label: String },
    #[error("price cell text {text:?} is not a number")]
    InvalidNumber { text: String },
    #[error("computed price {value} is not a finite non-negative number")]
    InvalidPrice { value: f64 },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Network(_) => ErrorKind::Network,
            FetchError::TableNotFound
            | FetchError::TooFewRows { .. }
            | FetchError::CellOutOfBounds { .. }
            | FetchError::ColumnLabelNotFound { .. } => ErrorKind::Structure,
            FetchError::InvalidNumber { .. } | FetchError::InvalidPrice { .. } => ErrorKind::Parse,
        }
    }
}
