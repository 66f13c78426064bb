use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowTreeError {
    #[error("leaf sum {leaf_sum:.2} diverges from input total {expected:.2}: difference {difference:.2} ({relative:.9} relative)")]
    TotalMismatch {
        leaf_sum: f64,
        expected: f64,
        difference: f64,
        relative: f64,
    },

    #[error("malformed ledger row at line {line}: {details}")]
    Schema { line: u64, details: String },

    #[error("invalid materiality threshold {0}: must be a finite, non-negative dollar amount")]
    InvalidThreshold(f64),

    #[error("invalid validation tolerance {0}: must be a finite, non-negative dollar amount")]
    InvalidTolerance(f64),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FlowTreeError>;
