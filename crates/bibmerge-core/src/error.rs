use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("unrecognized {kind} option: {label:?}")]
    UnrecognizedOption { kind: &'static str, label: String },

    #[error("row {index} out of range (view has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, MergeError>;
