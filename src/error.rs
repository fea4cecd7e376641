use thiserror::Error;

pub type ReelResult<T> = Result<T, ReelError>;

#[derive(Debug, Error, PartialEq)]
pub enum ReelError {
    #[error("dataset is missing required column(s): {}", columns.join(", "))]
    MissingColumn { columns: Vec<String> },

    #[error("no movies found whose cast mentions `{actor}`")]
    EmptyCorpus { actor: String },

    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
