use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to decode IntOrString: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("unknown IntOrString type: {0}")]
    UnknownKind(i64),

    #[error("invalid value for IntOrString: {0}")]
    InvalidPercent(String),

    #[error("invalid scheduler configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("configuration document is empty")]
    EmptyDocument,

    #[error(
        "unexpected configuration {field}: expected {expected}, got {}",
        .actual.as_deref().unwrap_or("nothing")
    )]
    SchemaMismatch {
        field: &'static str,
        expected: &'static str,
        actual: Option<String>,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;
