use thiserror::Error;

/// Everything that can go wrong in one pipeline invocation.
///
/// Entry points never let these escape raw: each variant is folded into a
/// failure envelope (see `pipeline`), so callers branch on the envelope,
/// and library users branch on the variant.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("store read failed for {key}")]
    Access {
        key: String,
        #[source]
        source: object_store::Error,
    },

    #[error("content is not parseable markup: {0}")]
    MalformedInput(String),

    #[error("record is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("cannot derive destination for key `{key}`: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("store write failed for {key}")]
    Write {
        key: String,
        #[source]
        source: object_store::Error,
    },

    #[error("failed to encode feature row as csv")]
    Csv(#[from] csv::Error),
}
