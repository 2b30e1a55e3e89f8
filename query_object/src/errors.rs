use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Context evaluation error: {0}")]
    ContextEvaluation(String),

    #[error("Generation error: {0}")]
    Generation(String),
}
