use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{failed} of {total} notification emissions failed: {first:#}")]
    Emission {
        failed: usize,
        total: usize,
        first: anyhow::Error,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
