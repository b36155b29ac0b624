#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid document JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// An error returned by a custom block renderer, passed through untouched.
    #[error(transparent)]
    Hook(anyhow::Error),
}
