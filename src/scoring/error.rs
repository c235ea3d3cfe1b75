use thiserror::Error;

/// Fatal scoring failures. Both abort the session before anything is shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("required column '{0}' is missing from the dataset")]
    MissingColumn(String),

    #[error("dataset has no records, percentile rank is undefined")]
    EmptyDataset,
}
