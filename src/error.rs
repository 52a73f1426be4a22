#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to open input file '{path}': {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid numeric field '{value}' on line {line}: {source}")]
    NumericFieldInvalid {
        value: String,
        line: usize,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
