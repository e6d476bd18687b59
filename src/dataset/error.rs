use thiserror::Error;

/// Errors that can occur while loading and cleaning the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Schema mismatch in {path}: {reason}")]
    SchemaMismatch { path: String, reason: String },

    #[error("Invalid value {value:?} for column '{column}' at line {line}: {reason}")]
    Validation {
        line: u64,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("No records left after cleaning")]
    EmptyInput,
}

impl DatasetError {
    /// True for source-level failures: unreadable input or a schema that does
    /// not match the dataset.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            DatasetError::Io { .. } | DatasetError::Csv { .. } | DatasetError::SchemaMismatch { .. }
        )
    }
}
