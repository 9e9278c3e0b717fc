use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions of an import run. Every variant terminates the process
/// with exit code 1; `Execution` is the only one raised while a transaction
/// is open, and it always rolls the whole run back.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("database connection failed: {source}")]
    Connection {
        #[source]
        source: rusqlite::Error,
    },

    #[error("source document not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("source document is not well-formed:\n{}", diagnostics.join("\n"))]
    Parse { diagnostics: Vec<String> },

    #[error("import failed at {stage}: {source}")]
    Execution {
        stage: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl ImportError {
    pub fn parse(diagnostics: Vec<String>) -> Self {
        ImportError::Parse { diagnostics }
    }

    pub fn execution(stage: impl Into<String>, source: rusqlite::Error) -> Self {
        ImportError::Execution {
            stage: stage.into(),
            source,
        }
    }
}
