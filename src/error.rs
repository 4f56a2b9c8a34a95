use thiserror::Error;

/// Errors that abort an analysis run.
///
/// Non-fatal conditions (out-of-scope files, empty source sets, malformed
/// doc-comment tags) are reported through the
/// [`AnalysisContext`](crate::context::AnalysisContext) instead.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// A component file's template or script is not a well-formed tree.
    /// Fatal: partial component metadata is worse than a hard failure.
    #[error("failed to parse component {file}:{line}: {message}")]
    ComponentParse {
        file: String,
        line: usize,
        message: String,
    },

    /// Strict-mode policy: the same name is declared in more than one module.
    #[error("duplicate declaration names: {0}")]
    DuplicateNames(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
