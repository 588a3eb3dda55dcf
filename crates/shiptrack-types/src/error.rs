use thiserror::Error;

/// Errors raised while building a [`crate::DocumentTaxonomy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("taxonomy must contain at least one phase")]
    EmptyTaxonomy,

    #[error("empty name in taxonomy: {0}")]
    EmptyName(String),

    #[error("duplicate phase in taxonomy: {0}")]
    DuplicatePhase(String),

    #[error("duplicate document '{document}' in phase '{phase}'")]
    DuplicateDocument { phase: String, document: String },
}

/// Convenience alias for taxonomy construction results.
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;
