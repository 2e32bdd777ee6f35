use thiserror::Error;

/// Validation failures raised at the boundary, before an entry reaches
/// the expander. The boundary translates these into user-facing
/// messages; the core never produces its own.
#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("entry value must be positive, got {0}")]
    NonPositiveValue(f64),
    #[error("entry description must not be empty")]
    EmptyDescription,
    #[error("installment entries require a count of at least 1")]
    MissingInstallments,
}
