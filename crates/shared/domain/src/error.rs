//! Business rule violations raised by the domain types themselves.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A partial update that carries no field
    #[error("No fields to update")]
    EmptyUpdate,
}

pub type DomainResult<T> = Result<T, DomainError>;
