use thiserror::Error;

pub type Result<T, E = RegistryError> = core::result::Result<T, E>;

/// Coarse classification of a [`RegistryError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A required argument was absent.
    NullInput,
    /// An argument was present but malformed or inconsistent.
    InvalidArgument,
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RegistryError {
    #[error("Device ID is null")]
    NullId,
    #[error("Device ID is invalid")]
    InvalidId,
    #[error("Device ID is already in the list")]
    DuplicateId,
    #[error("One of the numeric parameters is invalid")]
    InvalidNumericParameters,
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NullId => ErrorKind::NullInput,
            RegistryError::InvalidId
            | RegistryError::DuplicateId
            | RegistryError::InvalidNumericParameters => ErrorKind::InvalidArgument,
        }
    }
}
