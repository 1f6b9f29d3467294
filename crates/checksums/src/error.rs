use thiserror::Error;

/// Error returned when a name does not resolve to a registered algorithm.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown checksum algorithm '{name}'")]
pub struct UnknownAlgorithm {
    name: String,
}

impl UnknownAlgorithm {
    /// Creates the error for the name the caller supplied.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the name that failed to resolve, exactly as supplied.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Errors raised while parsing a `+`-separated algorithm selection.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SelectionError {
    /// The selection (or one of its `+`-separated parts) was blank.
    #[error("algorithm selection contains an empty name")]
    Empty,
    /// One of the selected names is not registered.
    #[error(transparent)]
    Unknown(#[from] UnknownAlgorithm),
}
