//! Error type for value construction and conversion

/// Error raised when building or converting argument values.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// Invalid parameters provided to a constructor
    #[error("Bad Parameters: {0}")]
    BadParameters(String),

    /// A value was not of the expected variant
    #[error("Wrong value type: {0}")]
    WrongType(String),
}
