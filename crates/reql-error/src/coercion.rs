/// A raw client value that could not be turned into a term.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    #[error("cannot coerce {shape} into a term")]
    Unsupported { shape: String },

    #[error("object keys must be strings, got {shape}")]
    NonStringKey { shape: String },

    #[error("integer {value} does not fit in 64 bits")]
    IntegerOverflow { value: String },

    #[error("nesting depth limit of {limit} exceeded while converting a value")]
    DepthExceeded { limit: usize },

    #[error("{0}")]
    Custom(String),
}

#[cfg(feature = "serde")]
impl serde::ser::Error for CoercionError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        CoercionError::Custom(msg.to_string())
    }
}
