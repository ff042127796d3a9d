pub mod coercion;
pub mod construction;
pub mod policy;
pub mod result_ext;
pub mod severity;
pub mod wire;

// public exports
pub use coercion::CoercionError;
pub use construction::ConstructionError;
pub use policy::{ErrorPolicy, NoopPolicy};
#[cfg(feature = "tracing")]
pub use policy::TracingPolicy;
pub use result_ext::{IterResultExt, ResultExt};
pub use severity::Severity;
pub use wire::{DecodeError, SerializationError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Coercion(#[from] CoercionError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("{msg} {0}", msg = "ConfigError:")]
    Config(String),
}

impl Error {
    /// Default classification used by the bundled policies.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Config(_) => Severity::Fatal,
            Error::Construction(_)
            | Error::Coercion(_)
            | Error::Serialization(_)
            | Error::Decode(_) => Severity::Error,
        }
    }

    pub fn is_construction(&self) -> bool {
        matches!(self, Error::Construction(_))
    }

    pub fn is_coercion(&self) -> bool {
        matches!(self, Error::Coercion(_))
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_errors_convert_and_classify() {
        let err: Error = ConstructionError::NotConstructible { term: "DATUM" }.into();
        assert!(err.is_construction());
        assert_eq!(err.severity(), Severity::Error);

        let err = Error::Config("bad depth".into());
        assert_eq!(err.severity(), Severity::Fatal);
        assert_eq!(err.to_string(), "ConfigError: bad depth");
    }

    #[test]
    fn transparent_display_uses_inner_message() {
        let err: Error = SerializationError::NonFinite { value: f64::NAN }.into();
        assert!(err.is_serialization());
        assert_eq!(
            err.to_string(),
            "number NaN cannot be represented on the wire"
        );
    }
}
