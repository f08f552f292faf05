//! # Construction Errors
//!
//! The underlying cause carried by
//! [`AttributeError::ConstructionFailure`](crate::AttributeError::ConstructionFailure).

use std::any::Any;
use std::borrow::Cow;

/// Why an implementation type could not be instantiated.
#[seforim_derive::seforim_error]
pub enum ConstructError {
    /// The type has no parameterless constructor registered.
    #[error("No parameterless constructor{}: {message}", format_context(.context))]
    MissingConstructor { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The constructor panicked.
    #[error("Constructor panicked{}: {message}", format_context(.context))]
    Panicked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The constructor returned an error.
    #[error("Constructor failed{}: {source}", format_context(.context))]
    Failed {
        source: Box<dyn std::error::Error + Send + Sync>,
        context: Option<Cow<'static, str>>,
    },
}

impl ConstructError {
    /// Wraps any error returned by a fallible constructor.
    pub fn failed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Failed { source: source.into(), context: None }
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message: Cow<'static, str> = payload
            .downcast_ref::<&'static str>()
            .map(|s| Cow::Borrowed(*s))
            .or_else(|| payload.downcast_ref::<String>().map(|s| Cow::Owned(s.clone())))
            .unwrap_or(Cow::Borrowed("non-string panic payload"));
        Self::Panicked { message, context: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payload_is_captured() {
        let payload: Box<dyn Any + Send> = Box::new("exploded");
        let err = ConstructError::from_panic(payload.as_ref());
        assert_eq!(err.to_string(), "Constructor panicked: exploded");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert!(ConstructError::from_panic(payload.as_ref()).to_string().ends_with("owned"));
    }

    #[test]
    fn test_failed_wraps_source() {
        let err = ConstructError::failed("disk offline");
        assert_eq!(err.to_string(), "Constructor failed: disk offline");
        assert!(std::error::Error::source(&err).is_some());
    }
}
