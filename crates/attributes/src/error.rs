//! # Attribute Errors
//!
//! This module defines the [`AttributeError`] enum returned by every factory and by
//! the type universe.

use crate::construct::ConstructError;
use crate::key::AttributeKey;
use std::borrow::Cow;

/// Failures surfaced by binding resolution, instantiation, and registration.
///
/// None of these are retried internally; callers should treat them as configuration
/// errors for the requested capability.
#[seforim_derive::seforim_error]
pub enum AttributeError {
    /// No type with the derived implementation name exists in the universe.
    #[error("Cannot find implementing type {derived} for {capability}{}", format_context(.context))]
    ResolutionNotFound {
        capability: AttributeKey,
        derived: String,
        context: Option<Cow<'static, str>>,
    },

    /// The derived type exists but is not an instantiable implementation of the capability.
    #[error(
        "Type {derived} is not a valid implementation of {capability}{}: {reason}",
        format_context(.context)
    )]
    ResolutionMismatch {
        capability: AttributeKey,
        derived: String,
        reason: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The implementation type is known but could not be constructed.
    #[error(
        "Cannot create attribute instance of type {implementation} for {capability}{}: {source}",
        format_context(.context)
    )]
    ConstructionFailure {
        capability: AttributeKey,
        implementation: &'static str,
        source: ConstructError,
        context: Option<Cow<'static, str>>,
    },

    /// A different type is already registered under the same name.
    #[error("Duplicate type registration{}: {message}", format_context(.context))]
    DuplicateType { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl AttributeError {
    /// The capability a factory request failed for, if this is a request failure.
    #[must_use]
    pub const fn capability(&self) -> Option<AttributeKey> {
        match self {
            Self::ResolutionNotFound { capability, .. }
            | Self::ResolutionMismatch { capability, .. }
            | Self::ConstructionFailure { capability, .. } => Some(*capability),
            Self::DuplicateType { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::ResolutionNotFound { .. } | Self::ResolutionMismatch { .. })
    }

    #[must_use]
    pub const fn is_construction_failure(&self) -> bool {
        matches!(self, Self::ConstructionFailure { .. })
    }
}
