use crate::error::AttributeError;
use crate::factory::{AttributeFactory, FactoryHandle, instantiate};
use crate::instance::{AttributeImpl, AttributeType};
use crate::key::AttributeKey;
use crate::types::ImplType;
use tracing::trace;

/// Chain node that prefers one fixed implementation type.
///
/// Any capability the override type implements is constructed from it directly, even if
/// the delegate could resolve that capability too. Every other request is forwarded to
/// the delegate unchanged and its result returned as is.
#[derive(Debug)]
pub struct OverrideFactory {
    override_type: ImplType,
    delegate: FactoryHandle,
}

impl OverrideFactory {
    #[must_use]
    pub const fn new(override_type: ImplType, delegate: FactoryHandle) -> Self {
        Self { override_type, delegate }
    }

    /// Overrides with a type registered through `#[attribute_impl]`.
    #[must_use]
    pub fn of<T: AttributeType>(delegate: FactoryHandle) -> Self {
        Self::new(ImplType::of::<T>(), delegate)
    }

    #[must_use]
    pub const fn override_type(&self) -> &ImplType {
        &self.override_type
    }

    #[must_use]
    pub const fn delegate(&self) -> &FactoryHandle {
        &self.delegate
    }
}

impl AttributeFactory for OverrideFactory {
    fn create(&self, capability: AttributeKey) -> Result<Box<dyn AttributeImpl>, AttributeError> {
        if self.override_type.satisfies(capability) {
            trace!(%capability, implementation = self.override_type.name(), "Override applies");
            return instantiate(capability, &self.override_type);
        }
        trace!(%capability, "Delegating");
        self.delegate.create(capability)
    }
}
