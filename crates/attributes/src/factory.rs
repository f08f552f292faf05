use crate::convention::ConventionFactory;
use crate::error::AttributeError;
use crate::instance::AttributeImpl;
use crate::key::{Attribute, AttributeKey};
use crate::overriding::OverrideFactory;
use crate::tokenattributes::PackedTokenAttributeImpl;
use crate::types::ImplType;
use std::fmt::Debug;
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// A shared, read-only node of a factory chain.
pub type FactoryHandle = Arc<dyn AttributeFactory>;

static DEFAULT_ATTRIBUTE_FACTORY: LazyLock<FactoryHandle> =
    LazyLock::new(|| Arc::new(ConventionFactory::global()));

static DEFAULT_TOKEN_ATTRIBUTE_FACTORY: LazyLock<FactoryHandle> = LazyLock::new(|| {
    Arc::new(OverrideFactory::of::<PackedTokenAttributeImpl>(default_attribute_factory()))
});

/// Produces attribute instances for capabilities.
///
/// Implementations hold no per-call state and may be called from many threads at once.
pub trait AttributeFactory: Debug + Send + Sync {
    /// Creates a fresh instance implementing `capability`.
    ///
    /// # Errors
    /// Returns a resolution or construction [`AttributeError`]; neither is retried.
    fn create(&self, capability: AttributeKey) -> Result<Box<dyn AttributeImpl>, AttributeError>;
}

/// Typed convenience over [`AttributeFactory::create`].
pub trait AttributeFactoryExt: AttributeFactory {
    /// Creates an instance for the capability trait `A` (written as `dyn A`).
    ///
    /// # Errors
    /// Same as [`AttributeFactory::create`].
    fn create_attribute<A: Attribute + ?Sized>(
        &self,
    ) -> Result<Box<dyn AttributeImpl>, AttributeError> {
        self.create(A::KEY)
    }
}

impl<F: AttributeFactory + ?Sized> AttributeFactoryExt for F {}

/// Builds a factory chain node.
///
/// * No override type: returns `child`, or the global convention factory when there is
///   no child either.
/// * With an override type: returns an [`OverrideFactory`] wrapping `child` (or the
///   global convention factory).
#[must_use]
pub fn create_factory(override_type: Option<ImplType>, child: Option<FactoryHandle>) -> FactoryHandle {
    let child = child.unwrap_or_else(default_attribute_factory);
    match override_type {
        Some(override_type) => {
            debug!(override_type = override_type.name(), delegate = ?child, "Building override factory");
            Arc::new(OverrideFactory::new(override_type, child))
        },
        None => child,
    }
}

/// The convention factory over [`TypeUniverse::global`](crate::TypeUniverse::global).
#[must_use]
pub fn default_attribute_factory() -> FactoryHandle {
    Arc::clone(&DEFAULT_ATTRIBUTE_FACTORY)
}

/// The chain used by tokenizers: [`PackedTokenAttributeImpl`] over the default factory.
#[must_use]
pub fn default_token_attribute_factory() -> FactoryHandle {
    Arc::clone(&DEFAULT_TOKEN_ATTRIBUTE_FACTORY)
}

/// Constructs a known binding, tagging failures with the requested capability.
pub(crate) fn instantiate(
    capability: AttributeKey,
    binding: &ImplType,
) -> Result<Box<dyn AttributeImpl>, AttributeError> {
    binding.instantiate().map_err(|source| AttributeError::ConstructionFailure {
        capability,
        implementation: binding.name(),
        source,
        context: None,
    })
}
