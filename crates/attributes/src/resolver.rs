use crate::config::CacheConfig;
use crate::error::AttributeError;
use crate::key::AttributeKey;
use crate::types::{ImplType, TypeKind};
use crate::universe::TypeUniverse;
use moka::sync::Cache;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Maps a capability to its implementation by naming convention.
///
/// The implementation name is the capability name plus [`IMPL_SUFFIX`](crate::IMPL_SUFFIX),
/// looked up in the universe the resolver was built with. Only successful bindings are
/// cached; a concurrent miss may resolve the same binding twice, and the later insert
/// simply overwrites an identical value.
#[derive(Clone)]
pub struct BindingResolver {
    universe: Arc<TypeUniverse>,
    cache: Option<Cache<AttributeKey, ImplType>>,
}

impl BindingResolver {
    #[must_use]
    pub fn new(universe: Arc<TypeUniverse>, config: &CacheConfig) -> Self {
        let cache = config.enabled.then(|| Cache::new(config.capacity));
        Self { universe, cache }
    }

    /// A resolver that recomputes every binding.
    #[must_use]
    pub const fn uncached(universe: Arc<TypeUniverse>) -> Self {
        Self { universe, cache: None }
    }

    #[must_use]
    pub const fn universe(&self) -> &Arc<TypeUniverse> {
        &self.universe
    }

    /// Resolves `capability` to its concrete implementation type.
    ///
    /// # Errors
    /// Returns [`AttributeError::ResolutionNotFound`] if no type carries the derived name,
    /// or [`AttributeError::ResolutionMismatch`] if it is not a concrete implementation of
    /// `capability`.
    pub fn resolve(&self, capability: AttributeKey) -> Result<ImplType, AttributeError> {
        if let Some(cache) = &self.cache
            && let Some(binding) = cache.get(&capability)
        {
            trace!(%capability, implementation = binding.name(), "Binding cache hit");
            return Ok(binding);
        }

        let binding = self.lookup_binding(capability)?;
        if let Some(cache) = &self.cache {
            cache.insert(capability, binding);
        }
        Ok(binding)
    }

    fn lookup_binding(&self, capability: AttributeKey) -> Result<ImplType, AttributeError> {
        let derived = capability.derived_impl_name();
        let Some(found) = self.universe.lookup(&derived) else {
            return Err(AttributeError::ResolutionNotFound { capability, derived, context: None });
        };

        let reason = match found.kind() {
            TypeKind::Interface => "it is a capability declaration, not an implementation",
            TypeKind::Abstract => "it is abstract and cannot be instantiated",
            TypeKind::Concrete if !found.lists(capability) => "it does not implement the capability",
            TypeKind::Concrete => {
                trace!(%capability, implementation = found.name(), "Resolved binding");
                return Ok(found);
            },
        };
        Err(AttributeError::ResolutionMismatch {
            capability,
            derived,
            reason: reason.into(),
            context: None,
        })
    }
}

impl fmt::Debug for BindingResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingResolver")
            .field("universe", &self.universe.name())
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
