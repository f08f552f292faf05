use crate::config::FactoryConfig;
use crate::error::AttributeError;
use crate::factory::{AttributeFactory, instantiate};
use crate::instance::AttributeImpl;
use crate::key::AttributeKey;
use crate::resolver::BindingResolver;
use crate::universe::TypeUniverse;
use std::sync::Arc;
use tracing::warn;

/// Terminal chain node: resolves `Capability` to `CapabilityImpl` and calls its
/// parameterless constructor.
#[derive(Debug, Clone)]
pub struct ConventionFactory {
    resolver: BindingResolver,
}

impl ConventionFactory {
    /// A factory resolving in `universe` with the default cache settings.
    #[must_use]
    pub fn new(universe: Arc<TypeUniverse>) -> Self {
        Self::with_config(universe, &FactoryConfig::default())
    }

    #[must_use]
    pub fn with_config(universe: Arc<TypeUniverse>, config: &FactoryConfig) -> Self {
        Self { resolver: BindingResolver::new(universe, &config.resolution_cache) }
    }

    /// A factory resolving in the global universe.
    #[must_use]
    pub fn global() -> Self {
        Self::new(TypeUniverse::global())
    }

    #[must_use]
    pub const fn resolver(&self) -> &BindingResolver {
        &self.resolver
    }
}

impl AttributeFactory for ConventionFactory {
    fn create(&self, capability: AttributeKey) -> Result<Box<dyn AttributeImpl>, AttributeError> {
        let binding = self.resolver.resolve(capability).inspect_err(|e| {
            warn!(%capability, universe = self.resolver.universe().name(), "Resolution failed: {e}");
        })?;
        instantiate(capability, &binding)
            .inspect_err(|e| warn!(%capability, "Construction failed: {e}"))
    }
}
