//! # Memory-Mapped Index Inputs
//!
//! Index directories read segments through an [`IndexInputProvider`] chosen by name from
//! an explicit [`ProviderRegistry`]. The memory-segment provider takes the maximum
//! number of permits for its shared arena, read from an optional string property.

use crate::error::CompatError;
use fxhash::FxHashMap;
use std::borrow::Cow;
use std::fmt::Debug;
use tracing::{debug, warn};

/// Name of the property holding the shared arena permit count.
pub const SHARED_ARENA_MAX_PERMITS_PROPERTY: &str = "store.mmap.shared_arena_max_permits";
pub const DEFAULT_SHARED_ARENA_MAX_PERMITS: u32 = 1024;
/// Name under which the memory-segment provider is registered.
pub const MEMORY_SEGMENT_PROVIDER: &str = "MemorySegmentIndexInputProvider";

/// Source of index inputs for a memory-mapped directory.
pub trait IndexInputProvider: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn shared_arena_max_permits(&self) -> u32;
}

/// Provider backed by memory segments grouped into shared arenas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySegmentProvider {
    max_permits: u32,
}

impl MemorySegmentProvider {
    #[must_use]
    pub const fn new(max_permits: u32) -> Self {
        Self { max_permits }
    }
}

impl IndexInputProvider for MemorySegmentProvider {
    fn name(&self) -> &'static str {
        MEMORY_SEGMENT_PROVIDER
    }

    fn shared_arena_max_permits(&self) -> u32 {
        self.max_permits
    }
}

/// How a registered provider is constructed.
#[derive(Debug, Clone, Copy)]
pub enum ProviderConstructor {
    /// Takes the shared arena permit count.
    WithPermits(fn(u32) -> Result<Box<dyn IndexInputProvider>, String>),
    /// Takes no arguments; unusable for permit-based lookup.
    Nullary(fn() -> Result<Box<dyn IndexInputProvider>, String>),
}

/// Name to constructor table for index input providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: FxHashMap<&'static str, ProviderConstructor>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the memory-segment provider.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(MEMORY_SEGMENT_PROVIDER, ProviderConstructor::WithPermits(memory_segment_provider));
        registry
    }

    /// Adds or replaces a provider.
    pub fn register(&mut self, name: &'static str, constructor: ProviderConstructor) {
        self.providers.insert(name, constructor);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<ProviderConstructor> {
        self.providers.get(name).copied()
    }
}

fn memory_segment_provider(permits: u32) -> Result<Box<dyn IndexInputProvider>, String> {
    Ok(Box::new(MemorySegmentProvider::new(permits)))
}

/// Parses the permit count property. Missing, malformed, or zero values yield
/// [`DEFAULT_SHARED_ARENA_MAX_PERMITS`].
#[must_use]
pub fn shared_arena_max_permits(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_SHARED_ARENA_MAX_PERMITS;
    };
    match raw.trim().parse::<u32>() {
        Ok(permits) if permits > 0 => permits,
        _ => {
            warn!(
                property = SHARED_ARENA_MAX_PERMITS_PROPERTY,
                value = raw,
                "Ignoring invalid permit count, using {DEFAULT_SHARED_ARENA_MAX_PERMITS}"
            );
            DEFAULT_SHARED_ARENA_MAX_PERMITS
        },
    }
}

/// Instantiates the memory-segment provider with the permit count parsed from `raw`.
///
/// # Errors
/// * [`CompatError::ProviderMissing`] if the registry has no memory-segment provider.
/// * [`CompatError::ConstructorMismatch`] if it is registered without a permit-count
///   constructor.
/// * [`CompatError::ProviderFailed`] if its constructor fails.
pub fn lookup_provider(
    registry: &ProviderRegistry,
    raw: Option<&str>,
) -> Result<Box<dyn IndexInputProvider>, CompatError> {
    let permits = shared_arena_max_permits(raw);
    let name = Cow::Borrowed(MEMORY_SEGMENT_PROVIDER);

    let constructor = match registry.get(MEMORY_SEGMENT_PROVIDER) {
        None => return Err(CompatError::ProviderMissing { name, context: None }),
        Some(ProviderConstructor::Nullary(_)) => {
            return Err(CompatError::ConstructorMismatch { name, context: None });
        },
        Some(ProviderConstructor::WithPermits(constructor)) => constructor,
    };

    let provider = constructor(permits)
        .map_err(|message| CompatError::ProviderFailed { name, message: message.into(), context: None })?;
    debug!(provider = provider.name(), permits, "Index input provider ready");
    Ok(provider)
}
