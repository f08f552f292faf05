use serde::Deserialize;

/// Settings for the attribute factory chain.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    pub resolution_cache: CacheConfig,
}

/// Binding cache used by the convention factory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true, capacity: 1024 }
    }
}
