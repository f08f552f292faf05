use crate::config::{LoggingConfig, SeforimConfig, load_config};
use crate::error::{KernelError, KernelErrorExt};
use seforim_attributes::tokenattributes::PackedTokenAttributeImpl;
use seforim_attributes::{
    AttributeType, ConventionFactory, FactoryHandle, ImplType, TypeUniverse, create_factory,
};
use seforim_compat::mmap::{IndexInputProvider, ProviderRegistry, lookup_provider};
use seforim_compat::{is_windows, windows_font_dir};
use seforim_logger::{FileOutput, Logger, LoggerError, parse_level};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

const LOGGER_NAME: &str = "seforim";

/// Process-wide services assembled from a [`SeforimConfig`].
#[derive(Debug)]
pub struct Kernel {
    config: SeforimConfig,
    universe: Arc<TypeUniverse>,
    token_factory: FactoryHandle,
    index_provider: Box<dyn IndexInputProvider>,
    font_dir: Option<PathBuf>,
    logger: Option<Logger>,
}

impl Kernel {
    /// Builds the kernel without touching global logging state.
    ///
    /// User attribute types can be registered into [`Kernel::universe`] afterwards; it
    /// delegates to the global universe holding the built-in token attributes.
    ///
    /// # Errors
    /// Returns [`KernelError::Compat`] if no index input provider can be created.
    pub fn from_config(config: SeforimConfig) -> Result<Self, KernelError> {
        let universe = Arc::new(TypeUniverse::with_parent("kernel", TypeUniverse::global()));
        let convention: FactoryHandle =
            Arc::new(ConventionFactory::with_config(Arc::clone(&universe), &config.attributes));
        let token_factory = create_factory(
            Some(ImplType::of::<PackedTokenAttributeImpl>()),
            Some(convention),
        );

        let index_provider = lookup_provider(
            &ProviderRegistry::with_defaults(),
            config.store.shared_arena_max_permits.as_deref(),
        )
        .context("Failed to look up the index input provider")?;

        let font_dir = resolve_font_dir(config.fonts.windows_dir.as_deref());

        info!(
            permits = index_provider.shared_arena_max_permits(),
            font_dir = ?font_dir,
            cache = config.attributes.resolution_cache.enabled,
            "Kernel assembled"
        );

        Ok(Self { config, universe, token_factory, index_provider, font_dir, logger: None })
    }

    #[must_use]
    pub const fn config(&self) -> &SeforimConfig {
        &self.config
    }

    /// The universe the kernel's convention factory resolves in.
    #[must_use]
    pub const fn universe(&self) -> &Arc<TypeUniverse> {
        &self.universe
    }

    /// Makes `T` resolvable through the kernel's factories.
    ///
    /// # Errors
    /// Returns [`KernelError::Attributes`] if a different type is already registered
    /// under `T`'s name.
    pub fn register_attribute<T: AttributeType>(&self) -> Result<(), KernelError> {
        self.register_type(ImplType::of::<T>())
    }

    /// # Errors
    /// Same as [`Kernel::register_attribute`].
    pub fn register_type(&self, ty: ImplType) -> Result<(), KernelError> {
        self.universe.register_type(ty).context("Failed to register attribute type")?;
        debug!(name = ty.name(), kind = ?ty.kind(), "Attribute type registered");
        Ok(())
    }

    /// Token attribute chain: packed token attributes over convention resolution.
    #[must_use]
    pub fn token_factory(&self) -> FactoryHandle {
        Arc::clone(&self.token_factory)
    }

    #[must_use]
    pub fn index_provider(&self) -> &dyn IndexInputProvider {
        self.index_provider.as_ref()
    }

    /// The Windows font directory, when running on Windows or configured explicitly.
    #[must_use]
    pub fn font_dir(&self) -> Option<&Path> {
        self.font_dir.as_deref()
    }

    /// True when this kernel installed the global logger.
    #[must_use]
    pub const fn owns_logger(&self) -> bool {
        self.logger.is_some()
    }
}

/// Loads configuration from `path`, installs logging, and assembles a [`Kernel`].
///
/// If another global subscriber is already installed, the kernel logs through it and
/// does not own a logger.
///
/// # Errors
/// Returns [`KernelError::Config`] for unreadable configuration, [`KernelError::Logger`]
/// for invalid logging settings, or any error of [`Kernel::from_config`].
pub fn bootstrap(path: Option<impl AsRef<Path>>) -> Result<Kernel, KernelError> {
    let config: SeforimConfig = load_config(path)?;

    let logger = match init_logger(&config.logging) {
        Ok(logger) => Some(logger),
        Err(LoggerError::Subscriber { source, .. }) => {
            warn!("Global subscriber already installed, keeping it: {source}");
            None
        },
        Err(e) => return Err(e.into()),
    };

    let mut kernel = Kernel::from_config(config)?;
    kernel.logger = logger;
    Ok(kernel)
}

fn init_logger(settings: &LoggingConfig) -> Result<Logger, LoggerError> {
    let mut builder = Logger::builder(LOGGER_NAME)
        .console(settings.console)
        .level(parse_level(&settings.level)?);
    if let Some(filter) = &settings.env_filter {
        builder = builder.env_filter(filter.clone());
    }
    if let Some(dir) = &settings.path {
        builder = builder.file(FileOutput::new(dir).json(settings.json));
    }
    builder.init()
}

fn resolve_font_dir(configured: Option<&str>) -> Option<PathBuf> {
    match configured {
        Some(dir) => Some(windows_font_dir(|key| (key == "WINDIR").then(|| dir.to_owned()))),
        None if is_windows() => Some(windows_font_dir(|key| std::env::var(key).ok())),
        None => None,
    }
}
