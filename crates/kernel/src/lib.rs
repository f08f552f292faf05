//! # Kernel
//!
//! Wires configuration, logging, the token attribute factory chain, and the platform
//! adapters into one [`Kernel`].
//!
//! ```rust,no_run
//! use seforim_attributes::AttributeFactoryExt;
//! use seforim_attributes::tokenattributes::CharTermAttribute;
//!
//! let kernel = seforim_kernel::bootstrap(Some("config/seforim.toml"))?;
//! let term = kernel.token_factory().create_attribute::<dyn CharTermAttribute>()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod error;
mod kernel;

pub use config::{ConfigError, SeforimConfig, load_config};
pub use error::{KernelError, KernelErrorExt};
pub use kernel::{Kernel, bootstrap};
