//! # Compat
//!
//! Adapters for platform services the search and rendering stack expects but that a
//! native binary has to provide itself:
//!
//! * [`platform`]: compile-target predicates.
//! * [`vm_options`]: diagnostic VM flags, always absent.
//! * [`fonts`]: Windows font directory lookup and stream-to-file font loading.
//! * [`mmap`]: index input provider lookup with a configurable shared arena size.

mod error;
pub mod fonts;
pub mod mmap;
pub mod platform;
pub mod vm_options;

pub use error::{CompatError, CompatErrorExt};
pub use fonts::{FontFormat, create_font_from_stream, windows_font_dir};
pub use mmap::{IndexInputProvider, ProviderConstructor, ProviderRegistry, lookup_provider};
pub use platform::is_windows;
pub use vm_options::VmOptions;
