//! # Attributes
//!
//! Turns a capability (an attribute interface) into a live instance of its
//! implementation without runtime reflection.
//!
//! ## Building Blocks
//!
//! * **Capabilities** are traits marked with [`attribute`]; each gets an [`AttributeKey`].
//! * **Implementations** are structs marked with [`attribute_impl`]; the macro records
//!   their name, the capabilities they satisfy, and their parameterless constructor,
//!   and checks at compile time that the listed traits are really implemented.
//! * A [`TypeUniverse`] holds the registered types a factory can see.
//!
//! ## Factory Chain
//!
//! * [`ConventionFactory`]: resolves `Capability` to `CapabilityImpl` through a
//!   [`BindingResolver`] (with an optional binding cache) and constructs it.
//! * [`OverrideFactory`]: constructs one fixed type for every capability that type
//!   implements, and delegates all other requests to the wrapped factory.
//!
//! Instances are never cached; only bindings are. A created instance is read through
//! its capability with `view::<dyn Capability>()`, whichever type the chain picked.
//!
//! ## Example
//!
//! ```rust
//! use seforim_attributes::prelude::*;
//! use std::sync::Arc;
//!
//! #[attribute]
//! pub trait Token: Send + Sync {
//!     fn text(&self) -> &str;
//! }
//!
//! #[attribute_impl(implements(Token))]
//! #[derive(Debug, Default)]
//! pub struct TokenImpl {
//!     text: String,
//! }
//!
//! impl Token for TokenImpl {
//!     fn text(&self) -> &str {
//!         &self.text
//!     }
//! }
//!
//! impl AttributeImpl for TokenImpl {
//!     fn clear(&mut self) {
//!         self.text.clear();
//!     }
//! }
//!
//! # fn main() -> Result<(), AttributeError> {
//! let universe = Arc::new(TypeUniverse::with_parent("app", TypeUniverse::global()));
//! universe.register::<TokenImpl>()?;
//!
//! let factory = ConventionFactory::new(universe);
//! let token = factory.create_attribute::<dyn Token>()?;
//! assert!(token.is::<TokenImpl>());
//! assert_eq!(token.view::<dyn Token>().map(Token::text), Some(""));
//! # Ok(())
//! # }
//! ```

extern crate self as seforim_attributes;

mod config;
mod construct;
mod convention;
mod error;
mod factory;
mod instance;
mod key;
mod overriding;
mod resolver;
pub mod tokenattributes;
mod types;
mod universe;

pub use config::{CacheConfig, FactoryConfig};
pub use construct::{ConstructError, ConstructErrorExt};
pub use convention::ConventionFactory;
pub use error::{AttributeError, AttributeErrorExt};
pub use factory::{
    AttributeFactory, AttributeFactoryExt, FactoryHandle, create_factory,
    default_attribute_factory, default_token_attribute_factory,
};
pub use instance::{AsAny, AttributeImpl, AttributeType, CapabilityView, CapabilityViews, ViewCast};
pub use key::{Attribute, AttributeKey, IMPL_SUFFIX};
pub use overriding::OverrideFactory;
pub use resolver::BindingResolver;
pub use seforim_derive::{attribute, attribute_impl};
pub use types::{Constructor, ImplType, TypeKind};
pub use universe::TypeUniverse;

pub mod prelude {
    pub use crate::error::AttributeError;
    pub use crate::factory::{AttributeFactory, AttributeFactoryExt, FactoryHandle};
    pub use crate::instance::{AttributeImpl, AttributeType};
    pub use crate::key::{Attribute, AttributeKey};
    pub use crate::{ConventionFactory, OverrideFactory, TypeUniverse};
    pub use seforim_derive::{attribute, attribute_impl};
}
