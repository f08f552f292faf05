#![allow(dead_code, unreachable_pub)]

use seforim_attributes::prelude::*;
use seforim_attributes::{ConstructError, ImplType};
use std::sync::Arc;

#[attribute]
pub trait Token: Send + Sync {
    fn text(&self) -> &str;
}

#[attribute]
pub trait Weight: Send + Sync {
    fn weight(&self) -> u32;
}

/// Capability with no implementation anywhere.
#[attribute]
pub trait Orphan: Send + Sync {}

/// Capability whose implementation always fails to construct.
#[attribute]
pub trait Fragile: Send + Sync {}

#[attribute_impl(implements(Token))]
#[derive(Debug, Default)]
pub struct TokenImpl {
    pub text: String,
}

impl Token for TokenImpl {
    fn text(&self) -> &str {
        &self.text
    }
}

impl AttributeImpl for TokenImpl {
    fn clear(&mut self) {
        self.text.clear();
    }
}

#[attribute_impl(implements(Weight))]
#[derive(Debug)]
pub struct WeightImpl {
    pub weight: u32,
}

impl Default for WeightImpl {
    fn default() -> Self {
        Self { weight: 1 }
    }
}

impl Weight for WeightImpl {
    fn weight(&self) -> u32 {
        self.weight
    }
}

impl AttributeImpl for WeightImpl {
    fn clear(&mut self) {
        self.weight = 1;
    }
}

/// Override type for [`Token`].
#[attribute_impl(implements(Token))]
#[derive(Debug)]
pub struct FastToken {
    pub text: &'static str,
}

impl Default for FastToken {
    fn default() -> Self {
        Self { text: "fast" }
    }
}

impl Token for FastToken {
    fn text(&self) -> &str {
        self.text
    }
}

impl AttributeImpl for FastToken {
    fn clear(&mut self) {
        self.text = "fast";
    }
}

#[attribute_impl(implements(Fragile), constructor = refuse)]
#[derive(Debug)]
pub struct FragileImpl {
    pub attempts: u32,
}

fn refuse() -> Result<FragileImpl, ConstructError> {
    Err(ConstructError::failed("resource unavailable"))
}

impl Fragile for FragileImpl {}

impl AttributeImpl for FragileImpl {
    fn clear(&mut self) {
        self.attempts = 0;
    }
}

/// A second `Token` capability whose conventional `TokenImpl` implements something else.
pub mod mismatched {
    use super::Weight;
    use seforim_attributes::prelude::*;

    #[attribute]
    pub trait Token: Send + Sync {}

    #[attribute_impl(implements(Weight))]
    #[derive(Debug, Default)]
    pub struct TokenImpl {
        pub weight: u32,
    }

    impl Weight for TokenImpl {
        fn weight(&self) -> u32 {
            self.weight
        }
    }

    impl AttributeImpl for TokenImpl {
        fn clear(&mut self) {
            self.weight = 0;
        }
    }
}

/// A factory that rejects every request with the same error.
#[derive(Debug, Default)]
pub struct AlwaysFails;

impl AttributeFactory for AlwaysFails {
    fn create(&self, capability: AttributeKey) -> Result<Box<dyn AttributeImpl>, AttributeError> {
        Err(AttributeError::ResolutionNotFound {
            capability,
            derived: "always-fails".to_owned(),
            context: Some("stub".into()),
        })
    }
}

/// User universe layered over the global one, holding every fixture type.
pub fn universe() -> Arc<TypeUniverse> {
    let universe = TypeUniverse::with_parent("fixtures", TypeUniverse::global());
    universe.declare::<dyn Token>().unwrap();
    universe.declare::<dyn Orphan>().unwrap();
    universe.register::<TokenImpl>().unwrap();
    universe.register::<WeightImpl>().unwrap();
    universe.register::<FragileImpl>().unwrap();
    universe.register::<mismatched::TokenImpl>().unwrap();
    Arc::new(universe)
}

/// Same as [`universe`] but without `TokenImpl`.
pub fn universe_without_token_impl() -> Arc<TypeUniverse> {
    let universe = TypeUniverse::new("fixtures-missing");
    universe.declare::<dyn Token>().unwrap();
    universe.register::<WeightImpl>().unwrap();
    Arc::new(universe)
}

pub fn token_key() -> AttributeKey {
    <dyn Token as Attribute>::KEY
}

pub fn fast_token_type() -> ImplType {
    ImplType::of::<FastToken>()
}
