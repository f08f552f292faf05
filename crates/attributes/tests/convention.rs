pub mod fixtures;

use fixtures::*;
use seforim_attributes::prelude::*;
use seforim_attributes::{ConstructError, FactoryConfig, create_factory};
use std::sync::Arc;

#[test]
fn test_convention_resolves_token_impl() {
    let factory = ConventionFactory::new(universe());
    let token = factory.create(token_key()).unwrap();

    assert!(token.is::<TokenImpl>());
    assert_eq!(token.downcast_ref::<TokenImpl>().map(Token::text), Some(""));
}

#[test]
fn test_each_call_returns_a_fresh_instance() {
    let factory = ConventionFactory::new(universe());
    let mut first = factory.create_attribute::<dyn Token>().unwrap();
    let second = factory.create_attribute::<dyn Token>().unwrap();

    assert!(!std::ptr::addr_eq(&*first, &*second));

    first.downcast_mut::<TokenImpl>().unwrap().text.push_str("mutated");
    assert_eq!(second.downcast_ref::<TokenImpl>().unwrap().text, "");
}

#[test]
fn test_missing_impl_is_resolution_not_found() {
    let factory = ConventionFactory::new(universe_without_token_impl());
    let err = factory.create(token_key()).unwrap_err();

    let AttributeError::ResolutionNotFound { capability, derived, .. } = &err else {
        panic!("expected ResolutionNotFound, got {err:?}");
    };
    assert_eq!(*capability, token_key());
    assert_eq!(*derived, token_key().derived_impl_name());
    assert!(err.is_resolution_failure());
}

#[test]
fn test_orphan_capability_is_resolution_not_found() {
    let factory = ConventionFactory::new(universe());
    let err = factory.create_attribute::<dyn Orphan>().unwrap_err();
    assert!(matches!(err, AttributeError::ResolutionNotFound { .. }));
    assert_eq!(err.capability(), Some(<dyn Orphan as Attribute>::KEY));
}

#[test]
fn test_impl_not_implementing_capability_is_mismatch() {
    let factory = ConventionFactory::new(universe());
    let err = factory.create_attribute::<dyn mismatched::Token>().unwrap_err();

    assert!(matches!(err, AttributeError::ResolutionMismatch { .. }), "got {err:?}");
    assert_eq!(err.capability(), Some(<dyn mismatched::Token as Attribute>::KEY));
}

#[test]
fn test_failing_constructor_is_construction_failure() {
    let factory = ConventionFactory::new(universe());
    let err = factory.create_attribute::<dyn Fragile>().unwrap_err();

    let AttributeError::ConstructionFailure { implementation, source, .. } = &err else {
        panic!("expected ConstructionFailure, got {err:?}");
    };
    assert_eq!(*implementation, <FragileImpl as AttributeType>::NAME);
    assert!(matches!(source, ConstructError::Failed { .. }));
    assert!(err.is_construction_failure());
    assert!(!err.is_resolution_failure());
}

#[test]
fn test_user_universe_still_sees_builtins() {
    use seforim_attributes::tokenattributes::{CharTermAttribute, CharTermAttributeImpl};

    let factory = ConventionFactory::new(universe());
    let term = factory.create_attribute::<dyn CharTermAttribute>().unwrap();
    assert!(term.is::<CharTermAttributeImpl>());
}

#[test]
fn test_uncached_and_cached_factories_agree() {
    let mut config = FactoryConfig::default();
    config.resolution_cache.enabled = false;
    let uncached = ConventionFactory::with_config(universe(), &config);
    let cached = ConventionFactory::new(universe());

    for _ in 0..3 {
        assert!(uncached.create(token_key()).unwrap().is::<TokenImpl>());
        assert!(cached.create(token_key()).unwrap().is::<TokenImpl>());
    }
}

#[test]
fn test_create_factory_without_override_is_the_child() {
    let child: FactoryHandle = Arc::new(ConventionFactory::new(universe()));
    let handle = create_factory(None, Some(Arc::clone(&child)));
    assert!(Arc::ptr_eq(&handle, &child));
}
