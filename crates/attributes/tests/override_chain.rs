pub mod fixtures;

use fixtures::*;
use seforim_attributes::prelude::*;
use seforim_attributes::tokenattributes::{
    CharTermAttribute, CharTermAttributeImpl, OffsetAttribute, PackedTokenAttributeImpl,
};
use seforim_attributes::{
    ImplType, create_factory, default_attribute_factory, default_token_attribute_factory,
};
use std::sync::Arc;

fn chain() -> FactoryHandle {
    let convention: FactoryHandle = Arc::new(ConventionFactory::new(universe()));
    create_factory(Some(fast_token_type()), Some(convention))
}

#[test]
fn test_override_wins_over_convention() {
    let factory = chain();
    for _ in 0..5 {
        let token = factory.create(token_key()).unwrap();
        assert!(token.is::<FastToken>());
        assert!(!token.is::<TokenImpl>());
        assert_eq!(token.downcast_ref::<FastToken>().map(Token::text), Some("fast"));
    }
}

#[test]
fn test_other_capabilities_are_delegated() {
    let factory = chain();
    let weight = factory.create_attribute::<dyn Weight>().unwrap();
    assert_eq!(weight.downcast_ref::<WeightImpl>().map(Weight::weight), Some(1));
}

#[test]
fn test_delegate_failure_propagates_unchanged() {
    let direct = AlwaysFails.create(<dyn Weight as Attribute>::KEY).unwrap_err();
    let factory = OverrideFactory::of::<FastToken>(Arc::new(AlwaysFails));
    let forwarded = factory.create_attribute::<dyn Weight>().unwrap_err();

    assert_eq!(forwarded.to_string(), direct.to_string());
    assert_eq!(forwarded.capability(), direct.capability());
    assert!(matches!(forwarded, AttributeError::ResolutionNotFound { .. }));
}

#[test]
fn test_override_bypasses_a_failing_delegate() {
    let factory = OverrideFactory::of::<FastToken>(Arc::new(AlwaysFails));
    assert!(factory.create(token_key()).unwrap().is::<FastToken>());
}

const TOKEN_ONLY: &[AttributeKey] = &[<dyn Token as Attribute>::KEY];

#[test]
fn test_override_without_constructor_is_construction_failure() {
    let shell = ImplType::without_default_constructor("fixtures::ShellToken", TOKEN_ONLY);
    let factory = OverrideFactory::new(shell, Arc::new(ConventionFactory::new(universe())));
    let err = factory.create(token_key()).unwrap_err();

    assert!(err.is_construction_failure(), "got {err:?}");
    assert_eq!(err.capability(), Some(token_key()));
}

#[test]
fn test_chains_nest() {
    // FastToken over (WeightImpl override over AlwaysFails)
    let inner = create_factory(Some(ImplType::of::<WeightImpl>()), Some(Arc::new(AlwaysFails)));
    let outer = create_factory(Some(fast_token_type()), Some(inner));

    assert!(outer.create(token_key()).unwrap().is::<FastToken>());
    assert!(outer.create_attribute::<dyn Weight>().unwrap().is::<WeightImpl>());
    assert!(outer.create_attribute::<dyn Orphan>().is_err());
}

#[test]
fn test_default_token_factory_packs_token_attributes() {
    let factory = default_token_attribute_factory();
    let term = factory.create_attribute::<dyn CharTermAttribute>().unwrap();
    let offset = factory.create_attribute::<dyn OffsetAttribute>().unwrap();

    assert!(term.is::<PackedTokenAttributeImpl>());
    assert!(offset.is::<PackedTokenAttributeImpl>());

    let plain = default_attribute_factory().create_attribute::<dyn CharTermAttribute>().unwrap();
    assert!(plain.is::<CharTermAttributeImpl>());
}

fn read_text(factory: &dyn AttributeFactory) -> Option<String> {
    let token = factory.create_attribute::<dyn Token>().ok()?;
    token.view::<dyn Token>().map(|token| token.text().to_owned())
}

#[test]
fn test_capability_view_is_independent_of_chain() {
    let convention = ConventionFactory::new(universe());
    let overriding = chain();

    assert_eq!(read_text(&convention).as_deref(), Some(""));
    assert_eq!(read_text(overriding.as_ref()).as_deref(), Some("fast"));
}

#[test]
fn test_term_view_through_token_and_plain_factories() {
    for factory in [default_token_attribute_factory(), default_attribute_factory()] {
        let mut term = factory.create_attribute::<dyn CharTermAttribute>().unwrap();
        term.view_mut::<dyn CharTermAttribute>().unwrap().append("sefer");
        assert_eq!(term.view::<dyn CharTermAttribute>().map(CharTermAttribute::as_str), Some("sefer"));
        assert!(term.view::<dyn Weight>().is_none());
    }
}

#[test]
fn test_abstract_override_defers_to_delegate() {
    let abstract_token = ImplType::abstract_type("fixtures::AbstractToken", TOKEN_ONLY);
    let factory = OverrideFactory::new(abstract_token, Arc::new(ConventionFactory::new(universe())));

    let token = factory.create(token_key()).unwrap();
    assert!(token.is::<TokenImpl>());

    let failing = OverrideFactory::new(abstract_token, Arc::new(AlwaysFails));
    assert!(failing.create(token_key()).unwrap_err().is_resolution_failure());
}
