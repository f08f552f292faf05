//! # Token Attributes
//!
//! The built-in capabilities every tokenizer relies on, each with a convention-named
//! implementation, plus [`PackedTokenAttributeImpl`], which implements all of them in a
//! single instance and is the override type of
//! [`default_token_attribute_factory`](crate::default_token_attribute_factory).

use crate::error::AttributeError;
use crate::instance::AttributeImpl;
use crate::universe::TypeUniverse;
use crate::{attribute, attribute_impl};
use std::borrow::Cow;

/// Token type assigned when a tokenizer does not set one.
pub const DEFAULT_TYPE: &str = "word";

/// The text of a token.
#[attribute]
pub trait CharTermAttribute: Send + Sync {
    fn as_str(&self) -> &str;
    fn append(&mut self, text: &str);
    fn set_empty(&mut self);

    fn len(&self) -> usize {
        self.as_str().len()
    }

    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

/// Start and end character offsets of a token.
#[attribute]
pub trait OffsetAttribute: Send + Sync {
    fn start_offset(&self) -> usize;
    fn end_offset(&self) -> usize;

    /// # Panics
    /// Panics if `start > end`.
    fn set_offset(&mut self, start: usize, end: usize);
}

/// Position of a token relative to the previous one.
#[attribute]
pub trait PositionIncrementAttribute: Send + Sync {
    fn position_increment(&self) -> u32;
    fn set_position_increment(&mut self, increment: u32);
}

/// Lexical type of a token, e.g. `"word"`.
#[attribute]
pub trait TypeAttribute: Send + Sync {
    fn token_type(&self) -> &str;
    fn set_token_type(&mut self, token_type: Cow<'static, str>);
}

#[attribute_impl(implements(CharTermAttribute))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CharTermAttributeImpl {
    term: String,
}

impl CharTermAttribute for CharTermAttributeImpl {
    fn as_str(&self) -> &str {
        &self.term
    }

    fn append(&mut self, text: &str) {
        self.term.push_str(text);
    }

    fn set_empty(&mut self) {
        self.term.clear();
    }
}

impl AttributeImpl for CharTermAttributeImpl {
    fn clear(&mut self) {
        self.term.clear();
    }
}

#[attribute_impl(implements(OffsetAttribute))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OffsetAttributeImpl {
    start: usize,
    end: usize,
}

impl OffsetAttribute for OffsetAttributeImpl {
    fn start_offset(&self) -> usize {
        self.start
    }

    fn end_offset(&self) -> usize {
        self.end
    }

    fn set_offset(&mut self, start: usize, end: usize) {
        assert!(start <= end, "start offset {start} must not exceed end offset {end}");
        self.start = start;
        self.end = end;
    }
}

impl AttributeImpl for OffsetAttributeImpl {
    fn clear(&mut self) {
        self.start = 0;
        self.end = 0;
    }
}

#[attribute_impl(implements(PositionIncrementAttribute))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionIncrementAttributeImpl {
    increment: u32,
}

impl Default for PositionIncrementAttributeImpl {
    fn default() -> Self {
        Self { increment: 1 }
    }
}

impl PositionIncrementAttribute for PositionIncrementAttributeImpl {
    fn position_increment(&self) -> u32 {
        self.increment
    }

    fn set_position_increment(&mut self, increment: u32) {
        self.increment = increment;
    }
}

impl AttributeImpl for PositionIncrementAttributeImpl {
    fn clear(&mut self) {
        self.increment = 1;
    }

    fn end(&mut self) {
        self.increment = 0;
    }
}

#[attribute_impl(implements(TypeAttribute))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAttributeImpl {
    token_type: Cow<'static, str>,
}

impl Default for TypeAttributeImpl {
    fn default() -> Self {
        Self { token_type: Cow::Borrowed(DEFAULT_TYPE) }
    }
}

impl TypeAttribute for TypeAttributeImpl {
    fn token_type(&self) -> &str {
        &self.token_type
    }

    fn set_token_type(&mut self, token_type: Cow<'static, str>) {
        self.token_type = token_type;
    }
}

impl AttributeImpl for TypeAttributeImpl {
    fn clear(&mut self) {
        self.token_type = Cow::Borrowed(DEFAULT_TYPE);
    }
}

/// All token attributes in one instance.
#[attribute_impl(implements(
    CharTermAttribute,
    OffsetAttribute,
    PositionIncrementAttribute,
    TypeAttribute
))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedTokenAttributeImpl {
    term: String,
    start: usize,
    end: usize,
    increment: u32,
    token_type: Cow<'static, str>,
}

impl Default for PackedTokenAttributeImpl {
    fn default() -> Self {
        Self {
            term: String::new(),
            start: 0,
            end: 0,
            increment: 1,
            token_type: Cow::Borrowed(DEFAULT_TYPE),
        }
    }
}

impl CharTermAttribute for PackedTokenAttributeImpl {
    fn as_str(&self) -> &str {
        &self.term
    }

    fn append(&mut self, text: &str) {
        self.term.push_str(text);
    }

    fn set_empty(&mut self) {
        self.term.clear();
    }
}

impl OffsetAttribute for PackedTokenAttributeImpl {
    fn start_offset(&self) -> usize {
        self.start
    }

    fn end_offset(&self) -> usize {
        self.end
    }

    fn set_offset(&mut self, start: usize, end: usize) {
        assert!(start <= end, "start offset {start} must not exceed end offset {end}");
        self.start = start;
        self.end = end;
    }
}

impl PositionIncrementAttribute for PackedTokenAttributeImpl {
    fn position_increment(&self) -> u32 {
        self.increment
    }

    fn set_position_increment(&mut self, increment: u32) {
        self.increment = increment;
    }
}

impl TypeAttribute for PackedTokenAttributeImpl {
    fn token_type(&self) -> &str {
        &self.token_type
    }

    fn set_token_type(&mut self, token_type: Cow<'static, str>) {
        self.token_type = token_type;
    }
}

impl AttributeImpl for PackedTokenAttributeImpl {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn end(&mut self) {
        self.clear();
        self.increment = 0;
    }
}

/// Registers the built-in capabilities and their implementations into `universe`.
///
/// # Errors
/// Returns [`AttributeError::DuplicateType`] if any name is already taken by a different type.
pub fn register_builtins(universe: &TypeUniverse) -> Result<(), AttributeError> {
    universe.declare::<dyn CharTermAttribute>()?;
    universe.declare::<dyn OffsetAttribute>()?;
    universe.declare::<dyn PositionIncrementAttribute>()?;
    universe.declare::<dyn TypeAttribute>()?;

    universe.register::<CharTermAttributeImpl>()?;
    universe.register::<OffsetAttributeImpl>()?;
    universe.register::<PositionIncrementAttributeImpl>()?;
    universe.register::<TypeAttributeImpl>()?;
    universe.register::<PackedTokenAttributeImpl>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::AttributeType;
    use crate::key::Attribute;

    #[test]
    fn test_impl_names_follow_the_convention() {
        let key = <dyn CharTermAttribute as Attribute>::KEY;
        assert_eq!(key.derived_impl_name(), CharTermAttributeImpl::NAME);
        assert_eq!(
            <dyn OffsetAttribute as Attribute>::KEY.derived_impl_name(),
            OffsetAttributeImpl::NAME
        );
        assert!(key.name().ends_with("tokenattributes::CharTermAttribute"));
    }

    #[test]
    fn test_packed_token_lists_all_capabilities() {
        assert_eq!(PackedTokenAttributeImpl::IMPLEMENTS.len(), 4);
        assert!(PackedTokenAttributeImpl::IMPLEMENTS.contains(&<dyn TypeAttribute>::KEY));
    }

    #[test]
    fn test_packed_token_end_zeroes_increment() {
        let mut token = PackedTokenAttributeImpl::default();
        token.append("shalom");
        token.set_offset(3, 9);
        token.end();
        assert!(CharTermAttribute::is_empty(&token));
        assert_eq!(token.position_increment(), 0);
        assert_eq!(token.end_offset(), 0);
        assert_eq!(token.token_type(), DEFAULT_TYPE);
    }

    #[test]
    fn test_packed_token_views_share_one_instance() {
        let mut packed: Box<dyn AttributeImpl> = Box::new(PackedTokenAttributeImpl::default());

        packed.view_mut::<dyn CharTermAttribute>().unwrap().append("torah");
        packed.view_mut::<dyn OffsetAttribute>().unwrap().set_offset(0, 5);

        assert_eq!(packed.view::<dyn CharTermAttribute>().map(|term| term.len()), Some(5));
        assert_eq!(packed.view::<dyn OffsetAttribute>().map(OffsetAttribute::end_offset), Some(5));
        assert_eq!(packed.view::<dyn TypeAttribute>().map(TypeAttribute::token_type), Some(DEFAULT_TYPE));
    }

    #[test]
    fn test_view_of_unlisted_capability_is_none() {
        let term: Box<dyn AttributeImpl> = Box::new(CharTermAttributeImpl::default());
        assert!(term.view::<dyn CharTermAttribute>().is_some());
        assert!(term.view::<dyn OffsetAttribute>().is_none());
    }

    #[test]
    #[should_panic(expected = "must not exceed")]
    fn test_inverted_offsets_panic() {
        OffsetAttributeImpl::default().set_offset(5, 2);
    }
}
