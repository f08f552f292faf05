use crate::construct::ConstructError;
use crate::instance::{AttributeImpl, AttributeType};
use crate::key::AttributeKey;
use std::panic::catch_unwind;

/// Parameterless constructor producing a boxed instance.
pub type Constructor = fn() -> Result<Box<dyn AttributeImpl>, ConstructError>;

/// What a registered type is able to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A capability declaration; never instantiable.
    Interface,
    /// An implementation that cannot be instantiated directly.
    Abstract,
    /// An instantiable implementation.
    Concrete,
}

/// Runtime descriptor of a type in a [`TypeUniverse`](crate::TypeUniverse).
///
/// A resolved binding is just a copy of this descriptor, so it is cheap to cache.
#[derive(Debug, Clone, Copy)]
pub struct ImplType {
    name: &'static str,
    kind: TypeKind,
    implements: &'static [AttributeKey],
    constructor: Option<Constructor>,
}

impl ImplType {
    /// Descriptor for a type registered through `#[attribute_impl]`.
    #[must_use]
    pub fn of<T: AttributeType>() -> Self {
        Self::with_constructor(T::NAME, T::IMPLEMENTS, construct_boxed::<T>)
    }

    /// A concrete type with a hand-written constructor.
    #[must_use]
    pub const fn with_constructor(
        name: &'static str,
        implements: &'static [AttributeKey],
        constructor: Constructor,
    ) -> Self {
        Self { name, kind: TypeKind::Concrete, implements, constructor: Some(constructor) }
    }

    /// A concrete type that has no parameterless constructor.
    #[must_use]
    pub const fn without_default_constructor(
        name: &'static str,
        implements: &'static [AttributeKey],
    ) -> Self {
        Self { name, kind: TypeKind::Concrete, implements, constructor: None }
    }

    #[must_use]
    pub const fn abstract_type(name: &'static str, implements: &'static [AttributeKey]) -> Self {
        Self { name, kind: TypeKind::Abstract, implements, constructor: None }
    }

    /// The declaration of a capability itself.
    #[must_use]
    pub const fn interface(key: AttributeKey) -> Self {
        Self { name: key.name(), kind: TypeKind::Interface, implements: &[], constructor: None }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    #[must_use]
    pub const fn implements(&self) -> &'static [AttributeKey] {
        self.implements
    }

    #[must_use]
    pub fn lists(&self, capability: AttributeKey) -> bool {
        self.implements.contains(&capability)
    }

    /// True when this type is a concrete implementation of `capability`.
    #[must_use]
    pub fn satisfies(&self, capability: AttributeKey) -> bool {
        self.kind == TypeKind::Concrete && self.lists(capability)
    }

    /// Two descriptors describe the same registration. Constructors are not compared.
    pub(crate) fn same_shape(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.implements == other.implements
            && self.constructor.is_some() == other.constructor.is_some()
    }

    /// Runs the parameterless constructor. Panics inside the constructor are caught.
    ///
    /// # Errors
    /// Returns [`ConstructError::MissingConstructor`] when none is registered,
    /// [`ConstructError::Panicked`] if it panicked, or the constructor's own error.
    pub fn instantiate(&self) -> Result<Box<dyn AttributeImpl>, ConstructError> {
        let constructor = self.constructor.ok_or_else(|| ConstructError::MissingConstructor {
            message: self.name.into(),
            context: None,
        })?;
        catch_unwind(constructor).map_err(|payload| ConstructError::from_panic(payload.as_ref()))?
    }
}

fn construct_boxed<T: AttributeType>() -> Result<Box<dyn AttributeImpl>, ConstructError> {
    T::construct().map(|value| Box::new(value) as Box<dyn AttributeImpl>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{CapabilityView, CapabilityViews};

    const WIDGET: AttributeKey = AttributeKey::new("tests::Widget");
    const GADGET: AttributeKey = AttributeKey::new("tests::Gadget");

    #[derive(Debug)]
    struct Exploding;

    impl AttributeImpl for Exploding {
        fn clear(&mut self) {}
    }

    impl CapabilityViews for Exploding {
        fn capability_views(&self) -> &'static [CapabilityView] {
            &[]
        }
    }

    fn explode() -> Result<Box<dyn AttributeImpl>, ConstructError> {
        panic!("constructor blew up")
    }

    #[test]
    fn test_satisfies_requires_concrete_and_listed() {
        let concrete = ImplType::without_default_constructor("tests::WidgetImpl", &[WIDGET]);
        assert!(concrete.satisfies(WIDGET));
        assert!(!concrete.satisfies(GADGET));

        let abstract_ty = ImplType::abstract_type("tests::WidgetImpl", &[WIDGET]);
        assert!(abstract_ty.lists(WIDGET));
        assert!(!abstract_ty.satisfies(WIDGET));

        assert!(!ImplType::interface(WIDGET).satisfies(WIDGET));
    }

    #[test]
    fn test_missing_constructor_is_reported() {
        let ty = ImplType::without_default_constructor("tests::WidgetImpl", &[WIDGET]);
        let err = ty.instantiate().unwrap_err();
        assert!(matches!(err, ConstructError::MissingConstructor { .. }));
    }

    #[test]
    fn test_panicking_constructor_is_caught() {
        let ty = ImplType::with_constructor("tests::WidgetImpl", &[WIDGET], explode);
        let err = ty.instantiate().unwrap_err();
        assert!(matches!(err, ConstructError::Panicked { .. }));
        assert!(err.to_string().contains("constructor blew up"));
    }

    #[test]
    fn test_same_shape_ignores_constructor_identity() {
        fn build() -> Result<Box<dyn AttributeImpl>, ConstructError> {
            Ok(Box::new(Exploding))
        }
        let a = ImplType::with_constructor("tests::WidgetImpl", &[WIDGET], build);
        let b = ImplType::with_constructor("tests::WidgetImpl", &[WIDGET], explode);
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&ImplType::abstract_type("tests::WidgetImpl", &[WIDGET])));
    }
}
