use crate::construct::ConstructError;
use crate::key::{Attribute, AttributeKey};
use std::any::Any;
use std::fmt::{self, Debug};

/// Exposes a value as [`Any`] so trait objects can be downcast to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Casts between an erased instance and one capability trait object `A`.
///
/// Built by `#[attribute_impl]` once per listed capability.
pub struct ViewCast<A: ?Sized + 'static> {
    pub view: for<'a> fn(&'a (dyn AttributeImpl + 'static)) -> Option<&'a A>,
    pub view_mut: for<'a> fn(&'a mut (dyn AttributeImpl + 'static)) -> Option<&'a mut A>,
}

impl<A: ?Sized + 'static> Debug for ViewCast<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCast").finish_non_exhaustive()
    }
}

/// One entry of a type's capability table: the key plus its erased [`ViewCast`].
#[derive(Debug, Clone, Copy)]
pub struct CapabilityView {
    key: AttributeKey,
    cast: &'static (dyn Any + Send + Sync),
}

impl CapabilityView {
    #[must_use]
    pub const fn new<A: Attribute + ?Sized + 'static>(cast: &'static ViewCast<A>) -> Self {
        Self { key: A::KEY, cast }
    }

    #[must_use]
    pub const fn key(&self) -> AttributeKey {
        self.key
    }
}

/// Capability table of an implementation type. Generated by `#[attribute_impl]`.
pub trait CapabilityViews {
    fn capability_views(&self) -> &'static [CapabilityView];
}

/// A live attribute instance handed out by an [`AttributeFactory`](crate::AttributeFactory).
///
/// Every call to a factory yields a fresh instance; instances are never pooled.
pub trait AttributeImpl: AsAny + CapabilityViews + Debug + Send + Sync {
    /// Resets the attribute to its initial state.
    fn clear(&mut self);

    /// Resets the attribute at end of input. Defaults to [`AttributeImpl::clear`].
    fn end(&mut self) {
        self.clear();
    }
}

impl dyn AttributeImpl {
    #[must_use]
    pub fn is<T: AttributeImpl>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: AttributeImpl>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: AttributeImpl>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Borrows the instance as the capability trait `A` (written as `dyn A`).
    ///
    /// Returns `None` when the instance's type does not list `A`.
    #[must_use]
    pub fn view<A: Attribute + ?Sized + 'static>(&self) -> Option<&A> {
        let cast = self.view_cast::<A>()?;
        (cast.view)(self)
    }

    pub fn view_mut<A: Attribute + ?Sized + 'static>(&mut self) -> Option<&mut A> {
        let cast = self.view_cast::<A>()?;
        (cast.view_mut)(self)
    }

    fn view_cast<A: Attribute + ?Sized + 'static>(&self) -> Option<&'static ViewCast<A>> {
        self.capability_views()
            .iter()
            .find(|view| view.key == A::KEY)
            .and_then(|view| view.cast.downcast_ref::<ViewCast<A>>())
    }
}

/// Static registration data for an implementation type.
///
/// Generated by `#[attribute_impl(...)]`; the macro also checks at compile time that the
/// type implements each capability listed in [`AttributeType::IMPLEMENTS`]:
///
/// ```compile_fail,E0277
/// use seforim_attributes::prelude::*;
///
/// #[attribute]
/// pub trait Token: Send + Sync {
///     fn text(&self) -> &str;
/// }
///
/// // Lists `Token` without implementing it.
/// #[attribute_impl(implements(Token))]
/// #[derive(Debug, Default)]
/// pub struct TokenImpl;
///
/// impl AttributeImpl for TokenImpl {
///     fn clear(&mut self) {}
/// }
/// ```
pub trait AttributeType: AttributeImpl + Sized {
    /// Fully qualified registration name.
    const NAME: &'static str;
    /// Capabilities this type satisfies.
    const IMPLEMENTS: &'static [AttributeKey];

    /// The parameterless constructor.
    fn construct() -> Result<Self, ConstructError>;
}
