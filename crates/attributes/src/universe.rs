use crate::error::AttributeError;
use crate::instance::AttributeType;
use crate::key::Attribute;
use crate::tokenattributes;
use crate::types::ImplType;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::sync::{Arc, LazyLock};
use tracing::debug;

static GLOBAL_UNIVERSE: LazyLock<Arc<TypeUniverse>> = LazyLock::new(|| {
    let universe = TypeUniverse::new("global");
    tokenattributes::register_builtins(&universe)
        .expect("CRITICAL: Built-in token attributes failed to register");
    Arc::new(universe)
});

/// The set of types a factory can see, indexed by fully qualified name.
///
/// Registration is append-only: once a name is bound it never changes, so resolved
/// bindings stay valid for the lifetime of the universe. A universe may delegate to a
/// parent; lookups consult the parent first, so a child universe adds user types on top
/// of the global one without shadowing it.
#[derive(Debug)]
pub struct TypeUniverse {
    name: Cow<'static, str>,
    parent: Option<Arc<Self>>,
    types: RwLock<FxHashMap<&'static str, ImplType>>,
}

impl TypeUniverse {
    /// Creates an empty root universe.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into(), parent: None, types: RwLock::default() }
    }

    /// Creates an empty universe that delegates lookups to `parent` first.
    #[must_use]
    pub fn with_parent(name: impl Into<Cow<'static, str>>, parent: Arc<Self>) -> Self {
        Self { name: name.into(), parent: Some(parent), types: RwLock::default() }
    }

    /// The process-wide universe holding the built-in token attributes.
    ///
    /// # Panics
    ///
    /// Panics on first access if the built-in registrations conflict, which indicates a
    /// programming error in this crate.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_UNIVERSE)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers an implementation type generated by `#[attribute_impl]`.
    ///
    /// # Errors
    /// Returns [`AttributeError::DuplicateType`] if a different type owns the name.
    pub fn register<T: AttributeType>(&self) -> Result<(), AttributeError> {
        self.register_type(ImplType::of::<T>())
    }

    /// Registers the capability declaration itself.
    ///
    /// # Errors
    /// Returns [`AttributeError::DuplicateType`] if a different type owns the name.
    pub fn declare<A: Attribute + ?Sized>(&self) -> Result<(), AttributeError> {
        self.register_type(ImplType::interface(A::KEY))
    }

    /// Registers an arbitrary descriptor. Re-registering an identical descriptor is a no-op.
    ///
    /// # Errors
    /// Returns [`AttributeError::DuplicateType`] if a different type owns the name here
    /// or in any parent universe.
    pub fn register_type(&self, ty: ImplType) -> Result<(), AttributeError> {
        if let Some(inherited) = self.parent.as_ref().and_then(|p| p.lookup(ty.name())) {
            return check_same(&inherited, &ty);
        }

        match self.types.write().entry(ty.name()) {
            Entry::Occupied(existing) => check_same(existing.get(), &ty),
            Entry::Vacant(slot) => {
                debug!(universe = %self.name, name = ty.name(), kind = ?ty.kind(), "Registered type");
                slot.insert(ty);
                Ok(())
            },
        }
    }

    /// Looks a type up by name, parent universes first.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ImplType> {
        self.parent
            .as_ref()
            .and_then(|parent| parent.lookup(name))
            .or_else(|| self.types.read().get(name).copied())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of types registered directly in this universe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

fn check_same(existing: &ImplType, candidate: &ImplType) -> Result<(), AttributeError> {
    if existing.same_shape(candidate) {
        return Ok(());
    }
    Err(AttributeError::DuplicateType {
        message: format!("{} is already registered as a different type", candidate.name()).into(),
        context: None,
    })
}
