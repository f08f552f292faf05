use std::fmt;

/// Suffix appended to a capability name to derive its implementation name.
pub const IMPL_SUFFIX: &str = "Impl";

/// Identifies a capability (attribute interface) by its fully qualified name.
///
/// Keys are normally produced by `#[attribute]` and read through [`Attribute::KEY`],
/// but can be built directly for capabilities declared elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeKey {
    name: &'static str,
}

impl AttributeKey {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The implementation name the naming convention expects: `name + "Impl"`.
    #[must_use]
    pub fn derived_impl_name(&self) -> String {
        let mut derived = String::with_capacity(self.name.len() + IMPL_SUFFIX.len());
        derived.push_str(self.name);
        derived.push_str(IMPL_SUFFIX);
        derived
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Implemented for `dyn Capability` by the `#[attribute]` macro.
pub trait Attribute {
    const KEY: AttributeKey;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_impl_name_appends_suffix() {
        let key = AttributeKey::new("analysis::Token");
        assert_eq!(key.derived_impl_name(), "analysis::TokenImpl");
        assert_eq!(key.to_string(), "analysis::Token");
    }
}
