//! Diagnostic VM flags.
//!
//! Native binaries do not run inside a managed VM, so no flag is ever available and
//! callers take their portable fallbacks.

/// Read-only view of VM diagnostic flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VmOptions;

impl VmOptions {
    #[must_use]
    pub const fn current() -> Self {
        Self
    }

    #[must_use]
    pub const fn is_hotspot_vm(self) -> bool {
        false
    }

    /// Value of a named flag such as `UseCompressedOops`.
    #[must_use]
    pub const fn get(self, _name: &str) -> Option<&'static str> {
        None
    }
}
