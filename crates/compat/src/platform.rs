/// True when compiled for Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}
