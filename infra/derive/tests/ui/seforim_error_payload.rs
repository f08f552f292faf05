use seforim_derive::seforim_error;
use std::borrow::Cow;

#[seforim_error]
pub enum LookupError {
    #[error("Lookup of {key} failed{}: {source}", format_context(.context))]
    Failed { key: &'static str, source: std::io::Error, context: Option<Cow<'static, str>> },
}

// No `From<std::io::Error>` is generated because `Failed` carries `key`.
impl From<std::io::Error> for LookupError {
    fn from(source: std::io::Error) -> Self {
        Self::Failed { key: "unknown", source, context: None }
    }
}

fn main() {
    let err: Result<(), LookupError> =
        Err(LookupError::Failed { key: "k", source: std::io::Error::other("x"), context: None });
    let err = err.context("scan").unwrap_err();
    assert_eq!(err.to_string(), "Lookup of k failed (scan): x");

    let converted: LookupError = std::io::Error::other("y").into();
    assert!(matches!(converted, LookupError::Failed { key: "unknown", .. }));
}
