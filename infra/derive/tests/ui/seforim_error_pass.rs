use seforim_derive::seforim_error;
use std::borrow::Cow;

#[seforim_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("boom")).context("reading fixture")
}

fn main() {
    let from_io: DemoError = std::io::Error::other("boom").into();
    assert!(matches!(from_io, DemoError::Io { context: None, .. }));

    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (reading fixture): boom");

    let internal: DemoError = "broken".into();
    assert!(matches!(internal, DemoError::Internal { .. }));
}
