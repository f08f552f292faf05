use std::borrow::Cow;

#[seforim_derive::seforim_error]
pub enum CompatError {
    /// A font format code other than TrueType or Type 1.
    #[error("Font format not recognized{}: {code}", format_context(.context))]
    UnrecognizedFormat { code: i32, context: Option<Cow<'static, str>> },

    #[error("Font I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The path-based font loader rejected the data.
    #[error("Font loading failed{}: {message}", format_context(.context))]
    FontLoad { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Index input provider {name} is not registered{}", format_context(.context))]
    ProviderMissing { name: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error(
        "Index input provider {name} has no constructor taking a permit count{}",
        format_context(.context)
    )]
    ConstructorMismatch { name: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Failed to instantiate index input provider {name}{}: {message}", format_context(.context))]
    ProviderFailed {
        name: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },
}
