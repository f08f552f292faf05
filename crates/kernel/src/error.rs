use crate::config::ConfigError;
use seforim_attributes::AttributeError;
use seforim_compat::CompatError;
use seforim_logger::LoggerError;
use std::borrow::Cow;

/// Failures while assembling a [`Kernel`](crate::Kernel).
#[seforim_derive::seforim_error]
pub enum KernelError {
    #[error("Configuration failed{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Logger setup failed{}: {source}", format_context(.context))]
    Logger { source: LoggerError, context: Option<Cow<'static, str>> },

    #[error("Platform adapter failed{}: {source}", format_context(.context))]
    Compat { source: CompatError, context: Option<Cow<'static, str>> },

    #[error("Attribute setup failed{}: {source}", format_context(.context))]
    Attributes { source: AttributeError, context: Option<Cow<'static, str>> },
}
