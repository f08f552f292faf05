#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the infrastructure.
//! This crate provides attribute macros that replace runtime reflection with
//! compile-time registration of attribute types, plus the workspace error macro.
//!
//! ## Usage
//! Consumers normally go through the re-exports in `seforim-attributes`:
//! ```toml
//! [dependencies]
//! seforim-attributes = { path = "../crates/attributes" }
//! ```
//!
//! See each macro's docstring for examples; they are `ignore`d to avoid compiling in this crate.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, ItemTrait, parse_macro_input};

/// Declares a trait as a capability (attribute interface).
///
/// Implements `seforim_attributes::Attribute` for `dyn Trait`, giving the trait a stable
/// `AttributeKey`. The key name is the trait's fully qualified path
/// (`module_path!()::TraitName`) unless `name = "..."` overrides it.
///
/// # Errors
/// Emits a compile-time error for generic traits or unknown arguments.
///
/// # Example
/// ```rust,ignore
/// #[seforim_attributes::attribute]
/// pub trait TokenAttribute: Send + Sync {
///     fn text(&self) -> &str;
/// }
/// ```
#[proc_macro_attribute]
pub fn attribute(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemTrait);
    macros::attribute::expand_attribute(args.into(), input).into()
}

/// Registers a struct as an implementation of one or more capabilities.
///
/// Generates `seforim_attributes::AttributeType` for the struct and a compile-time
/// check that the struct really implements every listed capability trait.
///
/// # Arguments
///
/// * `implements(A, B, ...)` - Required. Capability traits the type fulfills.
/// * `name = "..."` - Overrides the registered name (defaults to `module_path!()::Struct`).
/// * `constructor = path` - A `fn() -> Result<Self, ConstructError>`; defaults to `Default::default`.
///
/// # Example
/// ```rust,ignore
/// #[seforim_attributes::attribute_impl(implements(TokenAttribute))]
/// #[derive(Debug, Default)]
/// pub struct TokenAttributeImpl {
///     text: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn attribute_impl(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::attribute::expand_attribute_impl(args.into(), input).into()
}

/// A high-level attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants made of exactly a
///   `source` field and a `context` field. Variants carrying extra data are skipped,
///   since they cannot be built from the source alone.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` when an
///   `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants with a source must include `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[seforim_derive::seforim_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn seforim_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
