use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, Ident, Type, Variant};

const CONTEXT_FIELD: &str = "context";
const INTERNAL_VARIANT: &str = "Internal";

/// What the macro needs to know about one error variant.
struct VariantMeta<'a> {
    ident: &'a Ident,
    source: Option<&'a Field>,
    has_context: bool,
    /// Fields other than `source`/`context`; such variants cannot be built from a source alone.
    has_payload: bool,
    cfg_attrs: Vec<Attribute>,
}

impl<'a> VariantMeta<'a> {
    fn parse(variant: &'a Variant) -> Result<Self, TokenStream> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "seforim_error requires named fields for source/context handling",
            )
            .to_compile_error());
        };

        let mut source = None;
        let mut has_context = false;
        let mut has_payload = false;
        for field in &fields.named {
            if field.ident.as_ref().is_some_and(|ident| ident == CONTEXT_FIELD) {
                if !is_context_type(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "context field must be Option<Cow<'static, str>>",
                    )
                    .to_compile_error());
                }
                has_context = true;
            } else if source.is_none() && is_source(field) {
                source = Some(field);
            } else {
                has_payload = true;
            }
        }

        Ok(Self {
            ident: &variant.ident,
            source,
            has_context,
            has_payload,
            cfg_attrs: variant.attrs.iter().filter(|a| a.path().is_ident("cfg")).cloned().collect(),
        })
    }

    fn is_internal(&self) -> bool {
        self.ident == INTERNAL_VARIANT
    }

    /// `Self::Variant { context: c, .. } => *c = Some(context.into()),`
    fn context_arm(&self, name: &Ident) -> Option<TokenStream> {
        if !self.has_context {
            return None;
        }
        let (ident, cfg_attrs) = (self.ident, &self.cfg_attrs);
        Some(quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), })
    }

    /// `From<Source>` plus a `.context()` impl on `Result<T, Source>`, for variants made of
    /// nothing but a source and a context.
    fn source_conversions(&self, name: &Ident, ext: &Ident) -> Option<TokenStream> {
        if self.is_internal() || !self.has_context || self.has_payload {
            return None;
        }
        let source = self.source?;
        let field = source.ident.as_ref()?;
        let ty = &source.ty;
        let (ident, cfg_attrs) = (self.ident, &self.cfg_attrs);

        Some(quote! {
            #(#cfg_attrs)*
            #[automatically_derived]
            impl From<#ty> for #name {
                #[inline]
                fn from(#field: #ty) -> Self { Self::#ident { #field, context: None } }
            }

            #(#cfg_attrs)*
            impl<T> #ext<T> for std::result::Result<T, #ty> {
                #[inline]
                fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                    self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
                }
            }
        })
    }

    /// `From<&'static str>` and `From<String>` building the `Internal` variant.
    fn message_conversions(&self, name: &Ident) -> TokenStream {
        let cfg_attrs = &self.cfg_attrs;
        quote! {
            #(#cfg_attrs)*
            impl From<&'static str> for #name {
                #[inline]
                fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
            }
            #(#cfg_attrs)*
            impl From<String> for #name {
                #[inline]
                fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
            }
        }
    }
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return quote! { compile_error!("seforim_error can only be applied to enums"); };
    };

    let variants = match data.variants.iter().map(VariantMeta::parse).collect::<Result<Vec<_>, _>>() {
        Ok(variants) => variants,
        Err(err) => return err,
    };
    if let Some(orphan) = variants.iter().find(|v| v.source.is_some() && !v.has_context) {
        return syn::Error::new_spanned(
            orphan.ident,
            "seforim_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        )
        .to_compile_error();
    }

    let name = &input.ident;
    let ext = format_ident!("{}Ext", name);
    let extra_derives = missing_derives(&input);
    let context_arms = variants.iter().filter_map(|v| v.context_arm(name));
    let source_conversions = variants.iter().filter_map(|v| v.source_conversions(name, &ext));
    let message_conversions =
        variants.iter().find(|v| v.is_internal()).map(|v| v.message_conversions(name));

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #extra_derives
        #input

        pub trait #ext<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for std::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut e| {
                    match &mut e {
                        #( #context_arms )*
                        _ => {}
                    }
                    e
                })
            }
        }

        #(#source_conversions)*
        #message_conversions

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

/// `#[derive(Debug, thiserror::Error)]`, minus whatever the enum already derives.
fn missing_derives(input: &DeriveInput) -> TokenStream {
    let mut derived = FxHashSet::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                derived.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    let wanted = [("Debug", quote! { Debug }), ("Error", quote! { ::thiserror::Error })];
    let missing: Vec<_> =
        wanted.into_iter().filter(|(name, _)| !derived.contains(*name)).map(|(_, path)| path).collect();
    if missing.is_empty() { quote! {} } else { quote! { #[derive(#(#missing),*)] } }
}

/// Named `source`, or tagged `#[source]` / `#[from]`.
fn is_source(field: &Field) -> bool {
    field.ident.as_ref().is_some_and(|ident| ident == "source")
        || field.attrs.iter().any(|attr| attr.path().is_ident("source") || attr.path().is_ident("from"))
}

/// Matches `Option<Cow<'static, str>>`, with or without path prefixes and whitespace.
fn is_context_type(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(option) = path.path.segments.last() else {
        return false;
    };
    let rendered = quote! { #option }.to_string().replace(' ', "");
    rendered == "Option<Cow<'static,str>>"
        || (rendered.starts_with("Option<") && rendered.ends_with("::Cow<'static,str>>"))
}
