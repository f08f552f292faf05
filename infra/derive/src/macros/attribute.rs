use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Expr, ItemStruct, ItemTrait, Lit, LitStr, Meta, MetaNameValue, Path, Token, Type};

/// Expands `#[attribute]` on a capability trait.
pub fn expand_attribute(args: TokenStream, input: ItemTrait) -> TokenStream {
    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "#[attribute] capability traits cannot be generic",
        )
        .to_compile_error();
    }

    let name = match parse_attribute_args(args) {
        Ok(name) => name,
        Err(err) => return err,
    };
    let ident = &input.ident;
    let name = qualified_name(name.as_ref(), ident);

    quote! {
        #input

        #[automatically_derived]
        impl ::seforim_attributes::Attribute for dyn #ident {
            const KEY: ::seforim_attributes::AttributeKey =
                ::seforim_attributes::AttributeKey::new(#name);
        }
    }
}

/// Expands `#[attribute_impl(...)]` on an implementation struct.
pub fn expand_attribute_impl(args: TokenStream, input: ItemStruct) -> TokenStream {
    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "#[attribute_impl] implementation types cannot be generic",
        )
        .to_compile_error();
    }

    let ImplArgs { implements, name, constructor } = match parse_impl_args(args) {
        Ok(args) => args,
        Err(err) => return err,
    };
    if implements.is_empty() {
        return syn::Error::new_spanned(
            &input.ident,
            "#[attribute_impl] requires `implements(...)` with at least one capability",
        )
        .to_compile_error();
    }

    let capabilities = match implements.iter().map(capability_path).collect::<Result<Vec<_>, _>>() {
        Ok(paths) => paths,
        Err(err) => return err,
    };

    let ident = &input.ident;
    let name = qualified_name(name.as_ref(), ident);
    let construct = constructor.map_or_else(
        || quote! { ::core::result::Result::Ok(<Self as ::core::default::Default>::default()) },
        |path| quote! { #path() },
    );
    let views = capabilities.iter().map(|capability| view_entry(ident, capability));

    quote! {
        #input

        #[automatically_derived]
        impl ::seforim_attributes::AttributeType for #ident {
            const NAME: &'static str = #name;
            const IMPLEMENTS: &'static [::seforim_attributes::AttributeKey] = &[
                #( <dyn #capabilities as ::seforim_attributes::Attribute>::KEY ),*
            ];

            fn construct() -> ::core::result::Result<Self, ::seforim_attributes::ConstructError> {
                #construct
            }
        }

        #[automatically_derived]
        impl ::seforim_attributes::CapabilityViews for #ident {
            fn capability_views(&self) -> &'static [::seforim_attributes::CapabilityView] {
                const VIEWS: &[::seforim_attributes::CapabilityView] = &[ #( #views ),* ];
                VIEWS
            }
        }

        const _: () = {
            #[allow(dead_code)]
            fn assert_implements(value: &#ident) {
                #( let _: &dyn #capabilities = value; )*
            }
        };
    }
}

/// One `CapabilityView` casting an erased `#ident` to `dyn #capability`.
fn view_entry(ident: &syn::Ident, capability: &Path) -> TokenStream {
    quote! {
        {
            fn view<'a>(
                this: &'a (dyn ::seforim_attributes::AttributeImpl + 'static),
            ) -> ::core::option::Option<&'a (dyn #capability + 'static)> {
                this.downcast_ref::<#ident>().map(|value| value as &(dyn #capability + 'static))
            }

            fn view_mut<'a>(
                this: &'a mut (dyn ::seforim_attributes::AttributeImpl + 'static),
            ) -> ::core::option::Option<&'a mut (dyn #capability + 'static)> {
                this.downcast_mut::<#ident>().map(|value| value as &mut (dyn #capability + 'static))
            }

            const CAST: ::seforim_attributes::ViewCast<dyn #capability> =
                ::seforim_attributes::ViewCast { view, view_mut };
            ::seforim_attributes::CapabilityView::new::<dyn #capability>(&CAST)
        }
    }
}

struct ImplArgs {
    implements: Vec<Type>,
    name: Option<LitStr>,
    constructor: Option<Path>,
}

fn parse_attribute_args(args: TokenStream) -> Result<Option<LitStr>, TokenStream> {
    let mut name = None;
    for meta in parse_metas(args)? {
        let Meta::NameValue(name_value) = meta else {
            return Err(
                syn::Error::new_spanned(meta, "Expected `name = \"...\"`").to_compile_error()
            );
        };
        if !name_value.path.is_ident("name") {
            return Err(syn::Error::new_spanned(
                name_value.path,
                "Only `name = \"...\"` is supported",
            )
            .to_compile_error());
        }
        name = Some(set_once(name, &name_value, string_literal(&name_value)?)?);
    }
    Ok(name)
}

fn parse_impl_args(args: TokenStream) -> Result<ImplArgs, TokenStream> {
    let mut implements = Vec::new();
    let mut name = None;
    let mut constructor = None;

    for meta in parse_metas(args)? {
        match meta {
            Meta::List(list) if list.path.is_ident("implements") => {
                let parser = Punctuated::<Type, Token![,]>::parse_terminated;
                let types = list.parse_args_with(parser).map_err(|err| err.to_compile_error())?;
                implements.extend(types);
            },
            Meta::NameValue(nv) if nv.path.is_ident("name") => {
                name = Some(set_once(name, &nv, string_literal(&nv)?)?);
            },
            Meta::NameValue(nv) if nv.path.is_ident("constructor") => {
                let Expr::Path(expr) = &nv.value else {
                    return Err(syn::Error::new_spanned(
                        &nv.value,
                        "Expected a function path for `constructor = ...`",
                    )
                    .to_compile_error());
                };
                constructor = Some(set_once(constructor, &nv, expr.path.clone())?);
            },
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Supported arguments: `implements(...)`, `name = \"...\"`, `constructor = path`",
                )
                .to_compile_error());
            },
        }
    }

    Ok(ImplArgs { implements, name, constructor })
}

fn parse_metas(args: TokenStream) -> Result<Punctuated<Meta, Token![,]>, TokenStream> {
    let parser = Punctuated::<Meta, Token![,]>::parse_terminated;
    parser.parse2(args).map_err(|err| err.to_compile_error())
}

fn string_literal(name_value: &MetaNameValue) -> Result<LitStr, TokenStream> {
    if let Expr::Lit(expr) = &name_value.value
        && let Lit::Str(lit) = &expr.lit
    {
        return Ok(lit.clone());
    }
    Err(syn::Error::new_spanned(&name_value.value, "Expected string literal").to_compile_error())
}

fn set_once<T>(current: Option<T>, span: &MetaNameValue, value: T) -> Result<T, TokenStream> {
    if current.is_some() {
        return Err(syn::Error::new_spanned(span, "Duplicate argument").to_compile_error());
    }
    Ok(value)
}

/// Explicit names win; otherwise the name is the item's fully qualified Rust path.
fn qualified_name(explicit: Option<&LitStr>, ident: &syn::Ident) -> TokenStream {
    explicit.map_or_else(
        || quote! { ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident)) },
        |lit| quote! { #lit },
    )
}

/// `implements(Foo)` and `implements(dyn Foo)` are equivalent.
fn capability_path(ty: &Type) -> Result<Path, TokenStream> {
    match ty {
        Type::Path(path) if path.qself.is_none() => return Ok(path.path.clone()),
        Type::TraitObject(object) if object.bounds.len() == 1 => {
            if let Some(syn::TypeParamBound::Trait(bound)) = object.bounds.first() {
                return Ok(bound.path.clone());
            }
        },
        _ => {},
    }
    Err(syn::Error::new_spanned(ty, "Expected a capability trait path").to_compile_error())
}
