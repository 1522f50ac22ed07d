//! Derive macros for relay-store
//!
//! # Available Macros
//!
//! - `#[derive(CasePaths)]` - Generates a [`CasePath`] constructor for every
//!   variant of an action enum
//!
//! # Example
//!
//! ```ignore
//! use relay_store_macros::CasePaths;
//!
//! #[derive(CasePaths, Clone, Debug, PartialEq)]
//! enum ChildAction {
//!     SomeAction(i32),
//!     Rename { first: String, last: String },
//!     Reset,
//! }
//!
//! // Generated constructors:
//! let some_action = ChildAction::some_action_case();
//! assert_eq!(some_action.extract(&ChildAction::SomeAction(42)), Some(42));
//! assert_eq!(ChildAction::reset_case().embed(()), ChildAction::Reset);
//! ```
//!
//! [`CasePath`]: https://docs.rs/relay-store-core/latest/relay_store_core/case_path/struct.CasePath.html

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type, Variant};

/// Derive macro for action enums
///
/// For each variant `SomeVariant`, generates
/// `fn some_variant_case() -> CasePath<Self, Payload>` where `Payload` is:
///
/// - `()` for unit variants
/// - the field type for variants with exactly one field
/// - a tuple of the field types, in declaration order, otherwise
///
/// Extracting clones the payload out of the action, so every field type must
/// implement `Clone`.
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
///
/// # Example
///
/// ```ignore
/// #[derive(CasePaths, Clone, Debug)]
/// enum NotificationsAction {
///     Toggle(bool),
///     Saved { summary: String },
///     Dismiss,
/// }
///
/// let path: CasePath<NotificationsAction, String> = NotificationsAction::saved_case();
/// let relayed = reducer.relay_case(path, |summary| println!("{summary}"));
/// ```
#[proc_macro_derive(CasePaths)]
pub fn derive_case_paths(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(
            input,
            "#[derive(CasePaths)] can only be used on enums"
        )
        .to_compile_error()
        .into();
    };

    let constructors = data_enum.variants.iter().map(case_path_constructor);

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #(#constructors)*
        }
    };

    TokenStream::from(expanded)
}

/// Generate the `<variant>_case()` constructor for one variant
fn case_path_constructor(variant: &Variant) -> TokenStream2 {
    let variant_name = &variant.ident;
    let method = format_ident!("{}_case", to_snake_case(&variant_name.unraw().to_string()));
    let doc = format!("Case path into [`Self::{variant_name}`]");

    let field_types: Vec<&Type> = variant.fields.iter().map(|field| &field.ty).collect();
    let bindings: Vec<Ident> = match &variant.fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .filter_map(|field| field.ident.clone())
            .collect(),
        Fields::Unnamed(_) | Fields::Unit => (0..field_types.len())
            .map(|index| format_ident!("field_{}", index))
            .collect(),
    };

    let payload = match field_types.as_slice() {
        [] => quote! { () },
        [single] => quote! { #single },
        many => quote! { ( #(#many),* ) },
    };

    let pattern = match &variant.fields {
        Fields::Named(_) => quote! { Self::#variant_name { #(#bindings),* } },
        Fields::Unnamed(_) => quote! { Self::#variant_name ( #(#bindings),* ) },
        Fields::Unit => quote! { Self::#variant_name },
    };

    let (embed_arg, extracted) = match bindings.as_slice() {
        [] => (quote! { () }, quote! { () }),
        [single] => (
            quote! { #single },
            quote! { ::core::clone::Clone::clone(#single) },
        ),
        many => (
            quote! { ( #(#many),* ) },
            quote! { ( #(::core::clone::Clone::clone(#many)),* ) },
        ),
    };

    quote! {
        #[doc = #doc]
        #[must_use]
        #[allow(clippy::unused_unit)]
        pub fn #method() -> ::relay_store_core::CasePath<Self, #payload>
        where
            Self: 'static,
            #(#field_types: ::core::clone::Clone,)*
        {
            ::relay_store_core::CasePath::new(
                |#embed_arg: #payload| #pattern,
                |root: &Self| match root {
                    #pattern => ::core::option::Option::Some(#extracted),
                    #[allow(unreachable_patterns)]
                    _ => ::core::option::Option::None,
                },
            )
        }
    }
}

/// Convert a `CamelCase` variant name to `snake_case`
///
/// Acronyms stay together: `HTTPError` becomes `http_error`.
fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut snake = String::with_capacity(ident.len() + 4);

    for (index, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let previous = index.checked_sub(1).and_then(|i| chars.get(i));
            let next = chars.get(index + 1);
            let boundary = previous.is_some_and(|&p| {
                p.is_lowercase()
                    || p.is_ascii_digit()
                    || (p.is_uppercase() && next.is_some_and(|n| n.is_lowercase()))
            });
            if boundary {
                snake.push('_');
            }
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }

    snake
}

#[cfg(test)]
mod tests {
    use super::to_snake_case;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("SomeAction"), "some_action");
        assert_eq!(to_snake_case("Reset"), "reset");
        assert_eq!(to_snake_case("HTTPError"), "http_error");
        assert_eq!(to_snake_case("Page2Loaded"), "page2_loaded");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }
}
