use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Returns the single type argument of `ty` if its last path segment is
/// `wrapper` (`Option`, `Box`, including fully-qualified paths).
fn generic_inner<'a>(ty: &'a syn::Type, wrapper: &str) -> Option<&'a syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let last_seg = type_path.path.segments.last()?;
    if last_seg.ident != wrapper {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &last_seg.arguments else {
        return None;
    };
    match args.args.first() {
        Some(syn::GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// The struct type behind any mix of `Option` and `Box` layers.
pub(crate) fn embedded_struct_type(ty: &syn::Type) -> &syn::Type {
    if let Some(inner) = generic_inner(ty, "Option").or_else(|| generic_inner(ty, "Box")) {
        embedded_struct_type(inner)
    } else {
        ty
    }
}

/// Expression turning `access` (a reference to a field of type `ty`) into a
/// `Slot`, following `Option` and `Box` layers down to the struct.
pub(crate) fn embedded_access(ty: &syn::Type, access: &TokenStream, depth: usize) -> TokenStream {
    if let Some(inner) = generic_inner(ty, "Option") {
        let binding = format_ident!("__sq_inner{}", depth);
        let inner_access = embedded_access(inner, &quote! { #binding }, depth + 1);
        quote! {
            match #access {
                ::core::option::Option::Some(#binding) => #inner_access,
                ::core::option::Option::None => ::structquery::reflect::Slot::Nil,
            }
        }
    } else if let Some(inner) = generic_inner(ty, "Box") {
        embedded_access(inner, &quote! { &**#access }, depth)
    } else {
        quote! { ::structquery::reflect::Slot::Struct(#access) }
    }
}
