use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, parse_quote};

use crate::attribute_parser::{self, FieldAttrs};
use crate::field_analyzer;

struct QueryField<'a> {
    field: &'a syn::Field,
    attrs: FieldAttrs,
}

impl QueryField<'_> {
    fn name(&self) -> String {
        self.field
            .ident
            .as_ref()
            .map(|ident| ident.unraw().to_string())
            .unwrap_or_default()
    }

    /// Flattened fields with an empty operator surface their own fields.
    fn is_embedded(&self) -> bool {
        self.attrs.flatten && self.attrs.operator().is_empty()
    }

    fn definition(&self) -> TokenStream {
        let name = self.name();
        let tag = self.attrs.tag_value();
        if self.is_embedded() {
            let inner = field_analyzer::embedded_struct_type(&self.field.ty);
            quote! {
                ::structquery::reflect::FieldDef::embedded(
                    #name,
                    #tag,
                    ::structquery::reflect::StructType::of::<#inner>(),
                )
            }
        } else if self.attrs.flatten {
            quote! { ::structquery::reflect::FieldDef::anonymous(#name, #tag) }
        } else {
            quote! { ::structquery::reflect::FieldDef::leaf(#name, #tag) }
        }
    }

    fn access(&self) -> TokenStream {
        let ident = &self.field.ident;
        if self.is_embedded() {
            field_analyzer::embedded_access(&self.field.ty, &quote! { &self.#ident }, 0)
        } else {
            quote! { ::structquery::reflect::Slot::Value(&self.#ident) }
        }
    }
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "QueryStruct only supports structs with named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new(
                input.ident.span(),
                "QueryStruct can only be derived for structs",
            ));
        }
    };

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            &lifetime.lifetime,
            "QueryStruct cannot be derived for structs with lifetime parameters",
        ));
    }

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let attrs = attribute_parser::parse_field_attrs(&field.attrs)?;
        if !attrs.skip {
            fields.push(QueryField { field, attrs });
        }
    }

    let name = &input.ident;
    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let definitions = fields.iter().map(QueryField::definition);
    let arms = fields.iter().enumerate().map(|(index, field)| {
        let access = field.access();
        quote! { #index => #access, }
    });

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::structquery::reflect::QueryStruct for #name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::structquery::reflect::FieldDef> {
                ::std::vec![#(#definitions),*]
            }

            fn struct_type(&self) -> ::structquery::reflect::StructType {
                ::structquery::reflect::StructType::of::<Self>()
            }

            #[allow(clippy::match_single_binding)]
            fn field(&self, index: usize) -> ::structquery::reflect::Slot<'_> {
                match index {
                    #(#arms)*
                    _ => ::structquery::reflect::Slot::Nil,
                }
            }
        }

        #[automatically_derived]
        impl #impl_generics ::structquery::reflect::AsQuery for #name #ty_generics #where_clause {
            fn as_query(&self) -> ::core::option::Option<&dyn ::structquery::reflect::QueryStruct> {
                ::core::option::Option::Some(self)
            }
        }
    })
}
