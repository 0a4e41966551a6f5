mod attribute_parser;
mod field_analyzer;
mod macro_implementation;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `structquery::QueryStruct` and `structquery::AsQuery`.
///
/// Field attributes, all under `#[sq(...)]`:
///
/// - `"operator;key:value;..."`: the field's tag. Untagged fields use the
///   empty operator, i.e. equality.
/// - `flatten`: the field embeds another query struct, possibly behind
///   `Option` and `Box`. With an empty operator its fields are inlined;
///   with an operator the field itself is a leaf.
/// - `skip`: the field takes no part in filtering.
///
/// ```rust,ignore
/// #[derive(Default, QueryStruct)]
/// pub struct UserQuery {
///     #[sq("like")]
///     pub name: String,
///     #[sq("in;column:id")]
///     pub ids: Vec<i64>,
///     #[sq(flatten)]
///     pub created: Option<Box<CreatedRange>>,
///     #[sq(skip)]
///     pub cursor: Option<String>,
/// }
/// ```
#[proc_macro_derive(QueryStruct, attributes(sq))]
pub fn derive_query_struct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    macro_implementation::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
