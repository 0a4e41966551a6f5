use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::token::Comma;
use syn::{Expr, ExprLit, Lit, LitStr};

/// Everything `#[sq(...)]` can say about one field.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub tag: Option<LitStr>,
    pub flatten: bool,
    pub skip: bool,
}

impl FieldAttrs {
    pub fn tag_value(&self) -> String {
        self.tag.as_ref().map(LitStr::value).unwrap_or_default()
    }

    /// Operator part of the tag, i.e. everything before the first `;`.
    pub fn operator(&self) -> String {
        let tag = self.tag_value();
        tag.split(';').next().unwrap_or_default().trim().to_string()
    }
}

/// Parses every `#[sq(...)]` attribute on a field.
///
/// Accepted items: one string literal (the tag), `flatten`, `skip`.
pub(crate) fn parse_field_attrs(attrs: &[syn::Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("sq")) {
        let items = attr.parse_args_with(Punctuated::<Expr, Comma>::parse_terminated)?;
        for item in items {
            match &item {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(tag), ..
                }) => {
                    if parsed.tag.is_some() {
                        return Err(syn::Error::new(tag.span(), "duplicate tag"));
                    }
                    parsed.tag = Some(tag.clone());
                }
                Expr::Path(path) if path.path.is_ident("flatten") => {
                    if parsed.flatten {
                        return Err(syn::Error::new(path.span(), "duplicate `flatten`"));
                    }
                    parsed.flatten = true;
                }
                Expr::Path(path) if path.path.is_ident("skip") => {
                    if parsed.skip {
                        return Err(syn::Error::new(path.span(), "duplicate `skip`"));
                    }
                    parsed.skip = true;
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected a tag string, `flatten` or `skip`",
                    ));
                }
            }
        }
    }

    if parsed.skip && (parsed.flatten || parsed.tag.is_some()) {
        let message = "`skip` cannot be combined with a tag or `flatten`";
        return Err(match attrs.iter().find(|attr| attr.path().is_ident("sq")) {
            Some(attr) => syn::Error::new_spanned(attr, message),
            None => syn::Error::new(proc_macro2::Span::call_site(), message),
        });
    }

    Ok(parsed)
}
