use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, Lit, Meta, PathArguments, Type};

/// Derive macro that generates a form field catalog from struct fields.
///
/// For each named field, extracts:
/// - Wire name (respects #[serde(rename = "...")])
/// - Required (true if not Option<T>)
/// - Kind, classified from the Rust type: Decimal -> Amount,
///   unsigned integer -> Count, bool -> Flag, anything else -> Text
/// - Description (from doc comments)
///
/// Generates a `form_schema() -> &'static [FormField]` method. The caller
/// must have `FormField` and `FieldKind` in scope.
#[proc_macro_derive(FormSchema, attributes(serde))]
pub fn derive_form_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => panic!("FormSchema only supports structs with named fields"),
        },
        _ => panic!("FormSchema only supports structs"),
    };

    let field_entries = fields.iter().map(|field| {
        let field_name = field.ident.as_ref().unwrap().to_string();
        let wire_name = get_serde_rename(&field.attrs).unwrap_or(field_name);
        let is_optional = is_option_type(&field.ty);
        let kind = classify_kind(&field.ty);
        let required = !is_optional;
        let doc = get_doc_comment(&field.attrs);

        quote! {
            FormField {
                name: #wire_name,
                kind: #kind,
                required: #required,
                description: #doc,
            }
        }
    });

    let expanded = quote! {
        impl #name {
            pub fn form_schema() -> &'static [FormField] {
                static SCHEMA: &[FormField] = &[
                    #(#field_entries),*
                ];
                SCHEMA
            }
        }
    };

    TokenStream::from(expanded)
}

/// Map a field type to a FieldKind variant, looking through Option<T>.
fn classify_kind(ty: &Type) -> proc_macro2::TokenStream {
    let inner = unwrap_option(ty).unwrap_or(ty);
    let ident = match inner {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    };
    match ident.as_deref() {
        Some("Decimal") => quote! { FieldKind::Amount },
        Some("u8") | Some("u16") | Some("u32") | Some("u64") | Some("usize") => {
            quote! { FieldKind::Count }
        }
        Some("bool") => quote! { FieldKind::Flag },
        _ => quote! { FieldKind::Text },
    }
}

/// For Option<T>, return T.
fn unwrap_option(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn get_serde_rename(attrs: &[syn::Attribute]) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        if let Meta::List(meta_list) = &attr.meta {
            let tokens = meta_list.tokens.to_string();
            // Simple parsing: look for rename = "..."
            if let Some(start) = tokens.find("rename") {
                let rest = &tokens[start..];
                if let Some(eq_pos) = rest.find('=') {
                    let after_eq = rest[eq_pos + 1..].trim();
                    if let Some(stripped) = after_eq.strip_prefix('"') {
                        if let Some(end_quote) = stripped.find('"') {
                            return Some(stripped[..end_quote].to_string());
                        }
                    }
                }
            }
        }
    }
    None
}

fn get_doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value().trim().to_string());
                    }
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}
