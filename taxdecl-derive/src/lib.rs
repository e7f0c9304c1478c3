use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, LitStr, Meta, Type};

/// Derive macro that generates form field metadata from struct fields.
///
/// For each field, extracts:
/// - Field name (respects #[serde(rename = "...")])
/// - Label (from #[field(label = "...")], otherwise the title-cased name)
/// - Required (true if not Option<T>)
/// - Read-only (true if marked #[field(read_only)])
/// - Description (from doc comments)
///
/// Generates a `field_schema() -> &'static [FieldSpec]` method.
#[proc_macro_derive(FieldSchema, attributes(serde, field))]
pub fn derive_field_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "FieldSchema only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "FieldSchema only supports structs",
            ))
        }
    };

    let mut entries = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = ident.to_string();
        let attrs = get_field_attrs(&field.attrs)?;

        let label = attrs.label.unwrap_or_else(|| title_case(&field_name));
        let name = get_serde_rename(&field.attrs).unwrap_or(field_name);
        let required = !is_option_type(&field.ty);
        let read_only = attrs.read_only;
        let description = get_doc_comment(&field.attrs);

        entries.push(quote! {
            FieldSpec {
                name: #name,
                label: #label,
                required: #required,
                read_only: #read_only,
                description: #description,
            }
        });
    }

    Ok(quote! {
        impl #name {
            pub fn field_schema() -> &'static [FieldSpec] {
                static SCHEMA: &[FieldSpec] = &[
                    #(#entries),*
                ];
                SCHEMA
            }
        }
    })
}

#[derive(Default)]
struct FieldAttrs {
    label: Option<String>,
    read_only: bool,
}

fn get_field_attrs(attrs: &[syn::Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("field") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("read_only") {
                out.read_only = true;
                Ok(())
            } else if meta.path.is_ident("label") {
                let label: LitStr = meta.value()?.parse()?;
                out.label = Some(label.value());
                Ok(())
            } else {
                Err(meta.error("expected `label = \"...\"` or `read_only`"))
            }
        })?;
    }
    Ok(out)
}

fn get_serde_rename(attrs: &[syn::Attribute]) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        if let Meta::List(meta_list) = &attr.meta {
            let tokens = meta_list.tokens.to_string();
            // rename_all never appears on fields, so a plain prefix match is enough
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

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
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
