use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemStruct, LitStr};

use crate::schema_extraction::{
    collect_doc_comments, collect_field_docs, ensure_named_struct, parse_schema_args,
};

pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match parse_schema_args(attr) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let item_struct = parse_macro_input!(item as ItemStruct);

    if let Err(err) = ensure_named_struct(&item_struct) {
        return err.to_compile_error().into();
    }

    if !item_struct.generics.params.is_empty() {
        return syn::Error::new(
            item_struct.generics.span(),
            "`#[completion_schema]` cannot be applied to generic payloads",
        )
        .to_compile_error()
        .into();
    }

    let ident = &item_struct.ident;
    let schema_name = args
        .name
        .unwrap_or_else(|| LitStr::new(&ident.to_string(), Span::call_site()));
    let description = args.description.or_else(|| {
        collect_doc_comments(&item_struct.attrs)
            .map(|text| LitStr::new(&text, Span::call_site()))
    });
    let description_tokens = match description {
        Some(lit) => quote! { Some(#lit) },
        None => quote! { None },
    };

    let field_doc_tokens = collect_field_docs(&item_struct)
        .into_iter()
        .map(|(field, doc)| {
            let field_lit = LitStr::new(&field, Span::call_site());
            let doc_lit = LitStr::new(&doc, Span::call_site());
            quote! { (#field_lit, #doc_lit) }
        })
        .collect::<Vec<_>>();

    let type_name = LitStr::new(&ident.to_string(), Span::call_site());

    let expanded = quote! {
        #item_struct

        impl trip_planner::schema::CompletionSchema for #ident {
            fn schema() -> &'static trip_planner::schema::SchemaHandle {
                static HANDLE: std::sync::OnceLock<trip_planner::schema::SchemaHandle> =
                    std::sync::OnceLock::new();
                HANDLE.get_or_init(|| {
                    let mut root = schemars::gen::SchemaSettings::draft07()
                        .with(|settings| settings.inline_subschemas = true)
                        .into_generator()
                        .into_root_schema_for::<Self>();
                    trip_planner::schema::apply_doc_comments(
                        &mut root,
                        #schema_name,
                        #description_tokens,
                        &[#(#field_doc_tokens),*],
                    );
                    trip_planner::schema::SchemaHandle::from_root_schema::<Self>(
                        #schema_name,
                        #type_name,
                        root,
                    )
                })
            }
        }
    };

    expanded.into()
}
