//! Expansion of `#[derive(SymbolSchema)]`

use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr, Path, Type};

/// Field ceiling, kept equal to `entities_symbol_schema::MAX_FIELDS`. The
/// generated code also asserts against that constant.
const MAX_FIELDS: usize = 64;

struct SchemaField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    nested: bool,
}

/// Generate the `SymbolSchema` implementation for `input`
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let krate = crate_path(input)?;
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "symbol schemas cannot be generic",
        ));
    }

    let fields = schema_fields(input)?;
    if fields.len() > MAX_FIELDS {
        return Err(syn::Error::new(
            name.span(),
            format!(
                "symbol schema `{}` declares {} fields; at most {} are supported",
                name,
                fields.len(),
                MAX_FIELDS
            ),
        ));
    }

    let schema_name = name.unraw().to_string();

    let descriptors = fields.iter().map(|field| {
        let symbol = field.ident.unraw().to_string();
        let ty = field.ty;
        if field.nested {
            quote! {
                #krate::FieldDescriptor::nested(
                    #symbol,
                    ::core::stringify!(#ty),
                    <#ty as #krate::SymbolSchema>::DESCRIPTOR,
                )
            }
        } else {
            quote! {
                #krate::FieldDescriptor::slot(
                    #symbol,
                    ::core::stringify!(#ty),
                    <#ty as #krate::SymbolSlot>::KIND,
                )
            }
        }
    });

    let unbound = fields.iter().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        if field.nested {
            quote!(#ident: <#ty as #krate::SymbolSchema>::unbound())
        } else {
            quote!(#ident: <#ty as #krate::SymbolSlot>::NULL)
        }
    });

    let bound = fields.iter().enumerate().map(|(index, field)| {
        let ident = field.ident;
        let ty = field.ty;
        let index = Literal::usize_unsuffixed(index);
        if field.nested {
            quote! {
                #ident: {
                    #krate::SymbolResolver::enter(&mut *resolver, &fields[#index]);
                    let group = unsafe { <#ty as #krate::SymbolSchema>::bind(&mut *resolver) };
                    #krate::SymbolResolver::leave(&mut *resolver);
                    group
                }
            }
        } else {
            quote! {
                #ident: unsafe {
                    <#ty as #krate::SymbolSlot>::from_address(
                        #krate::SymbolResolver::resolve(&mut *resolver, &fields[#index]),
                    )
                }
            }
        }
    });

    let visits = fields.iter().enumerate().map(|(index, field)| {
        let ident = field.ident;
        let index = Literal::usize_unsuffixed(index);
        if field.nested {
            quote! {
                #krate::SlotVisitor::enter(&mut *visitor, &fields[#index]);
                #krate::SymbolSchema::visit_slots(&self.#ident, &mut *visitor);
                #krate::SlotVisitor::leave(&mut *visitor);
            }
        } else {
            quote! {
                #krate::SlotVisitor::slot(
                    &mut *visitor,
                    &fields[#index],
                    #krate::SymbolSlot::address(&self.#ident),
                );
            }
        }
    });

    Ok(quote! {
        impl #krate::SymbolSchema for #name {
            const NAME: &'static str = #schema_name;
            const FIELDS: &'static [#krate::FieldDescriptor] = &[#(#descriptors),*];

            fn unbound() -> Self {
                Self { #(#unbound),* }
            }

            #[allow(unused_unsafe, unused_variables)]
            unsafe fn bind<R: #krate::SymbolResolver + ?Sized>(resolver: &mut R) -> Self {
                let fields = <Self as #krate::SymbolSchema>::FIELDS;
                Self { #(#bound),* }
            }

            #[allow(unused_variables)]
            fn visit_slots<V: #krate::SlotVisitor + ?Sized>(&self, visitor: &mut V) {
                let fields = <Self as #krate::SymbolSchema>::FIELDS;
                #(#visits)*
            }
        }

        const _: () = ::core::assert!(
            <#name as #krate::SymbolSchema>::FIELDS.len() <= #krate::MAX_FIELDS,
            "symbol schema exceeds the supported field ceiling"
        );
    })
}

fn crate_path(input: &DeriveInput) -> syn::Result<Path> {
    let mut path: Path = syn::parse_quote!(::entities_symbol_schema);
    for attr in &input.attrs {
        if !attr.path().is_ident("symbol_schema") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                path = value.parse()?;
                Ok(())
            } else {
                Err(meta.error("unsupported symbol_schema attribute, expected `crate`"))
            }
        })?;
    }
    Ok(path)
}

fn schema_fields(input: &DeriveInput) -> syn::Result<Vec<SchemaField<'_>>> {
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "SymbolSchema can only be derived for structs",
            ))
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "SymbolSchema can only be derived for structs",
            ))
        }
    };

    match &data.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|field| {
                let ident = field
                    .ident
                    .as_ref()
                    .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
                Ok(SchemaField {
                    ident,
                    ty: &field.ty,
                    nested: is_nested(field)?,
                })
            })
            .collect(),
        Fields::Unit => Ok(Vec::new()),
        Fields::Unnamed(unnamed) => Err(syn::Error::new_spanned(
            unnamed,
            "symbol schema fields must be named",
        )),
    }
}

fn is_nested(field: &Field) -> syn::Result<bool> {
    let mut nested = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("symbol") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("nested") {
                nested = true;
                Ok(())
            } else {
                Err(meta.error("unsupported symbol attribute, expected `nested`"))
            }
        })?;
    }
    Ok(nested)
}
