use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Visibility};

/// Derive macro implementing `serde_flatmap::Record`.
///
/// Every `pub` field takes part, in declaration order. Other fields are
/// invisible to marshalling and keep their values. Tags are attached per
/// group with `#[tag(...)]`:
///
/// ```ignore
/// #[derive(Record, Default)]
/// pub struct Header {
///     #[tag(fixed = "padleft=0,len=6", csv = "quoted")]
///     pub batch: u32,
///
///     #[tag(fixed = "padright,start=7,end=26")]
///     pub sender: String,
/// }
/// ```
///
/// Field types must implement `Serialize` and `DeserializeOwned`. When a
/// field repeats a group, the first tag wins.
#[proc_macro_derive(Record, attributes(tag))]
pub fn derive_record(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ));
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Record only supports structs")),
    };

    let option = quote!(::core::option::Option);
    let slot = quote!(::serde_flatmap::Slot);

    let mut defs = Vec::new();
    let mut getters = Vec::new();
    let mut setters = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;

        // Parse #[tag(group = "...")], hidden fields included.
        let mut annotations = Vec::new();
        for attr in &field.attrs {
            if !attr.path().is_ident("tag") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let group = meta
                    .path
                    .get_ident()
                    .ok_or_else(|| meta.error("expected a tag group name"))?
                    .unraw()
                    .to_string();
                let value: LitStr = meta.value()?.parse()?;
                annotations.push((group, value.value()));
                Ok(())
            })?;
        }

        if !matches!(field.vis, Visibility::Public(_)) {
            continue;
        }

        let field_name_str = field_name.unraw().to_string();
        let field_ty = &field.ty;
        let groups = annotations.iter().map(|(group, _)| group);
        let tags = annotations.iter().map(|(_, tag)| tag);

        defs.push(quote! {
            ::serde_flatmap::FieldDef {
                name: #field_name_str,
                kind: <#field_ty as ::serde_flatmap::Scalar>::kind,
                annotations: &[#((#groups, #tags)),*],
            }
        });
        getters.push(quote! {
            #field_name_str => #option::Some(&self.#field_name as &dyn #slot),
        });
        setters.push(quote! {
            #field_name_str => #option::Some(&mut self.#field_name as &mut dyn #slot),
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::serde_flatmap::Record for #name #ty_generics #where_clause {
            const NAME: &'static str = #name_str;
            const FIELDS: &'static [::serde_flatmap::FieldDef] = &[#(#defs),*];

            fn field(&self, name: &str) -> #option<&dyn #slot> {
                match name {
                    #(#getters)*
                    _ => #option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #option<&mut dyn #slot> {
                match name {
                    #(#setters)*
                    _ => #option::None,
                }
            }
        }
    };

    Ok(expanded)
}
