/// Derive macro generating an implementation of the trait `Bounded`.
///
/// The struct must have a field named `bounding_box` (or `aabb`) whose type implements `Bounded`,
/// typically an `Aabb`.
#[proc_macro_derive(Bounded)]
pub fn bounded_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = syn::parse(input);

    impl_bounded(ast).unwrap_or_else(|e| syn::Error::to_compile_error(&e).into())
}

fn impl_bounded(input: syn::Result<syn::DeriveInput>) -> syn::Result<proc_macro::TokenStream> {
    let mut input = input?;

    let (field, bty) = get_bounding_field(&input.data)?;

    input
        .generics
        .make_where_clause()
        .predicates
        .push(syn::parse_quote! {
            #bty: loose_octree::Bounded
        });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote::quote! {
        impl #impl_generics loose_octree::Bounded for #name #ty_generics #where_clause {
            type Vector = <#bty as loose_octree::Bounded>::Vector;

            #[inline]
            fn bounding_box(&self) -> loose_octree::Aabb<Self::Vector> {
                loose_octree::Bounded::bounding_box(&self.#field)
            }
        }
    }
    .into())
}

fn get_bounding_field(data: &syn::Data) -> syn::Result<(syn::Ident, syn::Type)> {
    match data {
        syn::Data::Struct(struct_data) => get_field(struct_data, "bounding_box")
            .or_else(|| get_field(struct_data, "aabb"))
            .ok_or_else(|| {
                syn::Error::new_spanned(&struct_data.fields, "no `bounding_box` or `aabb` field")
            }),
        syn::Data::Enum(enum_data) => Err(syn::Error::new_spanned(
            enum_data.enum_token,
            "the `Bounded` trait can only be derived for struct types",
        )),
        syn::Data::Union(union_data) => Err(syn::Error::new_spanned(
            union_data.union_token,
            "the `Bounded` trait can only be derived for struct types",
        )),
    }
}

fn get_field(struct_data: &syn::DataStruct, field_name: &str) -> Option<(syn::Ident, syn::Type)> {
    struct_data.fields.iter().find_map(|field| {
        let ident = field.ident.as_ref()?;
        (ident == field_name).then(|| (ident.clone(), field.ty.clone()))
    })
}
