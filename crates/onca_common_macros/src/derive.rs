use std::collections::HashSet;

use proc_macro2::*;
use quote::quote;
use syn::*;

pub fn enum_count(item: TokenStream) -> TokenStream {
	let parsed_res = syn::parse2::<DeriveInput>(item);
	let input_parsed = match parsed_res {
	    Ok(derived_input) => derived_input,
	    Err(err) => return err.to_compile_error().into(),
	};

    let body_data = match input_parsed.data {
		Data::Enum(body) => body,
		_ => return quote!( compile_error!("Not an enum"); )
	};

    let ident = input_parsed.ident;
    let count = body_data.variants.len();

    quote!{
        impl onca_base::EnumCountT for #ident {
            const COUNT: usize = #count;
        }
    }
}

/// Collect the `parse_name` tokens of a variant, falling back to the variant's identifier.
fn variant_names(variant: &Variant) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for attr in &variant.attrs {
        if attr.path().get_ident().map_or(false, |ident| ident == "parse_name") {
            let lit = attr.parse_args::<LitStr>()?;
            names.push(lit.value());
        }
    }

    if names.is_empty() {
        names.push(variant.ident.to_string());
    }
    Ok(names)
}

pub fn enum_from_name(item: TokenStream) -> TokenStream {
    let parsed_res = syn::parse2::<DeriveInput>(item);
	let input_parsed = match parsed_res {
	    Ok(derived_input) => derived_input,
	    Err(err) => return err.to_compile_error().into(),
	};

    let body_data = match input_parsed.data {
		Data::Enum(body) => body,
		_ => return quote!( compile_error!("Not an enum"); )
	};

    let ident = input_parsed.ident;

    let mut members = Vec::with_capacity(body_data.variants.len());
    let mut names = Vec::with_capacity(body_data.variants.len());
    let mut seen = HashSet::new();

    for variant in &body_data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Error::new_spanned(variant, "EnumFromName only supports unit variants").to_compile_error();
        }

        let variant_names = match variant_names(variant) {
            Ok(names) => names,
            Err(err) => return err.to_compile_error(),
        };

        for name in variant_names {
            if !seen.insert(name.clone()) {
                let msg = format!("Duplicate parse name '{name}'");
                return Error::new_spanned(variant, msg).to_compile_error();
            }
            members.push(variant.ident.clone());
            names.push(name);
        }
    }

    quote!{
        impl onca_base::EnumFromNameT for #ident {
            fn parse(s: &str) -> Option<Self> {
                match s {
                    #(#names => Some(Self::#members),)*
                    _ => None,
                }
            }
        }

        impl onca_base::EnumNameTableT for #ident {
            const NAME_TABLE: &'static [(&'static str, Self)] = &[
                #((#names, Self::#members),)*
            ];
        }
    }
}
