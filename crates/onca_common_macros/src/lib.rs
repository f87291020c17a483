mod derive;

use proc_macro::TokenStream;

#[proc_macro_derive(EnumCount)]
pub fn enum_count(item: TokenStream) -> TokenStream {
    derive::enum_count(item.into()).into()
}

/// Derive `onca_base::EnumFromNameT` and `onca_base::EnumNameTableT`.
/// 
/// Each variant is parsed from its identifier, unless it has one or more `#[parse_name("...")]` attributes,
/// in which case every listed token maps to the variant and the first one is its canonical name.
#[proc_macro_derive(EnumFromName, attributes(parse_name))]
pub fn enum_from_name(item: TokenStream) -> TokenStream {
    derive::enum_from_name(item.into()).into()
}
