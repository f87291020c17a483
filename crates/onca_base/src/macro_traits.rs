//! Contains traits implemented by the onca derive macros


/// Trait to get the number of elements in an enum
pub trait EnumCountT {
    /// Count or number of element in an enum
    const COUNT : usize;
}

/// Trait to parse an enum from the token it is written as in a data file.
pub trait EnumFromNameT: Sized {
    /// Try to parse the enum from a string slice.
    fn parse(s: &str) -> Option<Self>;
}

/// Trait exposing the full token to variant mapping of an enum.
/// 
/// Variants with aliases appear once per alias, the first entry of a variant is its canonical name.
pub trait EnumNameTableT: Sized + Copy + PartialEq + 'static {
    /// Every `(token, variant)` pair accepted by [`EnumFromNameT::parse`], in declaration order.
    const NAME_TABLE : &'static [(&'static str, Self)];

    /// Get the canonical token of a variant.
    fn name(self) -> &'static str {
        Self::NAME_TABLE.iter()
            .find(|(_, val)| *val == self)
            .map_or("", |(name, _)| *name)
    }
}
