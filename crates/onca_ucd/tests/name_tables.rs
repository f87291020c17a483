use onca_base::{EnumCountT, EnumFromNameT, EnumNameTableT};
use onca_ucd::*;

fn check_table<T>()
where
	T: EnumFromNameT + EnumNameTableT + EnumCountT + core::fmt::Debug,
{
	let table = T::NAME_TABLE;

	let mut variants = Vec::new();
	for (idx, (name, value)) in table.iter().enumerate() {
		assert_eq!(T::parse(name), Some(*value), "'{name}' does not parse to {value:?}");
		assert!(table[..idx].iter().all(|(other, _)| other != name), "'{name}' maps to more than one variant");
		if !variants.contains(value) {
			variants.push(*value);
		}
	}
	assert_eq!(variants.len(), T::COUNT, "not every variant of {} has a name", core::any::type_name::<T>());

	for value in variants {
		assert_eq!(T::parse(value.name()), Some(value));
	}
	assert_eq!(T::parse("not a name"), None);
}

#[test]
fn unicode_category_table() {
	check_table::<UnicodeCategory>();
	assert_eq!(UnicodeCategory::parse("Lu"), Some(UnicodeCategory::UppercaseLetter));
	assert_eq!(UnicodeCategory::Unassigned.name(), "Cn");
}

#[test]
fn bidirectional_class_table() {
	check_table::<BidirectionalClass>();
	assert_eq!(BidirectionalClass::parse("L"), Some(BidirectionalClass::LeftToRight));
	assert_eq!(BidirectionalClass::parse("l"), None);
}

#[test]
fn contributory_property_table() {
	check_table::<ContributoryProperty>();
	assert_eq!(ContributoryProperty::parse("STerm"), Some(ContributoryProperty::SentenceTerminal));
	assert_eq!(ContributoryProperty::parse("Sentence_Terminal"), Some(ContributoryProperty::SentenceTerminal));
	assert_eq!(ContributoryProperty::SentenceTerminal.name(), "Sentence_Terminal");
}

#[test]
fn core_property_table() {
	check_table::<CoreProperty>();
	assert_eq!(CoreProperty::parse("Math"), Some(CoreProperty::Math));
	assert_eq!(CoreProperty::parse("Grapheme_Link"), Some(CoreProperty::GraphemeLink));
}

#[test]
fn decomposition_tag_table() {
	check_table::<DecompositionTag>();
	assert_eq!(DecompositionTag::parse(""), Some(DecompositionTag::Canonical));
	assert_eq!(DecompositionTag::parse("<noBreak>"), Some(DecompositionTag::NoBreak));
	assert_eq!(DecompositionTag::COUNT, 17);
}

#[test]
fn unihan_property_table() {
	check_table::<UnihanProperty>();
	assert_eq!(UnihanProperty::parse("kDefinition"), Some(UnihanProperty::Definition));
	assert_eq!(UnihanProperty::parse("kOtherNumericXYZ"), None);
}
