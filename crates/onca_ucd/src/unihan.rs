use onca_common_macros::{EnumCount, EnumFromName};

/// Unihan property tokens handled by the builder, every other token is either skipped or rejected depending on the file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumFromName, EnumCount)]
pub enum UnihanProperty {
	#[parse_name("kDefinition")]
	Definition,
	#[parse_name("kMandarin")]
	Mandarin,
	#[parse_name("kCantonese")]
	Cantonese,
	#[parse_name("kJapaneseKun")]
	JapaneseKun,
	#[parse_name("kJapaneseOn")]
	JapaneseOn,
	#[parse_name("kKorean")]
	Korean,
	#[parse_name("kHangul")]
	Hangul,
	#[parse_name("kVietnamese")]
	Vietnamese,
	#[parse_name("kSimplifiedVariant")]
	SimplifiedVariant,
	#[parse_name("kTraditionalVariant")]
	TraditionalVariant,
	#[parse_name("kAccountingNumeric")]
	AccountingNumeric,
	#[parse_name("kOtherNumeric")]
	OtherNumeric,
	#[parse_name("kPrimaryNumeric")]
	PrimaryNumeric,
}

impl UnihanProperty {
	/// Properties read from Unihan_Readings.txt
	pub const fn is_reading(self) -> bool {
		matches!(self,
			UnihanProperty::Definition |
			UnihanProperty::Mandarin |
			UnihanProperty::Cantonese |
			UnihanProperty::JapaneseKun |
			UnihanProperty::JapaneseOn |
			UnihanProperty::Korean |
			UnihanProperty::Hangul |
			UnihanProperty::Vietnamese
		)
	}

	/// Properties read from Unihan_Variants.txt
	pub const fn is_variant(self) -> bool {
		matches!(self, UnihanProperty::SimplifiedVariant | UnihanProperty::TraditionalVariant)
	}

	/// Numeric classification for properties read from Unihan_NumericValues.txt
	pub const fn numeric_type(self) -> Option<UnihanNumericType> {
		match self {
			UnihanProperty::AccountingNumeric => Some(UnihanNumericType::Accounting),
			UnihanProperty::OtherNumeric      => Some(UnihanNumericType::Other),
			UnihanProperty::PrimaryNumeric    => Some(UnihanNumericType::Primary),
			_                                 => None,
		}
	}
}

/// Kind of numeric value an ideograph is used for
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnihanNumericType {
	/// Used in accounting, to avoid fraud through alteration of the written number.
	Accounting,
	/// Rare or regional usage.
	Other,
	/// Standard value.
	Primary,
}

/// CJK data for a single code point.
/// 
/// Entries only exist for code points with at least one handled Unihan property.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UnihanEntry {
	pub code_point:            u32,
	pub definition:            Option<String>,
	pub mandarin_reading:      Option<String>,
	pub cantonese_reading:     Option<String>,
	pub japanese_kun_reading:  Option<String>,
	pub japanese_on_reading:   Option<String>,
	pub korean_reading:        Option<String>,
	pub hangul_reading:        Option<String>,
	pub vietnamese_reading:    Option<String>,
	pub simplified_variant:    Option<char>,
	pub traditional_variant:   Option<char>,
	pub numeric_type:          Option<UnihanNumericType>,
	pub numeric_value:         Option<i64>,
}

impl UnihanEntry {
	pub fn new(code_point: u32) -> Self {
		Self {
			code_point,
			definition: None,
			mandarin_reading: None,
			cantonese_reading: None,
			japanese_kun_reading: None,
			japanese_on_reading: None,
			korean_reading: None,
			hangul_reading: None,
			vietnamese_reading: None,
			simplified_variant: None,
			traditional_variant: None,
			numeric_type: None,
			numeric_value: None,
		}
	}

	/// Store a reading, returns `false` if `property` is not a reading.
	pub fn set_reading(&mut self, property: UnihanProperty, value: &str) -> bool {
		let slot = match property {
			UnihanProperty::Definition  => &mut self.definition,
			UnihanProperty::Mandarin    => &mut self.mandarin_reading,
			UnihanProperty::Cantonese   => &mut self.cantonese_reading,
			UnihanProperty::JapaneseKun => &mut self.japanese_kun_reading,
			UnihanProperty::JapaneseOn  => &mut self.japanese_on_reading,
			UnihanProperty::Korean      => &mut self.korean_reading,
			UnihanProperty::Hangul      => &mut self.hangul_reading,
			UnihanProperty::Vietnamese  => &mut self.vietnamese_reading,
			_ => return false,
		};
		*slot = Some(value.to_string());
		true
	}

	/// Get a reading, `None` if it isn't set or `property` is not a reading.
	pub fn reading(&self, property: UnihanProperty) -> Option<&str> {
		match property {
			UnihanProperty::Definition  => self.definition.as_deref(),
			UnihanProperty::Mandarin    => self.mandarin_reading.as_deref(),
			UnihanProperty::Cantonese   => self.cantonese_reading.as_deref(),
			UnihanProperty::JapaneseKun => self.japanese_kun_reading.as_deref(),
			UnihanProperty::JapaneseOn  => self.japanese_on_reading.as_deref(),
			UnihanProperty::Korean      => self.korean_reading.as_deref(),
			UnihanProperty::Hangul      => self.hangul_reading.as_deref(),
			UnihanProperty::Vietnamese  => self.vietnamese_reading.as_deref(),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn readings_are_routed_to_their_field() {
		let mut entry = UnihanEntry::new(0x3400);
		assert!(entry.set_reading(UnihanProperty::Mandarin, "qiū"));
		assert!(entry.set_reading(UnihanProperty::Hangul, "구:0E"));
		assert!(!entry.set_reading(UnihanProperty::SimplifiedVariant, "U+4E07"));

		assert_eq!(entry.mandarin_reading.as_deref(), Some("qiū"));
		assert_eq!(entry.reading(UnihanProperty::Hangul), Some("구:0E"));
		assert_eq!(entry.reading(UnihanProperty::Definition), None);
		assert_eq!(entry.simplified_variant, None);
	}

	#[test]
	fn property_groups() {
		assert!(UnihanProperty::Vietnamese.is_reading());
		assert!(!UnihanProperty::Vietnamese.is_variant());
		assert!(UnihanProperty::TraditionalVariant.is_variant());
		assert_eq!(UnihanProperty::OtherNumeric.numeric_type(), Some(UnihanNumericType::Other));
		assert_eq!(UnihanProperty::Definition.numeric_type(), None);
	}
}
