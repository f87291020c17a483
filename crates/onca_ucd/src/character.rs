use crate::{
	BidirectionalClass, CanonicalCombiningClass, CharacterDecompositionMapping, CodePointRange,
	NumericType, UcdErrorKind, UnicodeCategory, UnicodeRationalNumber,
};

/// Properties of a single UnicodeData.txt record, which covers either one code point or a `First`/`Last` range.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CharacterRecord {
	pub range:                  CodePointRange,
	/// Character name, `None` for control characters and unnamed records
	pub name:                   Option<String>,
	pub category:               UnicodeCategory,
	pub combining_class:        CanonicalCombiningClass,
	pub bidi_class:             BidirectionalClass,
	pub decomposition:          Option<CharacterDecompositionMapping>,
	pub numeric_type:           Option<NumericType>,
	pub numeric_value:          Option<UnicodeRationalNumber>,
	pub bidi_mirrored:          bool,
	/// Unicode 1.0 name
	pub legacy_name:            Option<String>,
	pub simple_uppercase:       Option<char>,
	pub simple_lowercase:       Option<char>,
	pub simple_titlecase:       Option<char>,
}

/// Accumulates the fields of one record, [`build`](Self::build) checks that required fields were provided.
#[derive(Clone, Debug)]
pub struct CharacterRecordBuilder {
	pub range:            CodePointRange,
	pub name:             Option<String>,
	pub category:         UnicodeCategory,
	pub combining_class:  CanonicalCombiningClass,
	pub bidi_class:       Option<BidirectionalClass>,
	pub decomposition:    Option<CharacterDecompositionMapping>,
	pub numeric_type:     Option<NumericType>,
	pub numeric_value:    Option<UnicodeRationalNumber>,
	pub bidi_mirrored:    bool,
	pub legacy_name:      Option<String>,
	pub simple_uppercase: Option<char>,
	pub simple_lowercase: Option<char>,
	pub simple_titlecase: Option<char>,
}

impl CharacterRecordBuilder {
	pub fn new(range: CodePointRange) -> Self {
		Self {
			range,
			name: None,
			category: UnicodeCategory::Unassigned,
			combining_class: CanonicalCombiningClass::NOT_REORDERED,
			bidi_class: None,
			decomposition: None,
			numeric_type: None,
			numeric_value: None,
			bidi_mirrored: false,
			legacy_name: None,
			simple_uppercase: None,
			simple_lowercase: None,
			simple_titlecase: None,
		}
	}

	/// Apply the numeric fields 6 (decimal), 7 (digit) and 8 (numeric).
	/// 
	/// The numeric field decides the value, each extra field that is set has to match the previous one and upgrades the type: numeric -> digit -> decimal.
	/// Without a numeric field nothing is set, and the other fields are not checked.
	/// On failure, the name of the mismatching field is returned.
	pub fn set_numeric_fields(&mut self, decimal: Option<&str>, digit: Option<&str>, numeric: Option<&str>) -> Result<(), (UcdErrorKind, &'static str)> {
		let numeric = match numeric {
			Some(numeric) => numeric,
			None => return Ok(()),
		};

		let value = UnicodeRationalNumber::parse(numeric)
			.ok_or_else(|| (UcdErrorKind::MalformedRecord(format!("invalid numeric value '{numeric}'")), "numeric value"))?;

		let numeric_type = match digit {
			Some(digit) => {
				if digit != numeric {
					return Err((UcdErrorKind::InconsistentNumericFields, "digit value"));
				}
				match decimal {
					Some(decimal) if decimal != digit => return Err((UcdErrorKind::InconsistentNumericFields, "decimal digit value")),
					Some(_) => NumericType::Decimal,
					None => NumericType::Digit,
				}
			},
			None => NumericType::Numeric,
		};

		self.numeric_value = Some(value);
		self.numeric_type = Some(numeric_type);
		Ok(())
	}

	pub fn build(self) -> Result<CharacterRecord, UcdErrorKind> {
		let bidi_class = self.bidi_class.ok_or(UcdErrorKind::MissingRequiredField)?;
		Ok(CharacterRecord {
			range: self.range,
			name: self.name,
			category: self.category,
			combining_class: self.combining_class,
			bidi_class,
			decomposition: self.decomposition,
			numeric_type: self.numeric_type,
			numeric_value: self.numeric_value,
			bidi_mirrored: self.bidi_mirrored,
			legacy_name: self.legacy_name,
			simple_uppercase: self.simple_uppercase,
			simple_lowercase: self.simple_lowercase,
			simple_titlecase: self.simple_titlecase,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn builder() -> CharacterRecordBuilder {
		CharacterRecordBuilder::new(CodePointRange::single(0x30).unwrap())
	}

	#[test]
	fn numeric_precedence() {
		let mut decimal = builder();
		decimal.set_numeric_fields(Some("0"), Some("0"), Some("0")).unwrap();
		assert_eq!(decimal.numeric_type, Some(NumericType::Decimal));
		assert_eq!(decimal.numeric_value, UnicodeRationalNumber::parse("0"));

		let mut digit = builder();
		digit.set_numeric_fields(None, Some("2"), Some("2")).unwrap();
		assert_eq!(digit.numeric_type, Some(NumericType::Digit));

		let mut numeric = builder();
		numeric.set_numeric_fields(None, None, Some("1/4")).unwrap();
		assert_eq!(numeric.numeric_type, Some(NumericType::Numeric));
		assert_eq!(numeric.numeric_value, Some(UnicodeRationalNumber { numerator: 1, denominator: 4 }));
	}

	#[test]
	fn numeric_mismatches() {
		let (kind, field) = builder().set_numeric_fields(None, Some("5"), Some("6")).unwrap_err();
		assert!(matches!(kind, UcdErrorKind::InconsistentNumericFields));
		assert_eq!(field, "digit value");

		let (kind, field) = builder().set_numeric_fields(Some("4"), Some("5"), Some("5")).unwrap_err();
		assert!(matches!(kind, UcdErrorKind::InconsistentNumericFields));
		assert_eq!(field, "decimal digit value");
	}

	#[test]
	fn numeric_without_numeric_field_is_unchecked() {
		let mut record = builder();
		record.set_numeric_fields(Some("1"), Some("2"), None).unwrap();
		assert_eq!(record.numeric_type, None);
		assert_eq!(record.numeric_value, None);
	}

	#[test]
	fn build_requires_bidi_class() {
		assert!(matches!(builder().build(), Err(UcdErrorKind::MissingRequiredField)));

		let mut record = builder();
		record.bidi_class = Some(BidirectionalClass::EuropeanNumber);
		assert_eq!(record.build().unwrap().bidi_class, BidirectionalClass::EuropeanNumber);
	}
}
