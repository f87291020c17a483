//! Property values that appear in the UCD text files.
//! 
//! Every enumerated property derives `EnumFromName`, which gives both a `parse` function and an explicit `NAME_TABLE` mapping data file tokens to variants.

use core::fmt;

use onca_base::{EnumFromNameT, EnumNameTableT};
use onca_common_macros::{EnumCount, EnumFromName};

use crate::code_point::parse_code_point;

/// General category
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumFromName, EnumCount)]
pub enum UnicodeCategory {
	/// Lu: An upper case letter.
	#[parse_name("Lu")]
	UppercaseLetter,
	/// Ll: A lowercase letter.
	#[parse_name("Ll")]
	LowercaseLetter,
	/// Lt: A digraph encoded as a single character, with first part uppercase.
	#[parse_name("Lt")]
	TitlecaseLetter,
	/// Lm: A modifier letter.
	#[parse_name("Lm")]
	ModifierLetter,
	/// Lo: Other Letters, including syllables and ideographs.
	#[parse_name("Lo")]
	OtherLetter,
	/// Mn: A nonspacing combining mark (zero advance width).
	#[parse_name("Mn")]
	NonspacingMark,
	/// Mc: A spacing combining mark (positive advance width).
	#[parse_name("Mc")]
	SpacingMark,
	/// Me: An enclosing combining mark.
	#[parse_name("Me")]
	EnclosingMark,
	/// Nd: A decimal digit.
	#[parse_name("Nd")]
	DecimalNumber,
	/// Nl: A letterlike numeric character.
	#[parse_name("Nl")]
	LetterNumber,
	/// No: A numeric character of other type.
	#[parse_name("No")]
	OtherNumber,
	/// Pc: A connecting punctuation mark, like a tie.
	#[parse_name("Pc")]
	ConnectorPunctuation,
	/// Pd: A dash or hyphen punctuation mark.
	#[parse_name("Pd")]
	DashPunctuation,
	/// Ps: An opening punctuation mark (of a pair).
	#[parse_name("Ps")]
	OpenPunctuation,
	/// Pe: A closing punctuation mark (of a pair).
	#[parse_name("Pe")]
	ClosePunctuation,
	/// Pi: An initial quotation mark.
	#[parse_name("Pi")]
	InitialPunctuation,
	/// Pf: A final quotation mark.
	#[parse_name("Pf")]
	FinalPunctuation,
	/// Po: A punctuation mark of other type.
	#[parse_name("Po")]
	OtherPunctuation,
	/// Sm: A symbol of mathematical use.
	#[parse_name("Sm")]
	MathSymbol,
	/// Sc: A currency sign.
	#[parse_name("Sc")]
	CurrencySymbol,
	/// Sk: A non-letterlike modifier symbol.
	#[parse_name("Sk")]
	ModifierSymbol,
	/// So: A symbol of other type.
	#[parse_name("So")]
	OtherSymbol,
	/// Zs: A space character (of various non-zero widths).
	#[parse_name("Zs")]
	SpaceSeparator,
	/// Zl: U+2028 LINE SEPARATOR only.
	#[parse_name("Zl")]
	LineSeparator,
	/// Zp: U+2029 PARAGRAPH SEPARATOR only.
	#[parse_name("Zp")]
	ParagraphSeparator,
	/// Cc: A C0 or C1 control code.
	#[parse_name("Cc")]
	Control,
	/// Cf: A format control character.
	#[parse_name("Cf")]
	Format,
	/// Cs: A surrogate code point.
	#[parse_name("Cs")]
	Surrogate,
	/// Co: A private-use character.
	#[parse_name("Co")]
	PrivateUse,
	/// Cn: A reserved unassigned code point or a noncharacter.
	#[parse_name("Cn")]
	Unassigned,
}

/// Canonical combining class, stored as its raw value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct CanonicalCombiningClass(pub u8);

impl CanonicalCombiningClass {
	/// Spacing and enclosing marks, also many vowel and consonant signs, even if nonspacing.
	pub const NOT_REORDERED: Self = Self(0);
	/// Marks which overlay a base letter or symbol.
	pub const OVERLAY:       Self = Self(1);
	/// Diacritic nukta marks in Brahmi-derived scripts.
	pub const NUKTA:         Self = Self(7);
	/// Hiragana/Katakana voicing marks.
	pub const KANA_VOICING:  Self = Self(8);
	/// Viramas.
	pub const VIRAMA:        Self = Self(9);
	/// Marks attached directly below.
	pub const ATTACHED_BELOW: Self = Self(202);
	/// Marks attached directly above.
	pub const ATTACHED_ABOVE: Self = Self(214);
	/// Distinct marks directly below.
	pub const BELOW:         Self = Self(220);
	/// Distinct marks directly above.
	pub const ABOVE:         Self = Self(230);
	/// Greek iota subscript only.
	pub const IOTA_SUBSCRIPT: Self = Self(240);
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumFromName, EnumCount)]
pub enum BidirectionalClass {
	/// Any strong left-to-right characters (Strong type).
	#[parse_name("L")]
	LeftToRight,
	/// Any strong right-to-left (non-Arabic type) character (Strong type).
	#[parse_name("R")]
	RightToLeft,
	/// Any strong right-to-left (Arabic type) character (Strong type).
	#[parse_name("AL")]
	ArabicLetter,
	/// Any ASCII digit or Eastern Arabic-Indic digit (Weak type).
	#[parse_name("EN")]
	EuropeanNumber,
	/// Plus and minus signs (Weak type).
	#[parse_name("ES")]
	EuropeanSeparator,
	/// A terminator in a numeric format context, includes currency signs (Weak type).
	#[parse_name("ET")]
	EuropeanTerminator,
	/// Any Arabic-Indic digit (Weak type).
	#[parse_name("AN")]
	ArabicNumber,
	/// Commas, colons, and slashes (Weak type).
	#[parse_name("CS")]
	CommonSeparator,
	/// Any nonspacing mark (Weak type).
	#[parse_name("NSM")]
	NonspacingMark,
	/// Most format characters, control codes, or noncharacters (Weak type).
	#[parse_name("BN")]
	BoundaryNeutral,
	/// Various newline characters (Neutral type).
	#[parse_name("B")]
	ParagraphSeparator,
	/// Various segment-related (Neutral type).
	#[parse_name("S")]
	SegmentSeparator,
	/// Spaces (Neutral type).
	#[parse_name("WS")]
	WhiteSpace,
	/// Most other symbols and punctuation marks (Neutral type).
	#[parse_name("ON")]
	OtherNeutral,
	/// U+202A: the LR embedding control (Explicit formatting types).
	#[parse_name("LRE")]
	LeftToRightEmbedding,
	/// U+202D: The LR override control (Explicit formatting types).
	#[parse_name("LRO")]
	LeftToRightOverride,
	/// U+202B: The RL embedding control (Explicit formatting types).
	#[parse_name("RLE")]
	RightToLeftEmbedding,
	/// U+202E: The RL override control (Explicit formatting types).
	#[parse_name("RLO")]
	RightToLeftOverride,
	/// U+202C: Terminates an embedding or override control (Explicit formatting types).
	#[parse_name("PDF")]
	PopDirectionalFormat,
	/// U+2066: The LR isolate control (Explicit formatting types).
	#[parse_name("LRI")]
	LeftToRightIsolate,
	/// U+2067: The RL isolate control (Explicit formatting types).
	#[parse_name("RLI")]
	RightToLeftIsolate,
	/// U+2068: The first strong isolate control (Explicit formatting types).
	#[parse_name("FSI")]
	FirstStrongIsolate,
	/// U+2069: Terminates an isolate control (Explicit formatting types).
	#[parse_name("PDI")]
	PopDirectionalIsolate,
}

/// Boolean properties listed in PropList.txt
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumFromName, EnumCount)]
pub enum ContributoryProperty {
	#[parse_name("White_Space")]
	WhiteSpace,
	#[parse_name("Bidi_Control")]
	BidiControl,
	#[parse_name("Join_Control")]
	JoinControl,
	Dash,
	/// Deprecated since Unicode 6.0.0, still listed in PropList.txt.
	Hyphen,
	#[parse_name("Quotation_Mark")]
	QuotationMark,
	#[parse_name("Terminal_Punctuation")]
	TerminalPunctuation,
	#[parse_name("Other_Math")]
	OtherMath,
	#[parse_name("Hex_Digit")]
	HexDigit,
	#[parse_name("ASCII_Hex_Digit")]
	AsciiHexDigit,
	#[parse_name("Other_Alphabetic")]
	OtherAlphabetic,
	Ideographic,
	Diacritic,
	Extender,
	#[parse_name("Other_Lowercase")]
	OtherLowercase,
	#[parse_name("Other_Uppercase")]
	OtherUppercase,
	#[parse_name("Noncharacter_Code_Point")]
	NoncharacterCodePoint,
	#[parse_name("Other_Grapheme_Extend")]
	OtherGraphemeExtend,
	#[parse_name("IDS_Unary_Operator")]
	IdsUnaryOperator,
	#[parse_name("IDS_Binary_Operator")]
	IdsBinaryOperator,
	#[parse_name("IDS_Trinary_Operator")]
	IdsTrinaryOperator,
	Radical,
	#[parse_name("Unified_Ideograph")]
	UnifiedIdeograph,
	#[parse_name("Other_Default_Ignorable_Code_Point")]
	OtherDefaultIgnorableCodePoint,
	Deprecated,
	#[parse_name("Soft_Dotted")]
	SoftDotted,
	#[parse_name("Logical_Order_Exception")]
	LogicalOrderException,
	#[parse_name("Other_ID_Start")]
	OtherIdStart,
	#[parse_name("Other_ID_Continue")]
	OtherIdContinue,
	#[parse_name("ID_Compat_Math_Start")]
	IdCompatMathStart,
	#[parse_name("ID_Compat_Math_Continue")]
	IdCompatMathContinue,
	/// Named `STerm` up to Unicode 9.0.0.
	#[parse_name("Sentence_Terminal")]
	#[parse_name("STerm")]
	SentenceTerminal,
	#[parse_name("Variation_Selector")]
	VariationSelector,
	#[parse_name("Pattern_White_Space")]
	PatternWhiteSpace,
	#[parse_name("Pattern_Syntax")]
	PatternSyntax,
	#[parse_name("Prepended_Concatenation_Mark")]
	PrependedConcatenationMark,
	#[parse_name("Regional_Indicator")]
	RegionalIndicator,
	#[parse_name("Modifier_Combining_Mark")]
	ModifierCombiningMark,
}

/// Derived boolean properties listed in DerivedCoreProperties.txt
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumFromName, EnumCount)]
pub enum CoreProperty {
	/// Generated from: `category=Sm + flag=Other_Math`
	Math,
	/// Generated from: `Lowercase + Uppercase + category=[Lt + Lm + Lo + Nl] + flag=Other_Alphabetic`
	Alphabetic,
	/// Generated from: `category=Ll + flag=Other_Lowercase`
	Lowercase,
	/// Generated from: `category=Lu + flag=Other_Uppercase`
	Uppercase,
	/// Generated from: `Lowercase + Uppercase + category=Lt`
	Cased,
	#[parse_name("Case_Ignorable")]
	CaseIgnorable,
	#[parse_name("Changes_When_Lowercased")]
	ChangesWhenLowercased,
	#[parse_name("Changes_When_Uppercased")]
	ChangesWhenUppercased,
	#[parse_name("Changes_When_Titlecased")]
	ChangesWhenTitlecased,
	#[parse_name("Changes_When_Casefolded")]
	ChangesWhenCasefolded,
	#[parse_name("Changes_When_Casemapped")]
	ChangesWhenCasemapped,
	#[parse_name("ID_Start")]
	IdStart,
	#[parse_name("ID_Continue")]
	IdContinue,
	#[parse_name("XID_Start")]
	XidStart,
	#[parse_name("XID_Continue")]
	XidContinue,
	#[parse_name("Default_Ignorable_Code_Point")]
	DefaultIgnorableCodePoint,
	#[parse_name("Grapheme_Extend")]
	GraphemeExtend,
	#[parse_name("Grapheme_Base")]
	GraphemeBase,
	/// Deprecated since Unicode 5.0.0.
	#[parse_name("Grapheme_Link")]
	GraphemeLink,
}

/// Either kind of boolean property, used to route a flag to the right property set.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnicodeProperty {
	Contributory(ContributoryProperty),
	Core(CoreProperty),
}

impl From<ContributoryProperty> for UnicodeProperty {
	fn from(value: ContributoryProperty) -> Self {
		Self::Contributory(value)
	}
}

impl From<CoreProperty> for UnicodeProperty {
	fn from(value: CoreProperty) -> Self {
		Self::Core(value)
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NumericType {
	/// Fields 6, 7 and 8 are all set: a decimal digit usable in positional notation.
	Decimal,
	/// Fields 7 and 8 are set: a digit that needs special handling, e.g. superscripts.
	Digit,
	/// Only field 8 is set.
	Numeric,
}

/// Exact numeric value of a character, e.g. `1/2` for U+00BD.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct UnicodeRationalNumber {
	pub numerator:   i64,
	pub denominator: u64,
}

impl UnicodeRationalNumber {
	/// Parse `n` or `n/d`, returns `None` for an empty string, a malformed number, or a zero denominator.
	pub fn parse(s: &str) -> Option<Self> {
		match s.split_once('/') {
			Some((numerator, denominator)) => {
				let denominator = denominator.parse::<u64>().ok().filter(|&d| d != 0)?;
				Some(Self { numerator: numerator.parse().ok()?, denominator })
			},
			None => Some(Self { numerator: s.parse().ok()?, denominator: 1 }),
		}
	}

	pub fn is_integer(&self) -> bool {
		self.denominator == 1
	}
}

impl fmt::Display for UnicodeRationalNumber {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_integer() {
			write!(f, "{}", self.numerator)
		} else {
			write!(f, "{}/{}", self.numerator, self.denominator)
		}
	}
}

/// Formatting tag of a decomposition mapping
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumFromName, EnumCount)]
pub enum DecompositionTag {
	/// Untagged mapping, written without a `<tag>`.
	#[parse_name("")]
	Canonical,
	#[parse_name("<font>")]
	Font,
	#[parse_name("<noBreak>")]
	NoBreak,
	#[parse_name("<initial>")]
	Initial,
	#[parse_name("<medial>")]
	Medial,
	#[parse_name("<final>")]
	Final,
	#[parse_name("<isolated>")]
	Isolated,
	#[parse_name("<circle>")]
	Circle,
	#[parse_name("<super>")]
	Super,
	#[parse_name("<sub>")]
	Sub,
	#[parse_name("<vertical>")]
	Vertical,
	#[parse_name("<wide>")]
	Wide,
	#[parse_name("<narrow>")]
	Narrow,
	#[parse_name("<small>")]
	Small,
	#[parse_name("<square>")]
	Square,
	#[parse_name("<fraction>")]
	Fraction,
	#[parse_name("<compat>")]
	Compat,
}

/// Character decomposition mapping
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CharacterDecompositionMapping {
	pub tag:         DecompositionTag,
	pub code_points: Vec<u32>,
}

impl CharacterDecompositionMapping {
	/// Parse a mapping such as `0041 0300` or `<compat> 0020 0308`.
	pub fn parse(s: &str) -> Option<Self> {
		let mut elems = s.split_whitespace().peekable();
		let tag = match elems.peek() {
			Some(first) if first.starts_with('<') => {
				let tag = DecompositionTag::parse(first)?;
				elems.next();
				tag
			},
			_ => DecompositionTag::Canonical,
		};

		let code_points = elems.map(parse_code_point).collect::<Option<Vec<_>>>()?;
		if code_points.is_empty() {
			return None;
		}
		Some(Self { tag, code_points })
	}
}

impl fmt::Display for CharacterDecompositionMapping {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut sep = "";
		if self.tag != DecompositionTag::Canonical {
			f.write_str(self.tag.name())?;
			sep = " ";
		}
		for cp in &self.code_points {
			write!(f, "{sep}{cp:04X}")?;
			sep = " ";
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rational_numbers() {
		assert_eq!(UnicodeRationalNumber::parse("7"), Some(UnicodeRationalNumber { numerator: 7, denominator: 1 }));
		assert_eq!(UnicodeRationalNumber::parse("-1/2"), Some(UnicodeRationalNumber { numerator: -1, denominator: 2 }));
		assert_eq!(UnicodeRationalNumber::parse("1000000000000").map(|val| val.numerator), Some(1_000_000_000_000));
		assert_eq!(UnicodeRationalNumber::parse("1/0"), None);
		assert_eq!(UnicodeRationalNumber::parse(""), None);
		assert_eq!(UnicodeRationalNumber::parse("1/2/3"), None);
		assert_eq!(UnicodeRationalNumber::parse("1/160").unwrap().to_string(), "1/160");
	}

	#[test]
	fn decomposition_mappings() {
		let canonical = CharacterDecompositionMapping::parse("0041 0300").unwrap();
		assert_eq!(canonical.tag, DecompositionTag::Canonical);
		assert_eq!(canonical.code_points, vec![0x41, 0x300]);

		let compat = CharacterDecompositionMapping::parse("<compat> 0020 0308").unwrap();
		assert_eq!(compat.tag, DecompositionTag::Compat);
		assert_eq!(compat.to_string(), "<compat> 0020 0308");

		assert_eq!(CharacterDecompositionMapping::parse("<bogus> 0020"), None);
		assert_eq!(CharacterDecompositionMapping::parse("<font>"), None);
		assert_eq!(CharacterDecompositionMapping::parse("00ZZ"), None);
	}

	#[test]
	fn canonical_names() {
		assert_eq!(UnicodeCategory::UppercaseLetter.name(), "Lu");
		assert_eq!(BidirectionalClass::parse("NSM"), Some(BidirectionalClass::NonspacingMark));
		assert_eq!(ContributoryProperty::parse("STerm"), Some(ContributoryProperty::SentenceTerminal));
		assert_eq!(ContributoryProperty::SentenceTerminal.name(), "Sentence_Terminal");
		assert_eq!(CoreProperty::parse("Math"), Some(CoreProperty::Math));
		assert_eq!(CoreProperty::parse("InCB"), None);
	}
}
