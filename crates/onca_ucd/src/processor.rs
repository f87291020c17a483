//! Parsing of the individual UCD and Unihan files into a [`UnicodeDatabaseBuilder`].

use std::{collections::BTreeSet, io::BufRead};

use onca_base::EnumFromNameT;
use onca_logging::{log_error, log_info, log_verbose, LogCategory};

use crate::{
	code_point::{parse_code_point, parse_prefixed_code_point},
	BidirectionalClass, CanonicalCombiningClass, CharacterDecompositionMapping, CharacterRecordBuilder,
	CodePointRange, ContributoryProperty, CoreProperty, DataStream, DelimitedRecordReader, UcdError,
	UcdErrorKind, UcdFileNames, UcdResult, UcdSettings, UcdSource, UnicodeBlock, UnicodeCategory,
	UnicodeDatabaseBuilder, UnicodeProperty, UnicodeVersion, UnihanProperty, UnihanRecordReader,
};

pub const LOG_CAT: LogCategory = LogCategory::new("UCD");

/// Number of positional fields in a UnicodeData.txt record
const UNICODE_DATA_FIELD_COUNT: usize = 15;

/// Builds a [`UnicodeDatabaseBuilder`] from the 7 data files.
///
/// Files are opened and parsed one at a time, in a fixed order, the first failure aborts the build.
#[derive(Clone, Debug)]
pub struct UnicodeDataProcessor {
	version: UnicodeVersion,
	files:   UcdFileNames,
}

impl UnicodeDataProcessor {
	pub fn new(version: UnicodeVersion, files: UcdFileNames) -> Self {
		Self { version, files }
	}

	pub fn from_settings(settings: &UcdSettings) -> Self {
		Self::new(settings.version, settings.files.clone())
	}

	pub fn files(&self) -> &UcdFileNames {
		&self.files
	}

	/// Run the build, UCD files are opened from `ucd`, Unihan files from `unihan`.
	pub async fn build(&self, ucd: &dyn UcdSource, unihan: &dyn UcdSource) -> UcdResult<UnicodeDatabaseBuilder> {
		let mut db = UnicodeDatabaseBuilder::new(self.version);
		match self.build_into(&mut db, ucd, unihan).await {
			Ok(()) => Ok(db),
			Err(err) => {
				log_error!(LOG_CAT, Self::build, "Failed to build the unicode {} database: {err}", self.version);
				Err(err)
			},
		}
	}

	async fn build_into(&self, db: &mut UnicodeDatabaseBuilder, ucd: &dyn UcdSource, unihan: &dyn UcdSource) -> UcdResult<()> {
		let files = &self.files;

		let mut reader = DelimitedRecordReader::new(open_file(ucd, &files.unicode_data).await?, files.unicode_data.as_str(), ';');
		let count = process_unicode_data(&mut reader, db)?;
		log_info!(LOG_CAT, "Processed {count} character records from '{}'", files.unicode_data);

		let mut reader = DelimitedRecordReader::new(open_file(ucd, &files.prop_list).await?, files.prop_list.as_str(), ';');
		let count = process_prop_list(&mut reader, db)?;
		log_info!(LOG_CAT, "Processed {count} property ranges from '{}'", files.prop_list);

		let mut reader = DelimitedRecordReader::new(open_file(ucd, &files.derived_core_properties).await?, files.derived_core_properties.as_str(), ';');
		let count = process_derived_core_properties(&mut reader, db)?;
		log_info!(LOG_CAT, "Processed {count} property ranges from '{}'", files.derived_core_properties);

		let mut reader = DelimitedRecordReader::new(open_file(ucd, &files.blocks).await?, files.blocks.as_str(), ';');
		let count = process_blocks(&mut reader, db)?;
		log_info!(LOG_CAT, "Processed {count} blocks from '{}'", files.blocks);

		let mut reader = UnihanRecordReader::new(open_file(unihan, &files.unihan_readings).await?, files.unihan_readings.as_str());
		let count = process_unihan_readings(&mut reader, db)?;
		log_info!(LOG_CAT, "Processed {count} readings from '{}'", files.unihan_readings);

		let mut reader = UnihanRecordReader::new(open_file(unihan, &files.unihan_variants).await?, files.unihan_variants.as_str());
		let count = process_unihan_variants(&mut reader, db)?;
		log_info!(LOG_CAT, "Processed {count} variants from '{}'", files.unihan_variants);

		let mut reader = UnihanRecordReader::new(open_file(unihan, &files.unihan_numeric_values).await?, files.unihan_numeric_values.as_str());
		let count = process_unihan_numeric_values(&mut reader, db)?;
		log_info!(LOG_CAT, "Processed {count} numeric values from '{}'", files.unihan_numeric_values);

		Ok(())
	}
}

/// Build the database described by `settings`, UCD files are opened from `ucd_source`, Unihan files from `unihan_source`.
pub async fn build_data(ucd_source: &dyn UcdSource, unihan_source: &dyn UcdSource, settings: &UcdSettings) -> UcdResult<UnicodeDatabaseBuilder> {
	UnicodeDataProcessor::from_settings(settings).build(ucd_source, unihan_source).await
}

async fn open_file(source: &dyn UcdSource, name: &str) -> UcdResult<DataStream> {
	source.open_data_file(name).await.map_err(|err| UcdError::new(name, UcdErrorKind::Io(err)))
}

fn read_parsed<R: BufRead, T>(reader: &DelimitedRecordReader<R>, field: &'static str, parse: impl FnOnce(&str) -> Option<T>) -> UcdResult<T> {
	let value = reader.read_field().map_err(|err| err.in_field(field))?;
	parse(value).ok_or_else(|| reader.error(UcdErrorKind::MalformedRecord(format!("invalid {field} '{value}'"))).in_field(field))
}

fn read_optional<'a, R: BufRead>(reader: &'a DelimitedRecordReader<R>, field: &'static str) -> UcdResult<Option<&'a str>> {
	reader.read_field()
		.map(|value| (!value.is_empty()).then_some(value))
		.map_err(|err| err.in_field(field))
}

fn parse_case_mapping(s: &str) -> Option<Option<char>> {
	if s.is_empty() {
		return Some(None);
	}
	parse_code_point(s).and_then(char::from_u32).map(Some)
}

fn ends_with_ignore_ascii_case(s: &str, suffix: &str) -> bool {
	s.len() >= suffix.len() && s.get(s.len() - suffix.len()..).map_or(false, |end| end.eq_ignore_ascii_case(suffix))
}

fn log_skipped(file_name: &str, skipped: &BTreeSet<String>) {
	for name in skipped {
		log_verbose!(LOG_CAT, "Skipped unhandled property '{name}' in '{file_name}'");
	}
}

/// Read fields 2 to 14 of a UnicodeData.txt record.
fn read_character_fields<R: BufRead>(reader: &DelimitedRecordReader<R>, builder: &mut CharacterRecordBuilder) -> UcdResult<()> {
	builder.category = read_parsed(reader, "general category", UnicodeCategory::parse)?;
	builder.combining_class = read_parsed(reader, "canonical combining class", |s| s.parse().ok().map(CanonicalCombiningClass))?;

	let bidi = reader.read_field().map_err(|err| err.in_field("bidi class"))?;
	let bidi = BidirectionalClass::parse(bidi).ok_or_else(|| reader.error(UcdErrorKind::MissingRequiredField).in_field("bidi class"))?;
	builder.bidi_class = Some(bidi);

	builder.decomposition = read_parsed(reader, "decomposition mapping", |s| match s {
		"" => Some(None),
		s => CharacterDecompositionMapping::parse(s).map(Some),
	})?;

	let decimal = read_optional(reader, "decimal digit value")?;
	let digit = read_optional(reader, "digit value")?;
	let numeric = read_optional(reader, "numeric value")?;
	builder.set_numeric_fields(decimal, digit, numeric)
		.map_err(|(kind, field)| reader.error(kind).in_field(field))?;

	builder.bidi_mirrored = reader.read_field().map_err(|err| err.in_field("bidi mirrored"))? == "Y";
	builder.legacy_name = read_optional(reader, "unicode 1 name")?.map(str::to_string);
	// ISO comment, obsolete
	reader.skip_field().map_err(|err| err.in_field("ISO comment"))?;
	builder.simple_uppercase = read_parsed(reader, "simple uppercase mapping", parse_case_mapping)?;
	builder.simple_lowercase = read_parsed(reader, "simple lowercase mapping", parse_case_mapping)?;
	builder.simple_titlecase = read_parsed(reader, "simple titlecase mapping", parse_case_mapping)?;
	Ok(())
}

/// Parse UnicodeData.txt, returns the number of character records that were inserted.
///
/// Records named `<..., First>` and `<..., Last>` are paired into a single record covering the whole range.
pub fn process_unicode_data<R: BufRead>(reader: &mut DelimitedRecordReader<R>, db: &mut UnicodeDatabaseBuilder) -> UcdResult<usize> {
	let mut range_start: Option<CodePointRange> = None;
	let mut count = 0;

	while reader.move_to_next_line()? {
		let code_point = read_parsed(reader, "code point", |s| parse_code_point(s).and_then(CodePointRange::single))?;
		if reader.field_count() > UNICODE_DATA_FIELD_COUNT {
			let msg = format!("expected {UNICODE_DATA_FIELD_COUNT} fields, found {}", reader.field_count());
			return Err(UcdError::new(reader.file_name(), UcdErrorKind::MalformedRecord(msg)).at_line(reader.line_number()).for_code_points(code_point));
		}
		let name_field = reader.read_field().map_err(|err| err.in_field("name"))?;
		let marker_error = |kind: UcdErrorKind| reader.error(kind).in_field("name").for_code_points(code_point);

		let (range, name) = if name_field.len() >= 2 && name_field.starts_with('<') && name_field.ends_with('>') {
			if ends_with_ignore_ascii_case(name_field, ", First>") {
				if range_start.is_some() {
					return Err(marker_error(UcdErrorKind::UnterminatedRange));
				}
				// The properties are taken from the `Last` record.
				range_start = Some(code_point);
				continue;
			} else if ends_with_ignore_ascii_case(name_field, ", Last>") {
				let start = range_start.take().ok_or_else(|| marker_error(UcdErrorKind::UnexpectedRangeMarker(name_field.to_string())))?;
				let range = CodePointRange::new(start.first(), code_point.last())
					.ok_or_else(|| marker_error(UcdErrorKind::MalformedRecord(format!("range end {code_point} precedes its start {start}"))))?;
				// Character names are upper-case ASCII
				(range, Some(name_field[1..name_field.len() - 7].to_uppercase()))
			} else if name_field == "<control>" {
				(code_point, None)
			} else {
				return Err(marker_error(UcdErrorKind::UnexpectedRangeMarker(name_field.to_string())));
			}
		} else if range_start.is_some() {
			return Err(marker_error(UcdErrorKind::UnexpectedRangeMarker(name_field.to_string())));
		} else {
			(code_point, (!name_field.is_empty()).then(|| name_field.to_string()))
		};

		let mut builder = CharacterRecordBuilder::new(range);
		builder.name = name;
		read_character_fields(reader, &mut builder).map_err(|err| err.for_code_points(range))?;

		let record = builder.build().map_err(|kind| reader.error(kind).for_code_points(range))?;
		db.insert_character_record(record).map_err(|kind| reader.error(kind).for_code_points(range))?;
		count += 1;
	}

	match range_start {
		Some(start) => Err(UcdError::new(reader.file_name(), UcdErrorKind::UnterminatedRange).at_line(reader.line_number()).for_code_points(start)),
		None => Ok(count),
	}
}

/// Parse a `range ; property` file, unknown properties are skipped.
fn process_property_file<R, P>(reader: &mut DelimitedRecordReader<R>, db: &mut UnicodeDatabaseBuilder) -> UcdResult<usize>
where
	R: BufRead,
	P: EnumFromNameT + Into<UnicodeProperty>,
{
	let mut skipped = BTreeSet::new();
	let mut count = 0;

	while reader.move_to_next_line()? {
		let range = read_parsed(reader, "code point range", |s| CodePointRange::parse(s.trim()))?;
		let name = reader.read_trimmed_field().map_err(|err| err.in_field("property name").for_code_points(range))?;
		match P::parse(name) {
			Some(property) => {
				db.apply_property_flag(property, range);
				count += 1;
			},
			None => if !skipped.contains(name) {
				skipped.insert(name.to_string());
			},
		}
	}

	log_skipped(reader.file_name(), &skipped);
	Ok(count)
}

/// Parse PropList.txt, returns the number of ranges that were applied.
pub fn process_prop_list<R: BufRead>(reader: &mut DelimitedRecordReader<R>, db: &mut UnicodeDatabaseBuilder) -> UcdResult<usize> {
	process_property_file::<R, ContributoryProperty>(reader, db)
}

/// Parse DerivedCoreProperties.txt, returns the number of ranges that were applied.
pub fn process_derived_core_properties<R: BufRead>(reader: &mut DelimitedRecordReader<R>, db: &mut UnicodeDatabaseBuilder) -> UcdResult<usize> {
	process_property_file::<R, CoreProperty>(reader, db)
}

/// Parse Blocks.txt, returns the number of blocks.
pub fn process_blocks<R: BufRead>(reader: &mut DelimitedRecordReader<R>, db: &mut UnicodeDatabaseBuilder) -> UcdResult<usize> {
	let mut count = 0;
	while reader.move_to_next_line()? {
		let range = read_parsed(reader, "block range", CodePointRange::parse)?;
		let name = reader.read_trimmed_field().map_err(|err| err.in_field("block name").for_code_points(range))?;
		db.append_block(UnicodeBlock { range, name: name.to_string() });
		count += 1;
	}
	Ok(count)
}

/// Parse Unihan_Readings.txt, returns the number of readings that were stored.
pub fn process_unihan_readings<R: BufRead>(reader: &mut UnihanRecordReader<R>, db: &mut UnicodeDatabaseBuilder) -> UcdResult<usize> {
	let mut skipped = BTreeSet::new();
	let mut count = 0;

	while reader.read()? {
		match reader.property().filter(|prop| prop.is_reading()) {
			Some(property) => {
				db.get_or_create_unihan_entry(reader.code_point()).set_reading(property, reader.property_value());
				count += 1;
			},
			None => if !skipped.contains(reader.property_name()) {
				skipped.insert(reader.property_name().to_string());
			},
		}
	}

	log_skipped(reader.file_name(), &skipped);
	Ok(count)
}

/// Parse Unihan_Variants.txt, returns the number of variants that were stored.
///
/// Only the first code point of a value is kept, e.g. `U+4E07 U+842C` resolves to U+4E07.
pub fn process_unihan_variants<R: BufRead>(reader: &mut UnihanRecordReader<R>, db: &mut UnicodeDatabaseBuilder) -> UcdResult<usize> {
	let mut skipped = BTreeSet::new();
	let mut count = 0;

	while reader.read()? {
		let property = match reader.property().filter(|prop| prop.is_variant()) {
			Some(property) => property,
			None => {
				if !skipped.contains(reader.property_name()) {
					skipped.insert(reader.property_name().to_string());
				}
				continue;
			},
		};

		let value = reader.property_value();
		let variant = value.split_whitespace()
			.next()
			.map(|reference| reference.split('<').next().unwrap_or(reference))
			.and_then(parse_prefixed_code_point)
			.and_then(char::from_u32)
			.ok_or_else(|| reader.error(UcdErrorKind::MalformedRecord(format!("invalid variant '{value}'"))).for_code_point(reader.code_point()))?;

		let entry = db.get_or_create_unihan_entry(reader.code_point());
		if property == UnihanProperty::SimplifiedVariant {
			entry.simplified_variant = Some(variant);
		} else {
			entry.traditional_variant = Some(variant);
		}
		count += 1;
	}

	log_skipped(reader.file_name(), &skipped);
	Ok(count)
}

/// Parse Unihan_NumericValues.txt, returns the number of numeric values that were stored.
///
/// Unlike the other Unihan files, any unknown property is an error.
pub fn process_unihan_numeric_values<R: BufRead>(reader: &mut UnihanRecordReader<R>, db: &mut UnicodeDatabaseBuilder) -> UcdResult<usize> {
	let mut count = 0;

	while reader.read()? {
		let numeric_type = reader.property()
			.and_then(UnihanProperty::numeric_type)
			.ok_or_else(|| reader.error(UcdErrorKind::UnrecognizedProperty(reader.property_name().to_string())).for_code_point(reader.code_point()))?;

		let value = reader.property_value();
		let value = value.trim().parse::<i64>()
			.map_err(|_| reader.error(UcdErrorKind::MalformedRecord(format!("invalid numeric value '{value}'"))).for_code_point(reader.code_point()))?;

		let entry = db.get_or_create_unihan_entry(reader.code_point());
		entry.numeric_type = Some(numeric_type);
		entry.numeric_value = Some(value);
		count += 1;
	}

	Ok(count)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unicode_data(data: &str) -> UcdResult<UnicodeDatabaseBuilder> {
		let mut db = UnicodeDatabaseBuilder::default();
		let mut reader = DelimitedRecordReader::new(data.as_bytes(), UcdFileNames::UNICODE_DATA, ';');
		process_unicode_data(&mut reader, &mut db)?;
		Ok(db)
	}

	#[test]
	fn control_characters_have_no_name() {
		let db = unicode_data("0009;<control>;Cc;0;S;;;;;N;CHARACTER TABULATION;;;;\n").unwrap();
		let record = db.character(0x09).unwrap();
		assert_eq!(record.name, None);
		assert_eq!(record.legacy_name.as_deref(), Some("CHARACTER TABULATION"));
		assert_eq!(record.bidi_class, BidirectionalClass::SegmentSeparator);
	}

	#[test]
	fn range_markers_are_case_insensitive() {
		let db = unicode_data("AC00;<Hangul Syllable, first>;Lo;0;L;;;;;N;;;;;\nD7A3;<Hangul Syllable, LAST>;Lo;0;L;;;;;N;;;;;\n").unwrap();
		let record = db.character(0xC000).unwrap();
		assert_eq!(record.range, CodePointRange::new(0xAC00, 0xD7A3).unwrap());
		assert_eq!(record.name.as_deref(), Some("HANGUL SYLLABLE"));
	}

	#[test]
	fn unknown_tags_and_orphaned_markers() {
		let err = unicode_data("0000;<reserved>;Cn;0;L;;;;;N;;;;;\n").unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::UnexpectedRangeMarker(ref tag) if tag == "<reserved>"));

		let err = unicode_data("D7A3;<Hangul Syllable, Last>;Lo;0;L;;;;;N;;;;;\n").unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::UnexpectedRangeMarker(_)));
		assert_eq!(err.field_name, Some("name"));

		let err = unicode_data("3400;<CJK Ideograph Extension A, First>;Lo;0;L;;;;;N;;;;;\n3401;SOMETHING;Lo;0;L;;;;;N;;;;;\n").unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::UnexpectedRangeMarker(_)));
		assert_eq!(err.line, 2);

		let err = unicode_data("3400;<CJK Ideograph Extension A, First>;Lo;0;L;;;;;N;;;;;\n").unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::UnterminatedRange));
	}

	#[test]
	fn control_characters_inside_an_open_range() {
		let db = unicode_data("3400;<X, First>;Lo;0;L;;;;;N;;;;;\n0009;<control>;Cc;0;S;;;;;N;;;;;\n4DB5;<X, Last>;Lo;0;L;;;;;N;;;;;\n").unwrap();
		assert_eq!(db.character(0x09).unwrap().name, None);

		let range = db.character(0x3400).unwrap();
		assert_eq!(range.range, CodePointRange::new(0x3400, 0x4DB5).unwrap());
		assert_eq!(range.name.as_deref(), Some("X"));
	}

	#[test]
	fn truncated_records_report_the_failing_field() {
		let err = unicode_data("0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N\n").unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::MalformedRecord(_)));
		assert_eq!(err.code_points, CodePointRange::single(0x41));
		assert_eq!(err.field_index, Some(10));
		assert_eq!(err.field_name, Some("unicode 1 name"));

		let err = unicode_data("0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061\n").unwrap_err();
		assert_eq!(err.code_points, CodePointRange::single(0x41));
		assert_eq!(err.field_index, Some(14));
	}

	#[test]
	fn extra_fields_are_rejected() {
		let err = unicode_data("0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;;;\n").unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::MalformedRecord(_)));
		assert_eq!(err.code_points, CodePointRange::single(0x41));
		assert_eq!(err.line, 1);
	}

	#[test]
	fn missing_or_unknown_bidi_class() {
		let err = unicode_data("0041;LATIN CAPITAL LETTER A;Lu;0;XX;;;;;N;;;;0061;\n").unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::MissingRequiredField));
		assert_eq!(err.field_name, Some("bidi class"));
		assert_eq!(err.code_points, CodePointRange::single(0x41));
	}

	#[test]
	fn malformed_fields() {
		let err = unicode_data("ZZZZ;BAD;Lu;0;L;;;;;N;;;;;\n").unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::MalformedRecord(_)));
		assert_eq!(err.field_name, Some("code point"));

		let err = unicode_data("0041;LATIN CAPITAL LETTER A;Lu;0;L\n").unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::MalformedRecord(_)));

		let err = unicode_data("0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;D800;\n").unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::MalformedRecord(_)));
		assert_eq!(err.field_name, Some("simple lowercase mapping"));
	}

	#[test]
	fn decomposition_and_mirroring() {
		let db = unicode_data("00BD;VULGAR FRACTION ONE HALF;No;0;ON;<fraction> 0031 2044 0032;;;1/2;N;FRACTION ONE HALF;;;;\n0028;LEFT PARENTHESIS;Ps;0;ON;;;;;Y;OPENING PARENTHESIS;;;;\n").unwrap();

		let half = db.character(0xBD).unwrap();
		assert_eq!(half.decomposition.as_ref().map(|mapping| mapping.code_points.as_slice()), Some(&[0x31, 0x2044, 0x32][..]));
		assert_eq!(half.numeric_value.map(|value| value.to_string()), Some("1/2".to_string()));
		assert!(!half.bidi_mirrored);

		assert!(db.character(0x28).unwrap().bidi_mirrored);
	}

	#[test]
	fn block_names_are_trimmed() {
		let mut db = UnicodeDatabaseBuilder::default();
		let mut reader = DelimitedRecordReader::new("# Blocks\n0000..007F; Basic Latin\n0080..00FF; Latin-1 Supplement \n".as_bytes(), UcdFileNames::BLOCKS, ';');
		assert_eq!(process_blocks(&mut reader, &mut db).unwrap(), 2);
		assert_eq!(db.blocks()[1].name, "Latin-1 Supplement");

		let mut reader = DelimitedRecordReader::new(" 0000..007F; Basic Latin\n".as_bytes(), UcdFileNames::BLOCKS, ';');
		assert!(process_blocks(&mut reader, &mut db).is_err());
	}

	#[test]
	fn variants_keep_the_first_reference() {
		let mut db = UnicodeDatabaseBuilder::default();
		let mut reader = UnihanRecordReader::new("U+4E07\tkTraditionalVariant\tU+842C U+4E07\nU+842C\tkSimplifiedVariant\tU+4E07\nU+842C\tkSemanticVariant\tU+4E07<kMatthews\n".as_bytes(), UcdFileNames::UNIHAN_VARIANTS);
		assert_eq!(process_unihan_variants(&mut reader, &mut db).unwrap(), 2);

		assert_eq!(db.unihan(0x4E07).unwrap().traditional_variant, Some('\u{842C}'));
		assert_eq!(db.unihan(0x842C).unwrap().simplified_variant, Some('\u{4E07}'));
	}
}
