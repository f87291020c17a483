//! Line readers for the 2 record formats used by the UCD: `;` delimited fields and tab separated Unihan triples.

use core::cell::Cell;
use std::io::{self, BufRead};

use onca_base::EnumFromNameT;
use onca_parser_utils::str_parser::StrParser;

use crate::{
	code_point::parse_prefixed_code_point,
	unihan::UnihanProperty,
	UcdError, UcdErrorKind, UcdResult,
};

/// Read the next raw line into `line`, returns `false` at the end of the stream.
fn read_raw_line<R: BufRead>(reader: &mut R, line: &mut String, file_name: &str, line_number: &mut usize) -> UcdResult<bool> {
	line.clear();
	let read = reader.read_line(line).map_err(|err| {
		let kind = match err.kind() {
			io::ErrorKind::InvalidData => UcdErrorKind::MalformedRecord("line is not valid UTF-8".to_string()),
			_ => UcdErrorKind::Io(err),
		};
		UcdError::new(file_name, kind).at_line(*line_number + 1)
	})?;
	if read == 0 {
		return Ok(false);
	}
	*line_number += 1;

	let len = line.trim_end_matches(|ch: char| ch == '\n' || ch == '\r').len();
	line.truncate(len);
	Ok(true)
}

/// Reader over files made of records with fields separated by a single character.
/// 
/// Everything from a `#` to the end of the line is a comment, lines which are empty after removing the comment are skipped.
/// Fields are consumed in order with [`read_field`](Self::read_field), [`read_trimmed_field`](Self::read_trimmed_field) and [`skip_field`](Self::skip_field).
pub struct DelimitedRecordReader<R: BufRead> {
	reader:      R,
	file_name:   String,
	separator:   char,
	line:        String,
	line_number: usize,
	fields:      Vec<(usize, usize)>,
	next_field:  Cell<usize>,
}

impl<R: BufRead> DelimitedRecordReader<R> {
	pub fn new(reader: R, file_name: impl Into<String>, separator: char) -> Self {
		Self {
			reader,
			file_name: file_name.into(),
			separator,
			line: String::new(),
			line_number: 0,
			fields: Vec::new(),
			next_field: Cell::new(0),
		}
	}

	/// Advance to the next record, returns `false` once the stream is exhausted.
	pub fn move_to_next_line(&mut self) -> UcdResult<bool> {
		loop {
			if !read_raw_line(&mut self.reader, &mut self.line, &self.file_name, &mut self.line_number)? {
				self.fields.clear();
				return Ok(false);
			}

			if let Some(idx) = self.line.find('#') {
				self.line.truncate(idx);
			}
			if self.line.trim().is_empty() {
				continue;
			}

			let mut parser = StrParser::for_line(&self.line, self.line_number);
			self.fields = parser.split_fields(self.separator);
			self.next_field.set(0);
			return Ok(true);
		}
	}

	/// Read the next field as is.
	pub fn read_field(&self) -> UcdResult<&str> {
		let idx = self.next_field.get();
		match self.fields.get(idx) {
			Some(&(start, end)) => {
				self.next_field.set(idx + 1);
				Ok(&self.line[start..end])
			},
			None => {
				let mut err = self.error(UcdErrorKind::MalformedRecord(format!("expected at least {} fields, found {}", idx + 1, self.fields.len())));
				err.field_index = Some(idx);
				Err(err)
			},
		}
	}

	/// Read the next field without leading and trailing whitespace.
	pub fn read_trimmed_field(&self) -> UcdResult<&str> {
		self.read_field().map(str::trim)
	}

	/// Skip over the next field.
	pub fn skip_field(&self) -> UcdResult<()> {
		self.read_field().map(|_| ())
	}

	/// Number of fields in the current record.
	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	pub fn file_name(&self) -> &str {
		&self.file_name
	}

	/// 1-based number of the current line.
	pub fn line_number(&self) -> usize {
		self.line_number
	}

	/// Create an error located at the current line and last read field.
	/// 
	/// A field that could not be read is reported by its own index instead.
	pub fn error(&self, kind: UcdErrorKind) -> UcdError {
		let mut err = UcdError::new(self.file_name.as_str(), kind).at_line(self.line_number);
		err.field_index = Some(self.next_field.get().saturating_sub(1));
		err
	}
}

/// Split a `U+XXXX<TAB>kProperty<TAB>value` line into the code point and the spans of the property and value.
fn split_unihan_line(line: &str) -> Option<(u32, (usize, usize), (usize, usize))> {
	let mut parser = StrParser::new(line);
	let code_point = parse_prefixed_code_point(parser.extract_until('\t'))?;
	if !parser.consume_char('\t') {
		return None;
	}

	let property_start = parser.column;
	let property = parser.extract_until('\t');
	if property.is_empty() || !parser.consume_char('\t') {
		return None;
	}
	let property_span = (property_start, parser.column - 1);
	let value_span = (parser.column, line.len());
	Some((code_point, property_span, value_span))
}

/// Reader over the Unihan database files.
/// 
/// Each line holds one `code point, property, value` triple, lines for the same code point follow each other.
/// Empty lines and lines starting with `#` are skipped.
pub struct UnihanRecordReader<R: BufRead> {
	reader:          R,
	file_name:       String,
	line:            String,
	line_number:     usize,
	code_point:      u32,
	prev_code_point: Option<u32>,
	has_record:      bool,
	property_span:   (usize, usize),
	value_span:      (usize, usize),
}

impl<R: BufRead> UnihanRecordReader<R> {
	pub fn new(reader: R, file_name: impl Into<String>) -> Self {
		Self {
			reader,
			file_name: file_name.into(),
			line: String::new(),
			line_number: 0,
			code_point: 0,
			prev_code_point: None,
			has_record: false,
			property_span: (0, 0),
			value_span: (0, 0),
		}
	}

	/// Advance to the next triple, returns `false` once the stream is exhausted.
	pub fn read(&mut self) -> UcdResult<bool> {
		loop {
			if !read_raw_line(&mut self.reader, &mut self.line, &self.file_name, &mut self.line_number)? {
				return Ok(false);
			}

			if self.line.trim().is_empty() || self.line.starts_with('#') {
				continue;
			}

			let (code_point, property_span, value_span) = match split_unihan_line(&self.line) {
				Some(split) => split,
				None => return Err(self.error(UcdErrorKind::MalformedRecord(format!("expected 'U+<hex><TAB>property<TAB>value', found '{}'", self.line)))),
			};

			self.prev_code_point = self.has_record.then_some(self.code_point);
			self.has_record = true;
			self.code_point = code_point;
			self.property_span = property_span;
			self.value_span = value_span;
			return Ok(true);
		}
	}

	/// Code point of the current triple.
	pub fn code_point(&self) -> u32 {
		self.code_point
	}

	/// Check if the current triple is the first one for its code point.
	pub fn starts_new_code_point(&self) -> bool {
		self.prev_code_point != Some(self.code_point)
	}

	/// Raw property token of the current triple.
	pub fn property_name(&self) -> &str {
		&self.line[self.property_span.0..self.property_span.1]
	}

	/// Property of the current triple, `None` for properties that are not handled.
	pub fn property(&self) -> Option<UnihanProperty> {
		UnihanProperty::parse(self.property_name())
	}

	/// Value of the current triple.
	pub fn property_value(&self) -> &str {
		&self.line[self.value_span.0..self.value_span.1]
	}

	pub fn file_name(&self) -> &str {
		&self.file_name
	}

	/// 1-based number of the current line.
	pub fn line_number(&self) -> usize {
		self.line_number
	}

	/// Create an error located at the current line.
	pub fn error(&self, kind: UcdErrorKind) -> UcdError {
		UcdError::new(self.file_name.as_str(), kind).at_line(self.line_number)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn delimited_skips_comments_and_blank_lines() {
		let data = "# header comment\n\n0000..001F    ; White_Space # Cc  [32]\r\n   \n0020 ; Dash\n";
		let mut reader = DelimitedRecordReader::new(Cursor::new(data), "PropList.txt", ';');

		assert!(reader.move_to_next_line().unwrap());
		assert_eq!(reader.line_number(), 3);
		assert_eq!(reader.field_count(), 2);
		assert_eq!(reader.read_field().unwrap(), "0000..001F    ");
		assert_eq!(reader.read_trimmed_field().unwrap(), "White_Space");

		assert!(reader.move_to_next_line().unwrap());
		assert_eq!(reader.line_number(), 5);
		reader.skip_field().unwrap();
		assert_eq!(reader.read_trimmed_field().unwrap(), "Dash");

		assert!(!reader.move_to_next_line().unwrap());
	}

	#[test]
	fn delimited_keeps_empty_fields() {
		let mut reader = DelimitedRecordReader::new(Cursor::new("0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;0061;;\n"), "UnicodeData.txt", ';');
		assert!(reader.move_to_next_line().unwrap());
		assert_eq!(reader.field_count(), 15);
		assert_eq!(reader.read_field().unwrap(), "0041");
		assert_eq!(reader.read_field().unwrap(), "LATIN CAPITAL LETTER A");
		for _ in 2..12 {
			reader.skip_field().unwrap();
		}
		assert_eq!(reader.read_field().unwrap(), "0061");
		assert_eq!(reader.read_field().unwrap(), "");
		assert_eq!(reader.read_field().unwrap(), "");
	}

	#[test]
	fn delimited_reports_missing_fields() {
		let mut reader = DelimitedRecordReader::new(Cursor::new("\n0041;A\n"), "Blocks.txt", ';');
		assert!(reader.move_to_next_line().unwrap());
		reader.skip_field().unwrap();
		reader.skip_field().unwrap();
		let err = reader.read_field().unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::MalformedRecord(_)));
		assert_eq!(err.file, "Blocks.txt");
		assert_eq!(err.line, 2);
		assert_eq!(err.field_index, Some(2));
	}

	#[test]
	fn invalid_utf8_is_malformed() {
		let mut reader = DelimitedRecordReader::new(Cursor::new(b"0041;\xFF\xFE;Lu\n".to_vec()), "UnicodeData.txt", ';');
		let err = reader.move_to_next_line().unwrap_err();
		assert!(matches!(err.kind, UcdErrorKind::MalformedRecord(_)));
		assert_eq!(err.line, 1);

		let mut reader = UnihanRecordReader::new(Cursor::new(b"U+3405\tkDefinition\t\xC3\n".to_vec()), "Unihan_Readings.txt");
		assert!(matches!(reader.read().unwrap_err().kind, UcdErrorKind::MalformedRecord(_)));
	}

	#[test]
	fn unihan_triples() {
		let data = "# Unihan_Readings.txt\n\nU+3405\tkDefinition\t\"to rest\"\nU+3405\tkMandarin\twǔ\nU+3406\tkFoo\tbar baz\n";
		let mut reader = UnihanRecordReader::new(Cursor::new(data), "Unihan_Readings.txt");

		assert!(reader.read().unwrap());
		assert_eq!(reader.code_point(), 0x3405);
		assert!(reader.starts_new_code_point());
		assert_eq!(reader.property_name(), "kDefinition");
		assert_eq!(reader.property(), Some(UnihanProperty::Definition));
		assert_eq!(reader.property_value(), "\"to rest\"");

		assert!(reader.read().unwrap());
		assert!(!reader.starts_new_code_point());
		assert_eq!(reader.property_value(), "wǔ");

		assert!(reader.read().unwrap());
		assert!(reader.starts_new_code_point());
		assert_eq!(reader.property_name(), "kFoo");
		assert_eq!(reader.property(), None);
		assert_eq!(reader.property_value(), "bar baz");

		assert!(!reader.read().unwrap());
	}

	#[test]
	fn unihan_rejects_malformed_lines() {
		for line in ["3405\tkDefinition\tx\n", "U+3405 kDefinition x\n", "U+3405\tkDefinition\n", "U+3405\t\tx\n"] {
			let mut reader = UnihanRecordReader::new(Cursor::new(line), "Unihan_Readings.txt");
			let err = reader.read().unwrap_err();
			assert!(matches!(err.kind, UcdErrorKind::MalformedRecord(_)), "{line:?}");
			assert_eq!(err.line, 1);
		}
	}
}
