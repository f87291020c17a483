use core::fmt;
use std::io;

use crate::CodePointRange;

/// Kind of failure that aborted a build
#[derive(Debug)]
pub enum UcdErrorKind {
	/// Field count or syntax violates the grammar of the file
	MalformedRecord(String),
	/// A `<..., First>` marker was found while a range was already open, or the file ended with an open range
	UnterminatedRange,
	/// A `<..., Last>` marker without an open range, an unknown `<tag>`, or a plain record inside an open range
	UnexpectedRangeMarker(String),
	/// The bidirectional class is missing or not a known class
	MissingRequiredField,
	/// Decimal, digit and numeric fields disagree
	InconsistentNumericFields,
	/// Unknown property token in a file that doesn't allow them
	UnrecognizedProperty(String),
	/// The data source failed to provide or read a file
	Io(io::Error),
}

impl fmt::Display for UcdErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UcdErrorKind::MalformedRecord(msg)       => write!(f, "Malformed record: {msg}"),
			UcdErrorKind::UnterminatedRange          => f.write_str("Range start found while another range is still open"),
			UcdErrorKind::UnexpectedRangeMarker(tag) => write!(f, "Unexpected range marker: '{tag}'"),
			UcdErrorKind::MissingRequiredField       => f.write_str("Missing required field"),
			UcdErrorKind::InconsistentNumericFields  => f.write_str("Inconsistent numeric fields"),
			UcdErrorKind::UnrecognizedProperty(name) => write!(f, "Unrecognized property name: '{name}'"),
			UcdErrorKind::Io(err)                    => write!(f, "I/O error: {err}"),
		}
	}
}

/// Terminal build failure, carrying the location of the offending record.
#[derive(Debug)]
pub struct UcdError {
	/// Logical name of the file being processed
	pub file:        String,
	/// 1-based line number, 0 if the failure is not tied to a line
	pub line:        usize,
	/// Code point(s) of the offending record, if known
	pub code_points: Option<CodePointRange>,
	/// 0-based index of the last field that was read
	pub field_index: Option<usize>,
	/// Name of the field the failure relates to
	pub field_name:  Option<&'static str>,
	pub kind:        UcdErrorKind,
}

impl UcdError {
	pub fn new(file: impl Into<String>, kind: UcdErrorKind) -> Self {
		Self { file: file.into(), line: 0, code_points: None, field_index: None, field_name: None, kind }
	}

	pub fn at_line(mut self, line: usize) -> Self {
		self.line = line;
		self
	}

	pub fn in_field(mut self, name: &'static str) -> Self {
		self.field_name = Some(name);
		self
	}

	pub fn for_code_points(mut self, range: CodePointRange) -> Self {
		self.code_points = Some(range);
		self
	}

	pub fn for_code_point(mut self, code_point: u32) -> Self {
		self.code_points = CodePointRange::single(code_point);
		self
	}
}

impl fmt::Display for UcdError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.file)?;
		if self.line != 0 {
			write!(f, ":{}", self.line)?;
		}
		if let Some(range) = &self.code_points {
			write!(f, " ({range})")?;
		}
		match (self.field_index, self.field_name) {
			(Some(idx), Some(name)) => write!(f, " field {idx} '{name}'")?,
			(Some(idx), None)       => write!(f, " field {idx}")?,
			(None, Some(name))      => write!(f, " field '{name}'")?,
			(None, None)            => {},
		}
		write!(f, ": {}", self.kind)
	}
}

impl std::error::Error for UcdError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match &self.kind {
			UcdErrorKind::Io(err) => Some(err),
			_ => None,
		}
	}
}

pub type UcdResult<T> = Result<T, UcdError>;
