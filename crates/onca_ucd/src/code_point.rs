use core::fmt;

/// Highest valid Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Parse a bare hexadecimal code point, e.g. `0041` or `1F600`.
pub fn parse_code_point(s: &str) -> Option<u32> {
	if s.is_empty() || s.len() > 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
		return None;
	}
	u32::from_str_radix(s, 16).ok().filter(|&cp| cp <= MAX_CODE_POINT)
}

/// Parse a `U+` prefixed hexadecimal code point, e.g. `U+3405`.
pub fn parse_prefixed_code_point(s: &str) -> Option<u32> {
	s.strip_prefix("U+").and_then(parse_code_point)
}

/// Inclusive range of code points, a single code point is a range where `first == last`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePointRange {
	first: u32,
	last:  u32,
}

impl CodePointRange {
	/// Create a range, returns `None` when `first > last` or when either end is not a code point.
	pub const fn new(first: u32, last: u32) -> Option<Self> {
		if first <= last && last <= MAX_CODE_POINT {
			Some(Self { first, last })
		} else {
			None
		}
	}

	/// Create a range covering a single code point.
	pub const fn single(code_point: u32) -> Option<Self> {
		Self::new(code_point, code_point)
	}

	/// Parse either a single code point (`0041`) or a range (`3400..4DB5`).
	pub fn parse(s: &str) -> Option<Self> {
		match s.split_once("..") {
			Some((first, last)) => Self::new(parse_code_point(first)?, parse_code_point(last)?),
			None => Self::single(parse_code_point(s)?),
		}
	}

	pub const fn first(&self) -> u32 {
		self.first
	}

	pub const fn last(&self) -> u32 {
		self.last
	}

	pub const fn is_single(&self) -> bool {
		self.first == self.last
	}

	/// Number of code points in the range.
	pub const fn len(&self) -> u32 {
		self.last - self.first + 1
	}

	pub const fn contains(&self, code_point: u32) -> bool {
		self.first <= code_point && code_point <= self.last
	}

	pub const fn overlaps(&self, other: &Self) -> bool {
		self.first <= other.last && other.first <= self.last
	}

	/// Merge 2 ranges if they overlap or touch.
	pub fn merge(self, other: Self) -> Option<Self> {
		if self.first <= other.last.saturating_add(1) && other.first <= self.last.saturating_add(1) {
			Some(Self { first: self.first.min(other.first), last: self.last.max(other.last) })
		} else {
			None
		}
	}

	pub fn iter(&self) -> core::ops::RangeInclusive<u32> {
		self.first..=self.last
	}
}

impl fmt::Debug for CodePointRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl fmt::Display for CodePointRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_single() {
			write!(f, "U+{:04X}", self.first)
		} else {
			write!(f, "U+{:04X}..U+{:04X}", self.first, self.last)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_single_and_range() {
		let single = CodePointRange::parse("0041").unwrap();
		assert!(single.is_single());
		assert_eq!(single.first(), 0x41);

		let range = CodePointRange::parse("3400..4DB5").unwrap();
		assert_eq!((range.first(), range.last()), (0x3400, 0x4DB5));
		assert_eq!(range.len(), 0x4DB5 - 0x3400 + 1);
		assert_eq!(range.to_string(), "U+3400..U+4DB5");
	}

	#[test]
	fn parse_rejects_invalid_text() {
		assert_eq!(CodePointRange::parse(""), None);
		assert_eq!(CodePointRange::parse("XYZ"), None);
		assert_eq!(CodePointRange::parse("+41"), None);
		assert_eq!(CodePointRange::parse("0041.."), None);
		assert_eq!(CodePointRange::parse("4DB5..3400"), None);
		assert_eq!(CodePointRange::parse("110000"), None);
	}

	#[test]
	fn parse_prefixed() {
		assert_eq!(parse_prefixed_code_point("U+3405"), Some(0x3405));
		assert_eq!(parse_prefixed_code_point("U+20000"), Some(0x20000));
		assert_eq!(parse_prefixed_code_point("3405"), None);
		assert_eq!(parse_prefixed_code_point("U+"), None);
	}

	#[test]
	fn merge_touching_ranges() {
		let a = CodePointRange::new(0x10, 0x1F).unwrap();
		let b = CodePointRange::new(0x20, 0x2F).unwrap();
		let c = CodePointRange::new(0x40, 0x4F).unwrap();
		assert_eq!(a.merge(b), CodePointRange::new(0x10, 0x2F));
		assert_eq!(b.merge(a), CodePointRange::new(0x10, 0x2F));
		assert_eq!(a.merge(c), None);
		assert!(!a.overlaps(&b));
		assert!(a.overlaps(&CodePointRange::single(0x1F).unwrap()));
	}
}
