use core::fmt;
use std::collections::BTreeMap;

use crate::{
	CharacterRecord, CodePointRange, ContributoryProperty, CoreProperty, PropertyRangeSet,
	UcdErrorKind, UnicodeProperty, UnihanEntry,
};

/// Version of the UCD being processed
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct UnicodeVersion {
	pub major: u8,
	pub minor: u8,
	pub patch: u8,
}

impl UnicodeVersion {
	pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
		Self { major, minor, patch }
	}

	/// Parse `major.minor.patch`, where the minor and patch components are optional.
	pub fn parse(s: &str) -> Option<Self> {
		let mut parts = s.trim().split('.');
		let major = parts.next()?.parse().ok()?;
		let minor = parts.next().map_or(Some(0), |part| part.parse().ok())?;
		let patch = parts.next().map_or(Some(0), |part| part.parse().ok())?;
		if parts.next().is_some() {
			return None;
		}
		Some(Self { major, minor, patch })
	}
}

impl Default for UnicodeVersion {
	fn default() -> Self {
		Self::new(7, 0, 0)
	}
}

impl fmt::Display for UnicodeVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
	}
}

/// Named block of code points
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UnicodeBlock {
	pub range: CodePointRange,
	pub name:  String,
}

/// Aggregate of everything parsed from the UCD and Unihan files.
/// 
/// Data is only ever added, the only in-place update is OR-ing property flags.
#[derive(Clone, Debug)]
pub struct UnicodeDatabaseBuilder {
	version:      UnicodeVersion,
	characters:   BTreeMap<u32, CharacterRecord>,
	contributory: PropertyRangeSet<ContributoryProperty>,
	core:         PropertyRangeSet<CoreProperty>,
	blocks:       Vec<UnicodeBlock>,
	unihan:       BTreeMap<u32, UnihanEntry>,
}

impl UnicodeDatabaseBuilder {
	pub fn new(version: UnicodeVersion) -> Self {
		Self {
			version,
			characters: BTreeMap::new(),
			contributory: PropertyRangeSet::new(),
			core: PropertyRangeSet::new(),
			blocks: Vec::new(),
			unihan: BTreeMap::new(),
		}
	}

	pub fn version(&self) -> UnicodeVersion {
		self.version
	}

	/// Insert a character record, keyed by the first code point of its range.
	/// 
	/// Fails if the range overlaps a record that was inserted before.
	pub fn insert_character_record(&mut self, record: CharacterRecord) -> Result<(), UcdErrorKind> {
		let range = record.range;
		let prev = self.characters.range(..=range.last()).next_back();
		if let Some((_, prev)) = prev {
			if prev.range.overlaps(&range) {
				return Err(UcdErrorKind::MalformedRecord(format!("{range} overlaps the previous record for {}", prev.range)));
			}
		}
		self.characters.insert(range.first(), record);
		Ok(())
	}

	/// Set a boolean property over a range, in either the contributory or core property set.
	pub fn apply_property_flag(&mut self, property: impl Into<UnicodeProperty>, range: CodePointRange) {
		match property.into() {
			UnicodeProperty::Contributory(prop) => self.contributory.set(prop, range),
			UnicodeProperty::Core(prop) => self.core.set(prop, range),
		}
	}

	pub fn append_block(&mut self, block: UnicodeBlock) {
		self.blocks.push(block);
	}

	/// Get the Unihan entry for a code point, creating an empty entry if there is none.
	pub fn get_or_create_unihan_entry(&mut self, code_point: u32) -> &mut UnihanEntry {
		self.unihan.entry(code_point).or_insert_with(|| UnihanEntry::new(code_point))
	}

	/// Get the record whose range contains `code_point`.
	pub fn character(&self, code_point: u32) -> Option<&CharacterRecord> {
		self.characters.range(..=code_point)
			.next_back()
			.map(|(_, record)| record)
			.filter(|record| record.range.contains(code_point))
	}

	/// Iterate over all records in code point order.
	pub fn characters(&self) -> impl Iterator<Item = &CharacterRecord> {
		self.characters.values()
	}

	pub fn character_count(&self) -> usize {
		self.characters.len()
	}

	/// Get the first block, in file order, that contains `code_point`.
	pub fn block(&self, code_point: u32) -> Option<&UnicodeBlock> {
		self.blocks.iter().find(|block| block.range.contains(code_point))
	}

	/// Get all blocks, in file order.
	pub fn blocks(&self) -> &[UnicodeBlock] {
		&self.blocks
	}

	pub fn unihan(&self, code_point: u32) -> Option<&UnihanEntry> {
		self.unihan.get(&code_point)
	}

	/// Iterate over all Unihan entries in code point order.
	pub fn unihan_entries(&self) -> impl Iterator<Item = &UnihanEntry> {
		self.unihan.values()
	}

	pub fn unihan_count(&self) -> usize {
		self.unihan.len()
	}

	pub fn contributory_properties(&self) -> &PropertyRangeSet<ContributoryProperty> {
		&self.contributory
	}

	pub fn core_properties(&self) -> &PropertyRangeSet<CoreProperty> {
		&self.core
	}
}

impl Default for UnicodeDatabaseBuilder {
	fn default() -> Self {
		Self::new(UnicodeVersion::default())
	}
}
