use std::collections::BTreeMap;

use crate::CodePointRange;

/// Set of code point ranges for each boolean property.
/// 
/// Ranges of a property are kept sorted, and overlapping or touching ranges are coalesced, so applying a flag is a logical OR over code points.
/// The result is therefore independent of the order in which flags are applied.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PropertyRangeSet<P: Ord + Copy> {
	ranges: BTreeMap<P, Vec<CodePointRange>>,
}

impl<P: Ord + Copy> PropertyRangeSet<P> {
	pub fn new() -> Self {
		Self { ranges: BTreeMap::new() }
	}

	/// Set `property` for all code points in `range`.
	pub fn set(&mut self, property: P, range: CodePointRange) {
		let ranges = self.ranges.entry(property).or_default();

		// Ranges in `start..end` overlap or touch `range`.
		let start = ranges.partition_point(|r| r.last().saturating_add(1) < range.first());
		let end = ranges.partition_point(|r| r.first() <= range.last().saturating_add(1));

		let merged = ranges[start..end].iter().fold(range, |acc, r| acc.merge(*r).unwrap_or(acc));
		ranges.splice(start..end, core::iter::once(merged));
	}

	/// Check if `property` holds for `code_point`.
	pub fn contains(&self, property: P, code_point: u32) -> bool {
		self.ranges.get(&property).map_or(false, |ranges| {
			let idx = ranges.partition_point(|r| r.last() < code_point);
			ranges.get(idx).map_or(false, |r| r.contains(code_point))
		})
	}

	/// Get the sorted, coalesced ranges for `property`.
	pub fn ranges(&self, property: P) -> &[CodePointRange] {
		self.ranges.get(&property).map_or(&[], |ranges| ranges.as_slice())
	}

	/// Get all properties that hold for `code_point`, in property order.
	pub fn properties_at(&self, code_point: u32) -> Vec<P> {
		self.ranges.keys()
			.copied()
			.filter(|&prop| self.contains(prop, code_point))
			.collect()
	}

	/// Iterate over every property that has been set at least once.
	pub fn iter(&self) -> impl Iterator<Item = (P, &[CodePointRange])> {
		self.ranges.iter().map(|(prop, ranges)| (*prop, ranges.as_slice()))
	}

	pub fn is_empty(&self) -> bool {
		self.ranges.is_empty()
	}
}

impl<P: Ord + Copy> Default for PropertyRangeSet<P> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ContributoryProperty;

	fn range(first: u32, last: u32) -> CodePointRange {
		CodePointRange::new(first, last).unwrap()
	}

	#[test]
	fn coalesces_overlapping_and_adjacent_ranges() {
		let mut set = PropertyRangeSet::new();
		set.set(ContributoryProperty::WhiteSpace, range(0x20, 0x20));
		set.set(ContributoryProperty::WhiteSpace, range(0x09, 0x0D));
		set.set(ContributoryProperty::WhiteSpace, range(0x0E, 0x10));
		set.set(ContributoryProperty::WhiteSpace, range(0x85, 0x85));
		set.set(ContributoryProperty::WhiteSpace, range(0x0A, 0x0B));

		assert_eq!(set.ranges(ContributoryProperty::WhiteSpace), &[range(0x09, 0x10), range(0x20, 0x20), range(0x85, 0x85)]);
		assert!(set.contains(ContributoryProperty::WhiteSpace, 0x0F));
		assert!(!set.contains(ContributoryProperty::WhiteSpace, 0x11));
		assert!(!set.contains(ContributoryProperty::Dash, 0x20));
	}

	#[test]
	fn bridging_range_joins_neighbours() {
		let mut set = PropertyRangeSet::new();
		set.set(ContributoryProperty::Dash, range(0x10, 0x1F));
		set.set(ContributoryProperty::Dash, range(0x30, 0x3F));
		set.set(ContributoryProperty::Dash, range(0x50, 0x5F));
		set.set(ContributoryProperty::Dash, range(0x18, 0x52));

		assert_eq!(set.ranges(ContributoryProperty::Dash), &[range(0x10, 0x5F)]);
	}

	#[test]
	fn idempotent_and_order_independent() {
		let flags = [
			(ContributoryProperty::Dash, range(0x2D, 0x2D)),
			(ContributoryProperty::Hyphen, range(0x2D, 0x2D)),
			(ContributoryProperty::Dash, range(0x2010, 0x2015)),
			(ContributoryProperty::Dash, range(0x2012, 0x2018)),
			(ContributoryProperty::Hyphen, range(0x2010, 0x2011)),
		];

		let mut forward = PropertyRangeSet::new();
		for (prop, range) in flags {
			forward.set(prop, range);
		}

		let mut backward = PropertyRangeSet::new();
		for (prop, range) in flags.iter().rev().chain(flags.iter()) {
			backward.set(*prop, *range);
		}

		assert_eq!(forward, backward);
		assert_eq!(forward.properties_at(0x2D), vec![ContributoryProperty::Dash, ContributoryProperty::Hyphen]);
		assert_eq!(forward.properties_at(0x2016), vec![ContributoryProperty::Dash]);
		assert!(forward.properties_at(0x41).is_empty());
	}
}
