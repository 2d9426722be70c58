//! Tier reports pack one time per tier into a single word.
//!
//! There are eight tiers. Tier `n` (1-based) lives in field `n - 1`; where
//! that field sits inside the word is decided by the [`ReportLayout`]. A
//! field that is all ones means the tier was never reached, and tier zero is
//! always reached at time zero.

use core::cmp::{max, min};
use primitive_types::U256;

/// Number of tiers held by a report.
pub const TIERS: usize = 8;

/// Which end of the word holds tier one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldOrder {
	/// Tier one is the least significant field.
	LowestFirst,
	/// Tier one is the most significant field.
	HighestFirst,
}

/// How `SELECT_LTE` treats a report whose tier time is after the reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Logic {
	/// Every report must be at or before the reference time.
	Every,
	/// At least one report must be at or before the reference time.
	Any,
}

/// Which qualifying time `SELECT_LTE` keeps.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
	Min,
	Max,
	/// The earliest-pushed qualifying report.
	First,
}

impl Logic {
	pub fn from_u8(value: u8) -> Option<Logic> {
		match value {
			0 => Some(Logic::Every),
			1 => Some(Logic::Any),
			_ => None,
		}
	}
}

impl Mode {
	pub fn from_u8(value: u8) -> Option<Mode> {
		match value {
			0 => Some(Mode::Min),
			1 => Some(Mode::Max),
			2 => Some(Mode::First),
			_ => None,
		}
	}
}

/// Field width and order of a tier report.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportLayout {
	field_bits: usize,
	order: FieldOrder,
}

impl Default for ReportLayout {
	fn default() -> Self {
		Self::STANDARD
	}
}

impl ReportLayout {
	/// 32-bit fields, tier one least significant.
	pub const STANDARD: ReportLayout = ReportLayout {
		field_bits: 32,
		order: FieldOrder::LowestFirst,
	};

	/// Only 16 and 32 bit fields are supported.
	pub fn new(field_bits: usize, order: FieldOrder) -> Option<Self> {
		match field_bits {
			16 | 32 => Some(Self { field_bits, order }),
			_ => None,
		}
	}

	pub fn field_bits(&self) -> usize {
		self.field_bits
	}

	pub fn order(&self) -> FieldOrder {
		self.order
	}

	#[inline]
	fn mask(&self) -> U256 {
		(U256::one() << self.field_bits) - U256::one()
	}

	#[inline]
	fn offset(&self, tier_index: usize) -> usize {
		match self.order {
			FieldOrder::LowestFirst => tier_index * self.field_bits,
			FieldOrder::HighestFirst => (TIERS - 1 - tier_index) * self.field_bits,
		}
	}

	/// A report in which no tier was ever reached.
	pub fn never(&self) -> U256 {
		(0..TIERS).fold(U256::zero(), |report, index| {
			report | (self.mask() << self.offset(index))
		})
	}

	/// Time at which `tier` was reached. Tier zero is always time zero and
	/// tiers past the last read as never.
	pub fn tier_time(&self, report: U256, tier: usize) -> U256 {
		match tier {
			0 => U256::zero(),
			t if t > TIERS => self.mask(),
			t => (report >> self.offset(t - 1)) & self.mask(),
		}
	}

	/// Overwrite the field at zero-based `tier_index`. Times wider than a
	/// field are truncated to it.
	pub fn update_time_at_tier(&self, report: U256, tier_index: usize, time: U256) -> U256 {
		let offset = self.offset(tier_index);
		(report & !(self.mask() << offset)) | ((time & self.mask()) << offset)
	}

	/// Set every tier in `start + 1 ..= end` to `time`.
	pub fn update_times_for_tier_range(
		&self,
		report: U256,
		start: usize,
		end: usize,
		time: U256,
	) -> U256 {
		(start..min(end, TIERS)).fold(report, |report, index| {
			self.update_time_at_tier(report, index, time)
		})
	}

	/// Per tier `newer - older`, floored at zero.
	pub fn saturating_diff(&self, newer: U256, older: U256) -> U256 {
		(0..TIERS).fold(U256::zero(), |report, index| {
			let diff = self
				.tier_time(newer, index + 1)
				.saturating_sub(self.tier_time(older, index + 1));
			self.update_time_at_tier(report, index, diff)
		})
	}

	/// Combine reports tier by tier, keeping only times at or before `time`.
	/// Reports are visited in the given order; a tier with no qualifying
	/// time, or where `Logic::Every` saw a later time, is never reached.
	pub fn select_lte(&self, reports: &[U256], time: U256, logic: Logic, mode: Mode) -> U256 {
		let mut result = U256::zero();
		for index in 0..TIERS {
			let mut accumulator: Option<U256> = None;
			let mut failed = false;
			for report in reports {
				let tier_time = self.tier_time(*report, index + 1);
				if tier_time <= time {
					accumulator = Some(match (mode, accumulator) {
						(_, None) => tier_time,
						(Mode::Min, Some(current)) => min(current, tier_time),
						(Mode::Max, Some(current)) => max(current, tier_time),
						(Mode::First, Some(current)) => current,
					});
				} else if logic == Logic::Every {
					failed = true;
					break;
				}
			}

			let selected = match accumulator {
				Some(selected) if !failed => selected,
				_ => self.mask(),
			};
			result = self.update_time_at_tier(result, index, selected);
		}
		result
	}
}
