use crate::ReportLayout;

/// Interpreter configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
	/// Largest stack height a program may be certified with.
	pub stack_limit: usize,
	/// Default number of instructions an evaluation may run.
	pub step_limit: u64,
	/// Layout of the packed tier reports read by the tier opcodes.
	pub report_layout: ReportLayout,
}

impl Config {
	/// Standard configuration: 1024 stack slots, a million steps and 32-bit
	/// report fields with tier 1 in the lowest bits.
	pub const fn standard() -> Config {
		Config {
			stack_limit: 1024,
			step_limit: 1_000_000,
			report_layout: ReportLayout::STANDARD,
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::standard()
	}
}
