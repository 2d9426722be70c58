use crate::{ExitError, Instruction, Machine, Stack};
use primitive_types::U256;

/// What a `DEBUG` instruction dumps, selected by its operand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DebugStyle {
	/// Values of the current frame.
	Stack,
	/// The constants pool.
	Constants,
	/// The context grid.
	Context,
	/// Source index and position of the current frame.
	Source,
}

impl DebugStyle {
	pub fn from_u8(value: u8) -> Option<DebugStyle> {
		match value {
			0 => Some(DebugStyle::Stack),
			1 => Some(DebugStyle::Constants),
			2 => Some(DebugStyle::Context),
			3 => Some(DebugStyle::Source),
			_ => None,
		}
	}
}

/// RainVM host handler.
#[auto_impl::auto_impl(&mut, Box)]
pub trait Handler {
	/// Read `key` in `namespace`. Missing keys read as zero.
	fn get(&mut self, namespace: U256, key: U256) -> Result<U256, ExitError>;
	/// Write `value` at `key` in `namespace`. The write is visible to every
	/// later read, in this evaluation and the next ones.
	fn set(&mut self, namespace: U256, key: U256, value: U256) -> Result<(), ExitError>;

	/// Pre-validation step for the runtime, run before every instruction.
	fn pre_validate(&mut self, instruction: Instruction, stack: &Stack) -> Result<(), ExitError>;
	/// Handle a `DEBUG` instruction. It must not alter the evaluation.
	fn debug(&mut self, _style: DebugStyle, _machine: &Machine<'_>) -> Result<(), ExitError> {
		Ok(())
	}
}
