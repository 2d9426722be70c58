use rainvm_core::Opcode;

pub const G_STEP: u64 = 1;

/// Every instruction costs a single step regardless of its operand, so a
/// budget bounds the number of instructions executed.
#[inline]
pub fn step_cost(_opcode: Opcode, _operand: u8) -> u64 {
	G_STEP
}
