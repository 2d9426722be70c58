use alloc::vec::Vec;
use primitive_types::U256;
use scale_codec::{Decode, Encode};

use crate::{ExitError, Opcode};

/// Width of one encoded instruction: opcode byte then operand byte.
pub const INSTRUCTION_WIDTH: usize = 2;

/// A decoded `(opcode, operand)` pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Instruction {
	pub opcode: Opcode,
	pub operand: u8,
}

impl Instruction {
	pub const fn new(opcode: Opcode, operand: u8) -> Self {
		Self { opcode, operand }
	}

	pub const fn to_bytes(self) -> [u8; INSTRUCTION_WIDTH] {
		[self.opcode.0, self.operand]
	}
}

/// Build the two-byte encoding of an instruction.
#[inline]
pub const fn op(opcode: Opcode, operand: u8) -> [u8; INSTRUCTION_WIDTH] {
	Instruction::new(opcode, operand).to_bytes()
}

/// Read the instruction at byte `position` of `code`, `None` past the end.
#[inline]
pub fn instruction_at(code: &[u8], position: usize) -> Option<Instruction> {
	match code.get(position..position + INSTRUCTION_WIDTH) {
		Some(&[opcode, operand]) => Some(Instruction::new(Opcode(opcode), operand)),
		_ => None,
	}
}

/// Sources plus the constants pool they index into.
#[derive(Clone, Debug, Default, Eq, PartialEq, Encode, Decode)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
	pub sources: Vec<Vec<u8>>,
	pub constants: Vec<U256>,
}

impl Program {
	pub fn new(sources: Vec<Vec<u8>>, constants: Vec<U256>) -> Self {
		Self { sources, constants }
	}

	pub fn source(&self, index: usize) -> Option<&[u8]> {
		self.sources.get(index).map(|s| &s[..])
	}

	/// Decode every instruction of a source. Fails if the source is missing
	/// or its length is not a whole number of instructions.
	pub fn instructions(&self, index: usize) -> Result<Vec<Instruction>, ExitError> {
		let code = self.source(index).ok_or(ExitError::OperandOutOfBounds)?;
		if code.len() % INSTRUCTION_WIDTH != 0 {
			return Err(ExitError::MalformedEncoding);
		}

		Ok(code
			.chunks_exact(INSTRUCTION_WIDTH)
			.map(|chunk| Instruction::new(Opcode(chunk[0]), chunk[1]))
			.collect())
	}
}

/// Concatenate instructions into a source.
pub fn source(instructions: &[[u8; INSTRUCTION_WIDTH]]) -> Vec<u8> {
	instructions.iter().flatten().copied().collect()
}
