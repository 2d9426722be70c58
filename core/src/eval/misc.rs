use primitive_types::U256;
use sha3::{Digest, Keccak256};

use super::{reduce, Control};
use crate::opcode::operand;
use crate::{ExitError, Frame, Machine, Opcode};

pub fn constant(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	let value = try_or_fail!(state
		.program
		.constants
		.get(operand as usize)
		.copied()
		.ok_or(ExitError::OperandOutOfBounds));
	push_u256!(state, value);

	Control::Continue
}

/// Indexes from the base of the current frame, never into a caller's values.
pub fn stack(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	let base = state.frame().map_or(0, |frame| frame.base);
	let value = try_or_fail!(state.stack.get(base + operand as usize));
	push_u256!(state, value);

	Control::Continue
}

pub fn context(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	let (column, row) = operand::context(operand);
	let value = try_or_fail!(state
		.context
		.get(column, row)
		.ok_or(ExitError::OperandOutOfBounds));
	push_u256!(state, value);

	Control::Continue
}

pub fn call(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	let (source, inputs, outputs) = operand::call(operand);
	let caller = state.frame().map_or(0, |frame| frame.source);
	if source <= caller || source >= state.program.sources.len() {
		return Control::Exit(ExitError::OperandOutOfBounds.into());
	}
	if inputs > state.stack.len() {
		return Control::Exit(ExitError::StackUnderflow.into());
	}

	Control::Call(Frame {
		source,
		position: 0,
		base: state.stack.len() - inputs,
		outputs,
	})
}

/// Keccak-256 over the big-endian bytes of the top `operand` words.
pub fn hash(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	reduce(state, operand as usize, |values| {
		let mut hasher = Keccak256::new();
		let mut word = [0u8; 32];
		for value in values {
			value.to_big_endian(&mut word);
			hasher.update(word);
		}
		Ok(U256::from_big_endian(hasher.finalize().as_slice()))
	})
}
