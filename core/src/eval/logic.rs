use primitive_types::U256;

use super::{reduce, Control};
use crate::{ExitError, Machine, Opcode};

#[inline]
fn bool_word(value: bool) -> U256 {
	if value {
		U256::one()
	} else {
		U256::zero()
	}
}

fn is_zero(value: U256) -> U256 {
	bool_word(value.is_zero())
}

pub fn iszero(state: &mut Machine, _opcode: Opcode, _operand: u8) -> Control {
	op1_u256_fn!(state, is_zero)
}

pub fn equal_to(state: &mut Machine, _opcode: Opcode, _operand: u8) -> Control {
	op2_u256_bool!(state, eq)
}

pub fn less_than(state: &mut Machine, _opcode: Opcode, _operand: u8) -> Control {
	op2_u256_bool!(state, lt)
}

pub fn greater_than(state: &mut Machine, _opcode: Opcode, _operand: u8) -> Control {
	op2_u256_bool!(state, gt)
}

/// Scans from the most recently pushed value down.
pub fn every(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	reduce(state, operand as usize, |values| {
		if values.iter().rev().any(U256::is_zero) {
			Ok(U256::zero())
		} else {
			values.last().copied().ok_or(ExitError::StackUnderflow)
		}
	})
}

/// Scans from the most recently pushed value down.
pub fn any(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	reduce(state, operand as usize, |values| {
		Ok(values
			.iter()
			.rev()
			.find(|value| !value.is_zero())
			.copied()
			.unwrap_or_default())
	})
}

pub fn eager_if(state: &mut Machine, _opcode: Opcode, _operand: u8) -> Control {
	pop_u256!(state, otherwise, then, condition);
	let ret = if condition.is_zero() { otherwise } else { then };
	push_u256!(state, ret);

	Control::Continue
}

pub fn ensure(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	pop_u256!(state, condition);
	if condition.is_zero() {
		return Control::Exit(ExitError::EnsureFailed(operand).into());
	}

	Control::Continue
}
