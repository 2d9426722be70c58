use core::cmp::{max as max_of, min as min_of};
use primitive_types::U256;

use super::{reduce, Control};
use crate::{ExitError, Machine, Opcode};

/// Fold the top `arity` values in push order, so `a b c` becomes
/// `f(f(a, b), c)`.
#[inline]
fn fold<F>(state: &mut Machine, arity: u8, f: F) -> Control
where
	F: Fn(U256, U256) -> Result<U256, ExitError>,
{
	reduce(state, arity as usize, |values| {
		let (first, rest) = values.split_first().ok_or(ExitError::StackUnderflow)?;
		rest.iter().try_fold(*first, |acc, value| f(acc, *value))
	})
}

pub fn add(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| a.checked_add(b).ok_or(ExitError::Overflow))
}

pub fn sub(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| a.checked_sub(b).ok_or(ExitError::Overflow))
}

pub fn mul(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| a.checked_mul(b).ok_or(ExitError::Overflow))
}

pub fn div(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| a.checked_div(b).ok_or(ExitError::DivisionByZero))
}

pub fn rem(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| a.checked_rem(b).ok_or(ExitError::DivisionByZero))
}

pub fn exp(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| a.checked_pow(b).ok_or(ExitError::Overflow))
}

pub fn min(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| Ok(min_of(a, b)))
}

pub fn max(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| Ok(max_of(a, b)))
}

pub fn saturating_add(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| Ok(a.saturating_add(b)))
}

pub fn saturating_sub(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| Ok(a.saturating_sub(b)))
}

pub fn saturating_mul(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	fold(state, operand, |a, b| Ok(a.saturating_mul(b)))
}
