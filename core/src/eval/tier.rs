use super::{reduce, Control};
use crate::opcode::operand;
use crate::tier_report::{Logic, Mode};
use crate::{ExitError, Machine, Opcode};

pub fn saturating_diff(state: &mut Machine, _opcode: Opcode, _operand: u8) -> Control {
	pop_u256!(state, older, newer);
	let ret = state.layout.saturating_diff(newer, older);
	push_u256!(state, ret);

	Control::Continue
}

/// Reports are pushed first, the reference time last.
pub fn select_lte(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	let (logic, mode, len) = operand::select_lte(operand);
	let logic = try_or_fail!(Logic::from_u8(logic).ok_or(ExitError::OperandOutOfBounds));
	let mode = try_or_fail!(Mode::from_u8(mode).ok_or(ExitError::OperandOutOfBounds));
	let layout = state.layout;

	reduce(state, len + 1, |values| {
		let (time, reports) = values.split_last().ok_or(ExitError::StackUnderflow)?;
		Ok(layout.select_lte(reports, *time, logic, mode))
	})
}

pub fn update_times_for_tier_range(state: &mut Machine, _opcode: Opcode, operand: u8) -> Control {
	let (start, end) = operand::tier_range(operand);
	pop_u256!(state, time, report);
	let ret = state
		.layout
		.update_times_for_tier_range(report, start as usize, end as usize, time);
	push_u256!(state, ret);

	Control::Continue
}
