#[macro_use]
mod macros;
mod arithmetic;
mod logic;
mod misc;
mod tier;

use crate::{ExitError, ExitReason, Frame, Instruction, Machine, Opcode};
use primitive_types::U256;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Control {
	Continue,
	Exit(ExitReason),
	/// Enter a new frame. The caller's position has not been advanced yet.
	Call(Frame),
	Trap(Instruction),
}

type Efn = fn(&mut Machine, Opcode, u8) -> Control;

macro_rules! build_table {
	( $( $(#[$doc:meta])* $name:ident = $id:literal, $mnemonic:literal, $effect:expr, $eval:path; )* ) => {
		// Table-based dispatch, indexed by opcode id.
		static TABLE: [Efn; 256] = {
			let mut table: [Efn; 256] = [unknown as Efn; 256];
			$(
				table[$id] = $eval as Efn;
			)*
			table
		};
	};
}

for_each_opcode!(build_table);

fn unknown(_state: &mut Machine, opcode: Opcode, _operand: u8) -> Control {
	Control::Exit(ExitError::UnknownOpcode(opcode).into())
}

/// Opcodes that need the host are handed back to the runtime.
fn external(_state: &mut Machine, opcode: Opcode, operand: u8) -> Control {
	Control::Trap(Instruction::new(opcode, operand))
}

#[inline]
pub fn eval(state: &mut Machine, opcode: Opcode, operand: u8) -> Control {
	TABLE[opcode.as_usize()](state, opcode, operand)
}

/// Replace the top `n` values with `f` of them, passed bottom first.
#[inline]
fn reduce<F>(state: &mut Machine, n: usize, f: F) -> Control
where
	F: FnOnce(&[U256]) -> Result<U256, ExitError>,
{
	let ret = try_or_fail!(state.stack.top(n).and_then(f));
	try_or_fail!(state.stack.discard(n));
	push_u256!(state, ret);

	Control::Continue
}
