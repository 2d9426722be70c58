#[macro_use]
mod macros;
mod system;

use crate::{ExitError, ExitReason, Handler, Instruction, Opcode, Runtime};

pub enum Control {
	Continue,
	Exit(ExitReason),
}

pub fn eval<H: Handler>(state: &mut Runtime, instruction: Instruction, handler: &mut H) -> Control {
	match instruction.opcode {
		Opcode::GET => system::get(state, handler),
		Opcode::SET => system::set(state, handler),
		Opcode::DEBUG => system::debug(state, instruction.operand, handler),
		opcode => Control::Exit(ExitError::UnknownOpcode(opcode).into()),
	}
}
