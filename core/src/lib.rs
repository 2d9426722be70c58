//! Core layer of RainVM: opcode table, integrity checker and the stack
//! machine evaluating certified sources.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[macro_use]
mod opcode;
mod context;
mod error;
mod eval;
mod program;
mod stack;

pub mod codec;
pub mod integrity;
pub mod tier_report;

pub use crate::context::{Context, ContextBounds};
pub use crate::error::{Capture, ExitError, ExitReason, ExitSucceed, Trap, VerificationFault};
pub use crate::integrity::Integrity;
pub use crate::opcode::{operand, stack_effect, Effect, Opcode, OpcodeInfo};
pub use crate::program::{
	instruction_at, op, source, Instruction, Program, INSTRUCTION_WIDTH,
};
pub use crate::stack::Stack;
pub use crate::tier_report::ReportLayout;

use crate::eval::{eval, Control};
use alloc::vec::Vec;

/// A source being executed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame {
	/// Index of the source in the program.
	pub source: usize,
	/// Byte offset of the next instruction.
	pub position: usize,
	/// Stack height at which this frame's values start.
	pub base: usize,
	/// Values the frame must leave above `base` when its source ends.
	pub outputs: usize,
}

/// Core execution layer for RainVM.
pub struct Machine<'a> {
	/// Program being evaluated.
	program: &'a Program,
	/// Caller supplied context.
	context: &'a Context,
	/// Tier report layout used by the tier opcodes.
	layout: ReportLayout,
	/// Call frames, entry source first.
	frames: Vec<Frame>,
	/// Stack.
	stack: Stack,
	status: Result<(), ExitReason>,
}

impl<'a> Machine<'a> {
	pub fn stack(&self) -> &Stack {
		&self.stack
	}
	pub fn stack_mut(&mut self) -> &mut Stack {
		&mut self.stack
	}
	pub fn program(&self) -> &'a Program {
		self.program
	}
	pub fn context(&self) -> &'a Context {
		self.context
	}
	pub fn layout(&self) -> ReportLayout {
		self.layout
	}

	/// Innermost frame, `None` once the entry source has ended.
	pub fn frame(&self) -> Option<&Frame> {
		self.frames.last()
	}

	/// Prepare to evaluate `source`, which must leave `outputs` values. The
	/// stack is allocated once with room for exactly `stack_limit` values.
	pub fn new(
		program: &'a Program,
		context: &'a Context,
		source: usize,
		outputs: usize,
		stack_limit: usize,
		layout: ReportLayout,
	) -> Self {
		let mut frames = Vec::new();
		frames.push(Frame {
			source,
			position: 0,
			base: 0,
			outputs,
		});

		Self {
			program,
			context,
			layout,
			frames,
			stack: Stack::new(stack_limit),
			status: Ok(()),
		}
	}

	pub fn exit(&mut self, reason: ExitReason) {
		self.status = Err(reason);
	}

	pub fn status(&self) -> Result<(), ExitReason> {
		self.status
	}

	/// Next instruction to run, if the machine has not exited.
	pub fn inspect(&self) -> Option<(Instruction, &Stack)> {
		if self.status.is_err() {
			return None;
		}
		let frame = self.frames.last()?;
		let code = self.program.source(frame.source)?;
		instruction_at(code, frame.position).map(|instruction| (instruction, &self.stack))
	}

	pub fn into_stack(self) -> Stack {
		self.stack
	}

	pub fn run(&mut self) -> Capture<ExitReason, Trap> {
		loop {
			match self.step() {
				Ok(()) => (),
				Err(res) => return res,
			}
		}
	}

	pub fn step(&mut self) -> Result<(), Capture<ExitReason, Trap>> {
		self.status.map_err(Capture::Exit)?;

		let frame = match self.frames.last() {
			Some(frame) => *frame,
			None => return Err(self.fail(ExitSucceed::Stopped.into())),
		};
		let code = match self.program.source(frame.source) {
			Some(code) => code,
			None => return Err(self.fail(ExitError::OperandOutOfBounds.into())),
		};
		let instruction = match instruction_at(code, frame.position) {
			Some(instruction) => instruction,
			None if frame.position == code.len() => return self.leave(frame),
			None => return Err(self.fail(ExitError::MalformedEncoding.into())),
		};

		// Certification already proved this, re-checked so a frame can
		// never consume its caller's values.
		let (pops, _) = match instruction.opcode.stack_effect(instruction.operand) {
			Ok(effect) => effect,
			Err(e) => return Err(self.fail(e.into())),
		};
		if self.stack.len().saturating_sub(frame.base) < pops {
			return Err(self.fail(ExitError::StackUnderflow.into()));
		}

		match eval(self, instruction.opcode, instruction.operand) {
			Control::Continue => {
				self.advance();
				Ok(())
			}
			Control::Call(callee) => {
				self.advance();
				self.frames.push(callee);
				Ok(())
			}
			Control::Trap(instruction) => {
				self.advance();
				Err(Capture::Trap(instruction))
			}
			Control::Exit(reason) => Err(self.fail(reason)),
		}
	}

	fn advance(&mut self) {
		if let Some(frame) = self.frames.last_mut() {
			frame.position += INSTRUCTION_WIDTH;
		}
	}

	fn leave(&mut self, frame: Frame) -> Result<(), Capture<ExitReason, Trap>> {
		let height = self.stack.len().saturating_sub(frame.base);
		if height != frame.outputs {
			return Err(self.fail(
				ExitError::StackMismatch {
					expected: frame.outputs,
					actual: height,
				}
				.into(),
			));
		}

		self.frames.pop();
		if self.frames.is_empty() {
			Err(self.fail(ExitSucceed::Stopped.into()))
		} else {
			Ok(())
		}
	}

	fn fail(&mut self, reason: ExitReason) -> Capture<ExitReason, Trap> {
		self.status = Err(reason);
		Capture::Exit(reason)
	}
}
