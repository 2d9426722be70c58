use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::cmp::max;

use crate::opcode::operand;
use crate::program::{instruction_at, INSTRUCTION_WIDTH};
use crate::{ContextBounds, ExitError, Opcode, Program, VerificationFault};

/// Height bookkeeping for one source checked with a given number of inputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Summary {
	/// Height when the source ends, inputs included.
	height: usize,
	/// Highest height reached, including the peaks of any calls.
	max_height: usize,
}

/// Static analyzer that bounds the stack of every entry point before a
/// program may be evaluated.
///
/// Sources contain no jumps, so one linear pass per `(source, inputs)` pair
/// decides everything. Calls may only target a later source, which keeps the
/// call graph acyclic.
pub struct Integrity<'a> {
	program: &'a Program,
	bounds: &'a ContextBounds,
	stack_limit: usize,
	summaries: BTreeMap<(usize, usize), Summary>,
}

impl<'a> Integrity<'a> {
	pub fn new(program: &'a Program, bounds: &'a ContextBounds) -> Self {
		Self {
			program,
			bounds,
			stack_limit: usize::MAX,
			summaries: BTreeMap::new(),
		}
	}

	/// Reject programs that would need more than `limit` stack slots.
	pub fn with_stack_limit(mut self, limit: usize) -> Self {
		self.stack_limit = limit;
		self
	}

	/// Check source `i` as an entry point that must leave exactly
	/// `expected_outputs[i]` values. Returns the maximum stack height of each
	/// entry point.
	pub fn check(&mut self, expected_outputs: &[usize]) -> Result<Vec<usize>, VerificationFault> {
		if expected_outputs.len() > self.program.sources.len() {
			return Err(VerificationFault {
				source: self.program.sources.len(),
				position: 0,
				error: ExitError::OperandOutOfBounds,
			});
		}

		let mut heights = Vec::with_capacity(expected_outputs.len());
		for (index, expected) in expected_outputs.iter().enumerate() {
			let summary = self.summarize(index, 0)?;
			if summary.height != *expected {
				return Err(VerificationFault {
					source: index,
					position: self.program.sources[index].len(),
					error: ExitError::StackMismatch {
						expected: *expected,
						actual: summary.height,
					},
				});
			}
			heights.push(summary.max_height);
		}
		Ok(heights)
	}

	fn summarize(&mut self, index: usize, inputs: usize) -> Result<Summary, VerificationFault> {
		if let Some(summary) = self.summaries.get(&(index, inputs)) {
			return Ok(*summary);
		}

		let fault = |position, error| VerificationFault {
			source: index,
			position,
			error,
		};

		let program = self.program;
		let code = program
			.source(index)
			.ok_or_else(|| fault(0, ExitError::OperandOutOfBounds))?;
		if code.len() % INSTRUCTION_WIDTH != 0 {
			return Err(fault(code.len() - 1, ExitError::MalformedEncoding));
		}

		let mut height = inputs;
		let mut max_height = inputs;
		let mut position = 0;
		while let Some(instruction) = instruction_at(code, position) {
			let opcode = instruction.opcode;
			let (pops, pushes) = opcode
				.stack_effect(instruction.operand)
				.map_err(|e| fault(position, e))?;
			if height < pops {
				return Err(fault(position, ExitError::StackUnderflow));
			}

			match opcode {
				Opcode::CONSTANT => {
					if instruction.operand as usize >= program.constants.len() {
						return Err(fault(position, ExitError::OperandOutOfBounds));
					}
				}
				Opcode::STACK => {
					if instruction.operand as usize >= height {
						return Err(fault(position, ExitError::OperandOutOfBounds));
					}
				}
				Opcode::CONTEXT => {
					let (column, row) = operand::context(instruction.operand);
					if !self.bounds.contains(column, row) {
						return Err(fault(position, ExitError::OperandOutOfBounds));
					}
				}
				Opcode::CALL => {
					let (callee, inputs, outputs) = operand::call(instruction.operand);
					if callee <= index || callee >= program.sources.len() {
						return Err(fault(position, ExitError::OperandOutOfBounds));
					}
					let summary = self.summarize(callee, inputs)?;
					if summary.height != outputs {
						return Err(fault(
							position,
							ExitError::StackMismatch {
								expected: outputs,
								actual: summary.height,
							},
						));
					}
					max_height = max(max_height, height - inputs + summary.max_height);
				}
				_ => (),
			}

			height = height - pops + pushes;
			max_height = max(max_height, height);
			if max_height > self.stack_limit {
				return Err(fault(position, ExitError::StackOverflow));
			}
			position += INSTRUCTION_WIDTH;
		}

		let summary = Summary { height, max_height };
		self.summaries.insert((index, inputs), summary);
		Ok(summary)
	}
}

/// Certify `program` against `bounds`, see [`Integrity::check`].
pub fn check(
	program: &Program,
	bounds: &ContextBounds,
	expected_outputs: &[usize],
) -> Result<Vec<usize>, VerificationFault> {
	Integrity::new(program, bounds).check(expected_outputs)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::program::{op, source};
	use primitive_types::U256;

	fn constants(n: u64) -> Vec<U256> {
		(0..n).map(U256::from).collect()
	}

	#[test]
	fn single_constant() {
		let program = Program::new(vec![source(&[op(Opcode::CONSTANT, 0)])], constants(1));
		assert_eq!(check(&program, &ContextBounds::none(), &[1]), Ok(vec![1]));
	}

	#[test]
	fn tracks_peak_not_final_height() {
		let program = Program::new(
			vec![source(&[
				op(Opcode::CONSTANT, 0),
				op(Opcode::CONSTANT, 1),
				op(Opcode::CONSTANT, 2),
				op(Opcode::ADD, 3),
				op(Opcode::CONSTANT, 0),
			])],
			constants(3),
		);
		assert_eq!(check(&program, &ContextBounds::none(), &[2]), Ok(vec![3]));
	}

	#[test]
	fn underflow_is_located() {
		let program = Program::new(
			vec![source(&[op(Opcode::CONSTANT, 0), op(Opcode::ADD, 2)])],
			constants(1),
		);
		assert_eq!(
			check(&program, &ContextBounds::none(), &[1]),
			Err(VerificationFault {
				source: 0,
				position: 2,
				error: ExitError::StackUnderflow
			})
		);
	}

	#[test]
	fn operand_bounds() {
		let bounds = ContextBounds::new(vec![2]);
		let cases = [
			op(Opcode::CONSTANT, 1),
			op(Opcode::STACK, 0),
			op(Opcode::CONTEXT, 0x02),
			op(Opcode::CONTEXT, 0x10),
		];
		for instruction in cases {
			let program = Program::new(vec![source(&[instruction])], constants(1));
			assert_eq!(
				check(&program, &bounds, &[1]).map_err(|f| f.error),
				Err(ExitError::OperandOutOfBounds)
			);
		}

		let program = Program::new(
			vec![source(&[op(Opcode::CONTEXT, 0x01), op(Opcode::STACK, 0)])],
			vec![],
		);
		assert_eq!(check(&program, &bounds, &[2]), Ok(vec![2]));
	}

	#[test]
	fn unknown_opcode() {
		let program = Program::new(vec![vec![0xfe, 0x00]], vec![]);
		assert_eq!(
			check(&program, &ContextBounds::none(), &[0]).map_err(|f| f.error),
			Err(ExitError::UnknownOpcode(Opcode(0xfe)))
		);
	}

	#[test]
	fn outputs_must_match_call_site() {
		let program = Program::new(
			vec![
				source(&[op(Opcode::CONSTANT, 0), op(Opcode::CONSTANT, 0)]),
				source(&[op(Opcode::CONSTANT, 0), op(Opcode::ENSURE, 1)]),
			],
			constants(1),
		);
		assert_eq!(
			check(&program, &ContextBounds::none(), &[2, 0]),
			Ok(vec![2, 1])
		);
		assert_eq!(
			check(&program, &ContextBounds::none(), &[1]).map_err(|f| f.error),
			Err(ExitError::StackMismatch {
				expected: 1,
				actual: 2
			})
		);
		assert_eq!(
			check(&program, &ContextBounds::none(), &[2, 0, 0]).map_err(|f| f.error),
			Err(ExitError::OperandOutOfBounds)
		);
	}

	#[test]
	fn call_peak_stacks_on_caller() {
		// source 1 doubles its single input, peaking at two values
		let program = Program::new(
			vec![
				source(&[
					op(Opcode::CONSTANT, 0),
					op(Opcode::CONSTANT, 1),
					op(Opcode::CALL, (1 << 6) | (1 << 4) | 1),
					op(Opcode::ADD, 2),
				]),
				source(&[op(Opcode::STACK, 0), op(Opcode::ADD, 2)]),
			],
			constants(2),
		);
		assert_eq!(check(&program, &ContextBounds::none(), &[1]), Ok(vec![3]));
	}

	#[test]
	fn calls_must_go_forward() {
		let program = Program::new(
			vec![
				source(&[op(Opcode::CALL, 1)]),
				source(&[op(Opcode::CALL, 1)]),
			],
			vec![],
		);
		assert_eq!(
			check(&program, &ContextBounds::none(), &[0]),
			Err(VerificationFault {
				source: 1,
				position: 0,
				error: ExitError::OperandOutOfBounds
			})
		);
	}

	#[test]
	fn callee_output_mismatch() {
		let program = Program::new(
			vec![
				source(&[op(Opcode::CALL, (1 << 4) | 1)]),
				source(&[]),
			],
			vec![],
		);
		assert_eq!(
			check(&program, &ContextBounds::none(), &[1]).map_err(|f| f.error),
			Err(ExitError::StackMismatch {
				expected: 1,
				actual: 0
			})
		);
	}

	#[test]
	fn stack_limit() {
		let program = Program::new(
			vec![source(&[op(Opcode::CONSTANT, 0), op(Opcode::CONSTANT, 0)])],
			constants(1),
		);
		let bounds = ContextBounds::none();
		assert_eq!(
			Integrity::new(&program, &bounds)
				.with_stack_limit(1)
				.check(&[2])
				.map_err(|f| f.error),
			Err(ExitError::StackOverflow)
		);
	}

	#[test]
	fn idempotent() {
		let program = Program::new(
			vec![source(&[
				op(Opcode::CONSTANT, 0),
				op(Opcode::CONSTANT, 1),
				op(Opcode::MAX, 2),
			])],
			constants(2),
		);
		let bounds = ContextBounds::none();
		let first = check(&program, &bounds, &[1]);
		assert_eq!(first, check(&program, &bounds, &[1]));
		assert_eq!(first, Ok(vec![2]));
	}

	#[test]
	fn odd_length_source() {
		let program = Program::new(vec![vec![0x00, 0x00, 0x00]], constants(1));
		assert_eq!(
			check(&program, &ContextBounds::none(), &[1]),
			Err(VerificationFault {
				source: 0,
				position: 2,
				error: ExitError::MalformedEncoding
			})
		);
	}
}
