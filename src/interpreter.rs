use crate::backend::Store;
use crate::executor::Executor;
use crate::{
	codec, Config, Context, ContextBounds, ExitError, ExitReason, Integrity, Machine, Program,
	Runtime, VerificationFault,
};
use alloc::vec::Vec;
use primitive_types::U256;

/// A program that passed the integrity check, with the bounds it was
/// certified against. Immutable, so it can be shared between evaluations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expression {
	program: Program,
	bounds: ContextBounds,
	outputs: Vec<usize>,
	heights: Vec<usize>,
}

impl Expression {
	pub fn program(&self) -> &Program {
		&self.program
	}

	pub fn bounds(&self) -> &ContextBounds {
		&self.bounds
	}

	/// Number of entry points, the leading sources callers may evaluate.
	pub fn entry_points(&self) -> usize {
		self.outputs.len()
	}

	/// Values entry point `source` leaves on the stack.
	pub fn outputs(&self, source: usize) -> Option<usize> {
		self.outputs.get(source).copied()
	}

	/// Certified peak stack height of entry point `source`.
	pub fn max_stack_height(&self, source: usize) -> Option<usize> {
		self.heights.get(source).copied()
	}

	/// Serialize the program with [`codec::encode`].
	pub fn encode(&self) -> Vec<u8> {
		codec::encode(&self.program)
	}
}

pub struct Interpreter {
	config: Config,
}

impl Interpreter {
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Certify `program`. Source `i` becomes an entry point that must leave
	/// exactly `expected_outputs[i]` values.
	pub fn deploy(
		&self,
		program: Program,
		bounds: ContextBounds,
		expected_outputs: &[usize],
	) -> Result<Expression, VerificationFault> {
		let heights = Integrity::new(&program, &bounds)
			.with_stack_limit(self.config.stack_limit)
			.check(expected_outputs)
			.map_err(|fault| {
				log::debug!(target: "rainvm", "Rejected program: {}", fault);
				fault
			})?;

		log::debug!(
			target: "rainvm",
			"Deployed program with {} sources and {} constants, max stack heights: {:?}",
			program.sources.len(),
			program.constants.len(),
			heights,
		);

		event!(Deploy {
			program: &program,
			bounds: &bounds,
			outputs: expected_outputs,
			heights: &heights,
		});

		Ok(Expression {
			program,
			bounds,
			outputs: expected_outputs.to_vec(),
			heights,
		})
	}

	/// Evaluate entry point `source` with the configured step limit and
	/// return its outputs, the last pushed value last.
	pub fn evaluate<S: Store>(
		&self,
		expression: &Expression,
		source: usize,
		context: &Context,
		store: &mut S,
		namespace: U256,
	) -> Result<Vec<U256>, ExitError> {
		self.evaluate_with_limit(
			expression,
			source,
			context,
			store,
			namespace,
			self.config.step_limit,
		)
	}

	/// Evaluate entry point `source` and return the value on top of the stack.
	pub fn evaluate_top<S: Store>(
		&self,
		expression: &Expression,
		source: usize,
		context: &Context,
		store: &mut S,
		namespace: U256,
	) -> Result<U256, ExitError> {
		self.evaluate(expression, source, context, store, namespace)?
			.last()
			.copied()
			.ok_or(ExitError::StackUnderflow)
	}

	/// Evaluate entry point `source`, aborting with `ResourceExhausted` after
	/// `step_limit` instructions. Store writes made before an abort are kept.
	pub fn evaluate_with_limit<S: Store>(
		&self,
		expression: &Expression,
		source: usize,
		context: &Context,
		store: &mut S,
		namespace: U256,
		step_limit: u64,
	) -> Result<Vec<U256>, ExitError> {
		let (outputs, height) = match (
			expression.outputs(source),
			expression.max_stack_height(source),
		) {
			(Some(outputs), Some(height)) => (outputs, height),
			_ => return Err(ExitError::OperandOutOfBounds),
		};
		if !expression.bounds.is_satisfied_by(context) {
			return Err(ExitError::OperandOutOfBounds);
		}

		let machine = Machine::new(
			&expression.program,
			context,
			source,
			outputs,
			height,
			self.config.report_layout,
		);
		let mut runtime = Runtime::new(machine, namespace);
		let mut executor = Executor::new(store, step_limit);

		match executor.execute(&mut runtime) {
			ExitReason::Succeed(_) => Ok(runtime.into_machine().into_stack().into_vec()),
			ExitReason::Error(e) => Err(e),
		}
	}
}

impl Default for Interpreter {
	fn default() -> Self {
		Self::new(Config::standard())
	}
}
